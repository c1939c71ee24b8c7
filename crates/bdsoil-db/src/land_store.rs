//! Persistence for the `lands` table.

use bdsoil_types::{Land, LandId, SoilType, UserId};
use sqlx::SqlitePool;

use crate::error::DbError;

/// A land row to insert. Inputs are validated by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLand {
    /// Owning user.
    pub user_id: UserId,
    /// Location text.
    pub location: String,
    /// Area in hectares.
    pub area: f64,
    /// Soil classification.
    pub soil_type: SoilType,
    /// `lat, lng` text or `None`.
    pub gps_coords: Option<String>,
}

/// Operations on the `lands` table.
pub struct LandStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LandStore<'a> {
    /// Create a new land store bound to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a land parcel and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the insert fails.
    pub async fn insert(&self, land: &NewLand) -> Result<LandId, DbError> {
        let result = sqlx::query(
            "INSERT INTO lands (user_id, location, area, soil_type, gps_coords) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(land.user_id.into_inner())
        .bind(&land.location)
        .bind(land.area)
        .bind(land.soil_type.as_str())
        .bind(&land.gps_coords)
        .execute(self.pool)
        .await?;

        Ok(LandId(result.last_insert_rowid()))
    }

    /// All lands of a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails and
    /// [`DbError::InvalidRow`] if a stored soil type is not recognised.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Land>, DbError> {
        let rows = sqlx::query_as::<_, LandRow>(
            "SELECT id, user_id, location, area, soil_type, gps_coords FROM lands WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id.into_inner())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Land::try_from).collect()
    }

    /// Number of lands a user owns.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn count_for_user(&self, user_id: UserId) -> Result<u64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lands WHERE user_id = ?")
            .bind(user_id.into_inner())
            .fetch_one(self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Delete a land only if it belongs to `user_id`.
    ///
    /// Returns `false` when no row matched both the id and the owner.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the delete fails.
    pub async fn delete_owned(&self, id: LandId, user_id: UserId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM lands WHERE id = ? AND user_id = ?")
            .bind(id.into_inner())
            .bind(user_id.into_inner())
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// A row from the `lands` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LandRow {
    /// Row id.
    pub id: i64,
    /// Owning user id.
    pub user_id: i64,
    /// Location text.
    pub location: String,
    /// Area in hectares.
    pub area: f64,
    /// Soil type label.
    pub soil_type: String,
    /// `lat, lng` text.
    pub gps_coords: Option<String>,
}

impl TryFrom<LandRow> for Land {
    type Error = DbError;

    fn try_from(row: LandRow) -> Result<Self, Self::Error> {
        let soil_type = row.soil_type.parse::<SoilType>().map_err(|e| DbError::InvalidRow {
            table: "lands",
            id: row.id,
            reason: e.to_string(),
        })?;
        Ok(Self {
            id: LandId(row.id),
            user_id: UserId(row.user_id),
            location: row.location,
            area: row.area,
            soil_type,
            // Older rows stored an empty string for "no coordinates".
            gps_coords: row.gps_coords.filter(|gps| !gps.trim().is_empty()),
        })
    }
}
