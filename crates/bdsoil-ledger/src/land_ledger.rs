//! Land lifecycle: create, list and password-gated delete.
//!
//! Every operation is scoped to an owner. Deletion re-verifies the
//! owner's password and matches on both the land id and the owner, so a
//! guessed id belonging to someone else is reported as not found.

use bdsoil_db::{LandStore, NewLand, UserStore};
use bdsoil_geo::is_valid_gps;
use bdsoil_types::{Land, LandId, SoilType, UserId};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::auth::verify_password;
use crate::error::LedgerError;

/// Land operations for one store.
pub struct LandLedger<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LandLedger<'a> {
    /// Bind the ledger to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a land parcel.
    ///
    /// Location is trimmed and must be non-empty; area must be a positive
    /// number; GPS text, if non-blank, must be a `lat, lng` pair. Blank GPS
    /// is stored as null.
    pub async fn create(
        &self,
        owner: UserId,
        location: &str,
        area: f64,
        soil_type: SoilType,
        gps: Option<&str>,
    ) -> Result<Land, LedgerError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(LedgerError::Validation("Location required.".to_owned()));
        }
        if !(area.is_finite() && area > 0.0) {
            return Err(LedgerError::Validation("Area must be positive.".to_owned()));
        }
        let gps_coords = gps.map(str::trim).filter(|g| !g.is_empty());
        if let Some(gps) = gps_coords
            && !is_valid_gps(gps)
        {
            return Err(LedgerError::Validation("Invalid GPS format.".to_owned()));
        }

        let new_land = NewLand {
            user_id: owner,
            location: location.to_owned(),
            area,
            soil_type,
            gps_coords: gps_coords.map(ToOwned::to_owned),
        };
        let id = LandStore::new(self.pool).insert(&new_land).await?;
        info!(user_id = %owner, land_id = %id, area, soil = %soil_type, "land created");

        Ok(Land {
            id,
            user_id: new_land.user_id,
            location: new_land.location,
            area: new_land.area,
            soil_type: new_land.soil_type,
            gps_coords: new_land.gps_coords,
        })
    }

    /// The owner's lands, oldest first.
    pub async fn list(&self, owner: UserId) -> Result<Vec<Land>, LedgerError> {
        Ok(LandStore::new(self.pool).list_for_user(owner).await?)
    }

    /// How many lands the owner has.
    pub async fn count(&self, owner: UserId) -> Result<u64, LedgerError> {
        Ok(LandStore::new(self.pool).count_for_user(owner).await?)
    }

    /// Delete one of the owner's lands after re-checking their password.
    ///
    /// A wrong password is [`LedgerError::Auth`] and leaves the land in
    /// place. A land that is missing or owned by another user is
    /// [`LedgerError::NotFound`].
    pub async fn delete(
        &self,
        owner: UserId,
        land_id: LandId,
        password: &str,
    ) -> Result<(), LedgerError> {
        let stored = UserStore::new(self.pool).password_hash(owner).await?;
        let verified = stored.is_some_and(|hash| verify_password(&hash, password));
        if !verified {
            warn!(user_id = %owner, land_id = %land_id, "land delete refused: incorrect password");
            return Err(LedgerError::Auth("Incorrect password!".to_owned()));
        }

        if !LandStore::new(self.pool).delete_owned(land_id, owner).await? {
            warn!(user_id = %owner, land_id = %land_id, "land delete refused: not found");
            return Err(LedgerError::NotFound(format!("land {land_id}")));
        }

        info!(user_id = %owner, land_id = %land_id, "land deleted");
        Ok(())
    }
}
