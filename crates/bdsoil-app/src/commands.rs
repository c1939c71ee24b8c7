//! Command handlers.
//!
//! Each handler takes the opened [`App`], the authenticated user where one
//! is needed, and a writer for the text shown to the user. Nothing here
//! reads the process environment, so handlers run unchanged in tests.

use std::cmp::Reverse;
use std::io::Write;
use std::path::{Path, PathBuf};

use bdsoil_advisor::{
    NO_FERTILIZER_RECOMMENDATION, RecommendationEngine, WeatherSnapshot, estimate,
    is_no_suitable_crops,
};
use bdsoil_catalog::format_thousands;
use bdsoil_ledger::{ProfileChanges, Registration, label_lands};
use bdsoil_report::{ReportContent, export_csv, export_pdf};
use bdsoil_types::{LandId, SoilType, UserId, WaterAvailability};
use chrono::Local;
use tracing::info;

use crate::error::AppError;
use crate::session::App;

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Create an account.
pub async fn register<W: Write>(
    app: &App,
    registration: &Registration,
    out: &mut W,
) -> Result<(), AppError> {
    app.accounts().register(registration).await?;
    writeln!(out, "Registration successful! You can now log in.")?;
    Ok(())
}

/// Nudge a user with no land towards adding one.
pub async fn first_land_hint<W: Write>(
    app: &App,
    user: UserId,
    out: &mut W,
) -> Result<(), AppError> {
    if app.lands().count(user).await? == 0 {
        writeln!(
            out,
            "You have no land registered yet. Add one with `bdsoil land add`."
        )?;
    }
    Ok(())
}

/// Print the user's profile.
pub async fn profile_show<W: Write>(app: &App, user: UserId, out: &mut W) -> Result<(), AppError> {
    let profile = app.accounts().profile(user).await?;
    writeln!(out, "Username: {}", profile.username)?;
    writeln!(out, "National ID: {}", profile.national_id)?;
    writeln!(out, "Name: {}", profile.name)?;
    writeln!(out, "Phone: {}", profile.phone)?;
    writeln!(
        out,
        "Profile picture: {}",
        profile.profile_pic.as_deref().unwrap_or("-")
    )?;
    Ok(())
}

/// Replace the user's profile details.
pub async fn profile_update<W: Write>(
    app: &App,
    user: UserId,
    changes: &ProfileChanges,
    out: &mut W,
) -> Result<(), AppError> {
    let profile = app.accounts().update_profile(user, changes).await?;
    writeln!(out, "Profile updated for {}.", profile.username)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Lands
// ---------------------------------------------------------------------------

/// Register a land parcel. `location` is already resolved by the caller.
pub async fn land_add<W: Write>(
    app: &App,
    user: UserId,
    location: &str,
    area: f64,
    soil: SoilType,
    gps: Option<&str>,
    out: &mut W,
) -> Result<(), AppError> {
    let land = app.lands().create(user, location, area, soil, gps).await?;
    writeln!(out, "Land added (id {}).", land.id)?;
    Ok(())
}

/// List the user's lands with their ordinal labels.
pub async fn land_list<W: Write>(app: &App, user: UserId, out: &mut W) -> Result<(), AppError> {
    let lands = app.lands().list(user).await?;
    if lands.is_empty() {
        writeln!(out, "No lands registered.")?;
        return Ok(());
    }
    for (label, land) in label_lands(&lands) {
        writeln!(
            out,
            "{label} Land [id {}]: {} | {} ha | {} | GPS: {}",
            land.id,
            land.location,
            land.area,
            land.soil_type,
            land.gps_coords.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}

/// Delete a land after the password check.
pub async fn land_delete<W: Write>(
    app: &App,
    user: UserId,
    land_id: LandId,
    password: &str,
    out: &mut W,
) -> Result<(), AppError> {
    let lands = app.lands().list(user).await?;
    let label = label_lands(&lands)
        .find(|(_, land)| land.id == land_id)
        .map_or_else(|| format!("land {land_id}"), |(label, _)| format!("{label} Land"));

    app.lands().delete(user, land_id, password).await?;
    writeln!(out, "{label} deleted.")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Advice
// ---------------------------------------------------------------------------

/// Crops suited to a soil and season, with yield and water need.
pub fn crops<W: Write>(app: &App, soil: SoilType, season: &str, out: &mut W) -> Result<(), AppError> {
    let engine = RecommendationEngine::new(&app.catalog);
    let names = engine.recommend_crops(soil.as_str(), season);
    if is_no_suitable_crops(&names) {
        for name in &names {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }

    writeln!(out, "Recommended crops for {soil} soil in {season}:")?;
    for name in &names {
        match engine.crop_info(name) {
            Some(crop) => writeln!(
                out,
                "• {name}: {:.2} t/ha, water need {}",
                crop.yield_per_hectare, crop.water_need
            )?,
            None => writeln!(out, "• {name}")?,
        }
    }
    Ok(())
}

/// Fertilizer recommendation for a crop.
pub fn fertilizer<W: Write>(app: &App, crop: &str, out: &mut W) -> Result<(), AppError> {
    match RecommendationEngine::new(&app.catalog).fertilizer_for(crop) {
        Some(profile) => writeln!(out, "{profile}")?,
        None => writeln!(out, "{NO_FERTILIZER_RECOMMENDATION}")?,
    }
    Ok(())
}

/// Irrigation method for a crop.
pub fn irrigation<W: Write>(crop: &str, water: WaterAvailability, out: &mut W) -> Result<(), AppError> {
    let method = RecommendationEngine::irrigation_for(crop, water);
    writeln!(out, "Irrigation for {crop} ({water} water): {method}")?;
    Ok(())
}

/// Identify a pest and show how to control it.
pub fn pest<W: Write>(app: &App, description: &str, out: &mut W) -> Result<(), AppError> {
    let engine = RecommendationEngine::new(&app.catalog);
    let name = engine.identify_pest(description);
    writeln!(out, "Identified: {name}")?;
    writeln!(out, "Control: {}", engine.control_for(name))?;
    Ok(())
}

/// Market price of one crop, or the whole price list.
pub fn price<W: Write>(app: &App, crop: Option<&str>, out: &mut W) -> Result<(), AppError> {
    let engine = RecommendationEngine::new(&app.catalog);
    match crop {
        Some(crop) => writeln!(out, "{crop}: {}", engine.price_for(crop))?,
        None => {
            for name in app.catalog.market().crops() {
                writeln!(out, "{name}: {}", engine.price_for(name))?;
            }
        }
    }
    Ok(())
}

/// The weather snapshot.
pub fn weather<W: Write>(out: &mut W) -> Result<(), AppError> {
    writeln!(out, "{}", WeatherSnapshot::current())?;
    Ok(())
}

/// Profit table for the crops the user's land can grow, best first.
pub async fn profit<W: Write>(app: &App, user: UserId, out: &mut W) -> Result<(), AppError> {
    let lands = app.lands().list(user).await?;
    if lands.is_empty() {
        writeln!(out, "No lands to analyze.")?;
        return Ok(());
    }

    let mut estimates = estimate(&lands, &app.catalog, app.catalog.market())?;
    if estimates.is_empty() {
        writeln!(out, "No matching crops for your soil.")?;
        return Ok(());
    }
    estimates.sort_by_key(|entry| Reverse(entry.profit));

    writeln!(out, "{:<20} {:>14}  Result", "Crop", "BDT")?;
    for entry in &estimates {
        let verdict = if entry.is_loss() { "loss" } else { "profit" };
        writeln!(
            out,
            "{:<20} {:>14}  {verdict}",
            entry.crop,
            format_thousands(entry.profit)
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

async fn report_content(app: &App, user: UserId) -> Result<ReportContent, AppError> {
    let owner = app.accounts().profile(user).await?;
    let lands = app.lands().list(user).await?;
    Ok(ReportContent::gather(&owner.name, Local::now(), lands, &app.catalog)?)
}

/// Write the crop table as CSV.
pub async fn report_csv<W: Write>(
    app: &App,
    user: UserId,
    out_path: Option<&Path>,
    out: &mut W,
) -> Result<(), AppError> {
    let content = report_content(app, user).await?;
    let path = out_path.map_or_else(
        || app.config.report.output_dir.join(content.file_name("csv")),
        Path::to_path_buf,
    );
    export_csv(&content, &path)?;
    info!(user_id = %user, path = %path.display(), "CSV report written");
    writeln!(out, "Report saved to {}", path.display())?;
    Ok(())
}

/// Render and save the PDF report.
pub async fn report_pdf<W: Write>(
    app: &App,
    user: UserId,
    out_dir: Option<PathBuf>,
    out: &mut W,
) -> Result<(), AppError> {
    let content = report_content(app, user).await?;
    let dir = out_dir.unwrap_or_else(|| app.config.report.output_dir.clone());
    let path = tokio::task::spawn_blocking(move || export_pdf(&content, &dir))
        .await
        .map_err(|e| AppError::Task(e.to_string()))??;
    writeln!(out, "Report saved to {}", path.display())?;
    Ok(())
}
