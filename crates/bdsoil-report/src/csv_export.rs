//! Tabular crop report.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::content::ReportContent;
use crate::error::ReportError;

/// Column headers, in order.
pub const CSV_HEADERS: [&str; 5] = ["Crop", "Season", "Soil Type", "Yield (t/ha)", "Price (BDT/ton)"];

/// Write the crop table as CSV.
pub fn write_csv<W: Write>(content: &ReportContent, writer: W) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;
    for crop in &content.crops {
        wtr.write_record([
            crop.name.as_str(),
            crop.season.as_str(),
            crop.soil_type.as_str(),
            &format!("{:.2}", crop.yield_per_hectare),
            &content.market.price_text(&crop.name),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the crop table to a file.
pub fn export_csv(content: &ReportContent, path: &Path) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(content, file)?;
    info!(path = %path.display(), rows = content.crops.len(), "CSV report written");
    Ok(())
}
