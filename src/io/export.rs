//! CSV export of the fetched asset table.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::assets::{EnergyAsset, classify_sector};

/// Column header for the asset CSV export.
const HEADER: [&str; 7] = [
    "id",
    "name",
    "type",
    "sector",
    "capacity_kw",
    "status",
    "created_at",
];

/// Exports assets to a CSV file at the given path.
///
/// # Arguments
///
/// * `assets` - Assets in table order
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(assets: &[EnergyAsset], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(assets, buf)
}

/// Writes assets as CSV to any writer.
///
/// One row per asset in input order. The `sector` column is empty for
/// unrecognized types; absent optional fields are written as empty cells.
/// Capacity is written at full precision.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(assets: &[EnergyAsset], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER)?;

    for a in assets {
        let sector = if a.asset_type.is_recognized() {
            classify_sector(a).as_str()
        } else {
            ""
        };
        wtr.write_record([
            a.id.clone(),
            a.name.clone(),
            a.asset_type.to_string(),
            sector.to_string(),
            a.capacity_kw.map(|c| c.to_string()).unwrap_or_default(),
            a.status.map(|s| s.as_str().to_string()).unwrap_or_default(),
            a.created_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
