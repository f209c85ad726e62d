use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::schema::SeedRow;

/// Writes the accumulated seed rows as UTF-8 CSV with a single header row.
///
/// Parent directories are created as needed. Nothing is written until the
/// full run has completed; callers hold rows in memory until then.
pub fn write_seed_csv(path: &Path, rows: &[SeedRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
