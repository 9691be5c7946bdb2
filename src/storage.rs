use crate::models::Row;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save rows as CSV with a `series_title,rating,genre` header.
pub fn save_csv<P: AsRef<Path>>(rows: &[Row], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save rows as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(rows: &[Row], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
