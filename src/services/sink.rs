use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Output files carry a run timestamp, e.g. `jobs_20250829_153000.csv`.
pub fn timestamped_path(directory: &str, prefix: &str, extension: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    Path::new(directory).join(format!("{}_{}.{}", prefix, stamp, extension))
}

/// Serialize records as CSV with a header row, UTF-8. One-shot batch write;
/// a failure mid-write leaves a truncated file.
pub fn write_csv<T: Serialize>(records: &[T], path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Serialize records as a pretty-printed JSON array, nested sub-mappings
/// preserved.
pub fn write_json<T: Serialize>(records: &[T], path: &Path) -> anyhow::Result<()> {
    let mut file = File::create(path)?;
    serde_json::to_writer_pretty(&mut file, records)?;
    file.write_all(b"\n")?;

    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
