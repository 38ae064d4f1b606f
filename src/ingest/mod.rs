mod decode;
pub mod repair;
mod validate;

pub use validate::{validate, Reject, ValidatedRecord};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use encoding_rs::Encoding;
use std::path::Path;
use tracing::{info, warn};

/// Load the raw advertising report at `path`: decode the bytes, parse CSV
/// rows (no header expected, any line endings), and validate each row.
/// Rejected rows are reported on the diagnostic channel and skipped; only a
/// stream-level failure (unreadable file, undecodable bytes, CSV-level parse
/// error) aborts the run.
pub fn load_report(
    path: &Path,
    encoding: Option<&'static Encoding>,
) -> Result<Vec<ValidatedRecord>> {
    let text = decode::read_to_string(path, encoding)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    let mut rejected = 0usize;
    for (idx, result) in rdr.records().enumerate() {
        let row = result
            .with_context(|| format!("csv parse error in {} at record {}", path.display(), idx))?;
        match validate(&row) {
            Ok(record) => records.push(record),
            Err(reason) => {
                rejected += 1;
                warn!(record = idx, %reason, row = %format_row(&row), "wrong format, row dropped");
            }
        }
    }
    info!(
        accepted = records.len(),
        rejected,
        "loaded report {}",
        path.display()
    );
    Ok(records)
}

fn format_row(row: &StringRecord) -> String {
    row.iter().collect::<Vec<_>>().join(",")
}
