use anyhow::{Context, Result};
use csv::Writer;
use std::path::Path;

use super::SummaryRow;

/// Serialize summary rows to `path` as CSV: `date (YYYY-MM-DD), country
/// code, total impressions, total clicks`. No header, `\n` line endings,
/// UTF-8 without a byte-order mark. Creates or overwrites the destination;
/// a crash mid-write leaves a truncated file.
pub fn write_report(rows: &[SummaryRow], path: &Path) -> Result<()> {
    let mut wtr =
        Writer::from_path(path).with_context(|| format!("failed to create {}", path.display()))?;
    for row in rows {
        wtr.write_record(&[
            row.date.format("%Y-%m-%d").to_string(),
            row.country.clone(),
            row.impressions.to_string(),
            row.clicks.to_string(),
        ])
        .with_context(|| format!("failed to write {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn row(date: (i32, u32, u32), country: &str, impressions: u64, clicks: u64) -> SummaryRow {
        SummaryRow {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            country: country.to_string(),
            impressions,
            clicks,
        }
    }

    #[test]
    fn writes_one_plain_line_per_row() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        write_report(
            &[
                row((2021, 1, 5), "USA", 1500, 30),
                row((2021, 3, 2), "XXX", 10, 0),
            ],
            &path,
        )
        .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, b"2021-01-05,USA,1500,30\n2021-03-02,XXX,10,0\n");
    }

    #[test]
    fn empty_report_is_an_empty_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        write_report(&[], &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"");
    }

    #[test]
    fn overwrites_an_existing_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        std::fs::write(&path, "stale contents\n").unwrap();
        write_report(&[row((2021, 1, 5), "USA", 1, 0)], &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"2021-01-05,USA,1,0\n");
    }
}
