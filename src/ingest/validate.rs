use chrono::NaiveDate;
use csv::StringRecord;
use std::fmt;

use crate::ingest::repair::repair;

/// A report row that passed validation. Fields are well-typed and in range;
/// `ctr` is stored as a fraction in `[0, 1]` and `region` has already been
/// through text repair.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    pub date: NaiveDate,
    pub region: String,
    pub impressions: u64,
    pub ctr: f64,
}

/// Why a row was rejected. Advisory only; rejected rows are logged and
/// dropped, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reject {
    TooFewFields,
    BadDate,
    BadImpressions,
    BadCtr,
}

impl fmt::Display for Reject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Reject::TooFewFields => "fewer than 4 fields",
            Reject::BadDate => "date is not MM/DD/YYYY",
            Reject::BadImpressions => "impressions is not a non-negative integer",
            Reject::BadCtr => "CTR is not in range",
        };
        f.write_str(msg)
    }
}

/// Validate one raw row: `date (MM/DD/YYYY), region name, impressions, CTR`.
/// Missing fields, non-numeric numerics and range violations all collapse to
/// the same rejection path.
pub fn validate(row: &StringRecord) -> Result<ValidatedRecord, Reject> {
    if row.len() < 4 {
        return Err(Reject::TooFewFields);
    }
    let date =
        NaiveDate::parse_from_str(row[0].trim(), "%m/%d/%Y").map_err(|_| Reject::BadDate)?;
    let region = repair(row[1].trim());
    // u64 parse makes "-1" fail the same way "abc" does
    let impressions: u64 = row[2].trim().parse().map_err(|_| Reject::BadImpressions)?;
    let ctr = parse_ctr(row[3].trim()).ok_or(Reject::BadCtr)?;
    Ok(ValidatedRecord {
        date,
        region,
        impressions,
        ctr,
    })
}

/// Parse the CTR field into a fraction. A trailing `%` marks a percentage
/// (`"2.5%"` -> 0.025, range 0..=100); a bare number is already a fraction
/// (range 0..=1).
fn parse_ctr(raw: &str) -> Option<f64> {
    if let Some(pct) = raw.strip_suffix('%') {
        let value: f64 = pct.trim().parse().ok()?;
        if (0.0..=100.0).contains(&value) {
            Some(value / 100.0)
        } else {
            None
        }
    } else {
        let value: f64 = raw.parse().ok()?;
        if (0.0..=1.0).contains(&value) {
            Some(value)
        } else {
            None
        }
    }
}
