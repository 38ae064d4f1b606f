use chrono::NaiveDate;
use tracing::debug;

use super::SubdivisionTable;
use crate::ingest::ValidatedRecord;

/// Sentinel country code for region names absent from the reference table.
pub const UNKNOWN_COUNTRY: &str = "XXX";

/// A validated record with its region name rewritten to a country code.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecord {
    pub date: NaiveDate,
    pub country: String,
    pub impressions: u64,
    pub ctr: f64,
}

/// Resolve every record's region name against the reference table. Matching
/// is exact, case- and accent-sensitive string equality; misses get the
/// `XXX` sentinel. Strictly 1:1 and order-preserving, and never fails.
///
/// Duplicate display names in the table resolve to whichever entry came
/// first in table order; the table reports those collisions when it loads.
pub fn resolve(records: Vec<ValidatedRecord>, table: &SubdivisionTable) -> Vec<ResolvedRecord> {
    let mut unknown = 0usize;
    let resolved: Vec<ResolvedRecord> = records
        .into_iter()
        .map(|record| {
            let country = match table.lookup(&record.region) {
                Some(code) => code.to_string(),
                None => {
                    unknown += 1;
                    UNKNOWN_COUNTRY.to_string()
                }
            };
            ResolvedRecord {
                date: record.date,
                country,
                impressions: record.impressions,
                ctr: record.ctr,
            }
        })
        .collect();
    debug!(total = resolved.len(), unknown, "resolved region names");
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Subdivision;

    fn table() -> SubdivisionTable {
        SubdivisionTable::from_entries(vec![
            Subdivision {
                name: "California".to_string(),
                alpha3: "USA".to_string(),
            },
            Subdivision {
                name: "Ontario".to_string(),
                alpha3: "CAN".to_string(),
            },
        ])
    }

    fn record(region: &str) -> ValidatedRecord {
        ValidatedRecord {
            date: NaiveDate::from_ymd_opt(2021, 1, 5).unwrap(),
            region: region.to_string(),
            impressions: 10,
            ctr: 0.01,
        }
    }

    #[test]
    fn known_names_get_their_country_code() {
        let out = resolve(vec![record("Ontario"), record("California")], &table());
        assert_eq!(out[0].country, "CAN");
        assert_eq!(out[1].country, "USA");
    }

    #[test]
    fn unknown_names_get_the_sentinel() {
        let out = resolve(vec![record("Atlantis")], &table());
        assert_eq!(out[0].country, UNKNOWN_COUNTRY);
    }

    #[test]
    fn one_output_per_input_in_order() {
        let out = resolve(
            vec![record("Atlantis"), record("California"), record("Atlantis")],
            &table(),
        );
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].country, "XXX");
        assert_eq!(out[1].country, "USA");
        assert_eq!(out[2].country, "XXX");
        assert_eq!(out[1].impressions, 10);
    }

    #[test]
    fn empty_input_resolves_to_empty_output() {
        assert!(resolve(Vec::new(), &table()).is_empty());
    }
}
