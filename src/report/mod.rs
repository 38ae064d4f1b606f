pub mod write;

pub use write::write_report;

use chrono::NaiveDate;

use crate::geo::ResolvedRecord;

/// One output line: totals for a `(date, country)` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub date: NaiveDate,
    pub country: String,
    pub impressions: u64,
    pub clicks: u64,
}

/// An open aggregation group. Clicks accumulate as the real-valued expected
/// count (`impressions * ctr`) and are rounded once when the group closes.
struct Group {
    date: NaiveDate,
    country: String,
    impressions: u64,
    clicks: f64,
}

impl Group {
    fn open(record: &ResolvedRecord) -> Self {
        let mut group = Group {
            date: record.date,
            country: record.country.clone(),
            impressions: 0,
            clicks: 0.0,
        };
        group.fold(record);
        group
    }

    fn matches(&self, record: &ResolvedRecord) -> bool {
        self.date == record.date && self.country == record.country
    }

    fn fold(&mut self, record: &ResolvedRecord) {
        self.impressions += record.impressions;
        self.clicks += record.impressions as f64 * record.ctr;
    }

    fn close(self) -> SummaryRow {
        SummaryRow {
            date: self.date,
            country: self.country,
            impressions: self.impressions,
            // banker's rounding, once per group
            clicks: self.clicks.round_ties_even().max(0.0) as u64,
        }
    }
}

/// Stable-sort the records ascending by `(date, country)` and fold each run
/// of equal keys into one summary row. Empty input yields an empty report.
pub fn aggregate(mut records: Vec<ResolvedRecord>) -> Vec<SummaryRow> {
    records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.country.cmp(&b.country)));

    let mut rows = Vec::new();
    let mut open: Option<Group> = None;
    for record in &records {
        match open.as_mut() {
            Some(group) if group.matches(record) => group.fold(record),
            _ => {
                if let Some(done) = open.take() {
                    rows.push(done.close());
                }
                open = Some(Group::open(record));
            }
        }
    }
    if let Some(done) = open {
        rows.push(done.close());
    }
    rows
}
