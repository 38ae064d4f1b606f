pub mod resolve;

pub use resolve::{resolve, ResolvedRecord, UNKNOWN_COUNTRY};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// One first-level administrative region and the alpha-3 code of the country
/// that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subdivision {
    pub name: String,
    pub alpha3: String,
}

/// Read-only reference table of subdivisions, loaded once per run. Source
/// order is preserved; when two entries share a display name, lookups return
/// the earlier one (and the collision is reported at load).
#[derive(Debug, Default)]
pub struct SubdivisionTable {
    entries: Vec<Subdivision>,
    by_name: HashMap<String, usize>,
}

impl SubdivisionTable {
    pub fn from_entries(entries: Vec<Subdivision>) -> Self {
        let mut by_name = HashMap::with_capacity(entries.len());
        for (idx, sub) in entries.iter().enumerate() {
            match by_name.entry(sub.name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
                Entry::Occupied(slot) => {
                    let first = &entries[*slot.get()];
                    if first.alpha3 != sub.alpha3 {
                        warn!(
                            name = %sub.name,
                            kept = %first.alpha3,
                            ignored = %sub.alpha3,
                            "ambiguous subdivision name, first entry wins"
                        );
                    }
                }
            }
        }
        Self { entries, by_name }
    }

    /// Load from a `.json` array of `{name, alpha3}` objects, or from a CSV
    /// of `name,alpha3` rows (a literal `name,alpha3` header is tolerated).
    /// Reference data is trusted input: any malformed entry is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let entries = if is_json {
            let file = File::open(path)
                .with_context(|| format!("failed to open subdivision table {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("invalid subdivision json in {}", path.display()))?
        } else {
            entries_from_csv(path)?
        };
        if entries.is_empty() {
            bail!("subdivision table {} has no entries", path.display());
        }
        info!(
            entries = entries.len(),
            "loaded subdivision table {}",
            path.display()
        );
        Ok(Self::from_entries(entries))
    }

    /// Exact, case-sensitive lookup of a region display name.
    pub fn lookup(&self, region: &str) -> Option<&str> {
        self.by_name
            .get(region)
            .map(|&idx| self.entries[idx].alpha3.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entries_from_csv(path: &Path) -> Result<Vec<Subdivision>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to open subdivision table {}", path.display()))?;
    let mut entries = Vec::new();
    for (idx, result) in rdr.deserialize::<Subdivision>().enumerate() {
        let sub = result
            .with_context(|| format!("invalid subdivision row {} in {}", idx, path.display()))?;
        if idx == 0 && sub.name == "name" && sub.alpha3 == "alpha3" {
            continue;
        }
        entries.push(sub);
    }
    Ok(entries)
}
