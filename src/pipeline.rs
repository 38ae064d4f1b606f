use anyhow::Result;
use encoding_rs::Encoding;
use std::path::Path;
use tracing::info;

use crate::geo::{self, SubdivisionTable};
use crate::ingest;
use crate::report;

/// Run the whole report: load and validate the input, resolve region names
/// to country codes, aggregate by `(date, country)`, write the result.
/// One input file in, one output file out; everything held in memory.
pub fn run(
    input: &Path,
    subdivisions: &Path,
    output: &Path,
    encoding: Option<&'static Encoding>,
) -> Result<()> {
    let table = SubdivisionTable::load(subdivisions)?;
    let records = ingest::load_report(input, encoding)?;
    let resolved = geo::resolve(records, &table);
    let rows = report::aggregate(resolved);
    report::write_report(&rows, output)?;
    info!(rows = rows.len(), "wrote {}", output.display());
    Ok(())
}
