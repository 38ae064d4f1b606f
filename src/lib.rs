pub mod geo;
pub mod ingest;
pub mod pipeline;
pub mod report;
