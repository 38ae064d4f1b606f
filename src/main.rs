use anyhow::{anyhow, Result};
use clap::Parser;
use encoding_rs::Encoding;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "adreport")]
#[command(about = "Aggregate a per-state advertising report into a per-country report")]
struct Args {
    /// Input CSV: date (MM/DD/YYYY), region name, impressions, CTR
    input: PathBuf,

    /// Subdivision reference table: CSV of `name,alpha3` rows, or a .json
    /// array of {name, alpha3} objects
    #[arg(short, long)]
    subdivisions: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "report_by_country.csv")]
    output: PathBuf,

    /// Force the input encoding (an encoding_rs label, e.g. "utf-16le");
    /// default is BOM sniffing, then strict UTF-8
    #[arg(short, long)]
    encoding: Option<String>,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let encoding = match &args.encoding {
        Some(label) => Some(
            Encoding::for_label(label.as_bytes())
                .ok_or_else(|| anyhow!("unknown encoding label: {label}"))?,
        ),
        None => None,
    };

    adreport::pipeline::run(&args.input, &args.subdivisions, &args.output, encoding)
}
