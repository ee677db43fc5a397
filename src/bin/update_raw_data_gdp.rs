use std::{error::Error, path::Path};

use clap::{Parser, ValueEnum};
use duckdb::AccessMode;
use gdp_staging::{
    config::GdpConfig,
    db::gdp::{forecast_output::ForecastOutput, job::GdpStagingJob},
};
use log::{error, info};
use tabled::{builder::Builder, settings::Style};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Environment name, e.g., test, prod
    #[arg(short, long, default_value = "prod")]
    env: String,

    /// Path to the GDP indicator CSV file
    #[arg(long)]
    csv: Option<String>,

    /// Path to the DuckDB database
    #[arg(long)]
    duckdb: Option<String>,

    /// The first line of the CSV file is data, not a header
    #[arg(long)]
    no_header: bool,

    /// How to print the non-zero forecasts
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

/// Make an ASCII table from the forecast rows
fn ascii_table(data: &ForecastOutput) -> tabled::Table {
    let mut builder = Builder::new();
    builder.push_record(data.columns.clone());
    for row in &data.rows {
        builder.push_record(
            row.values
                .iter()
                .map(|e| e.clone().unwrap_or_default())
                .collect::<Vec<String>>(),
        );
    }
    let mut table = builder.build();
    table.with(Style::sharp());
    table
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let env_file = format!(".env/{}.env", args.env);
    if Path::new(&env_file).exists() {
        dotenvy::from_path(Path::new(&env_file))?;
    } else {
        info!("no {} file, using defaults", env_file);
    }
    let config = GdpConfig::from_env()?.with_overrides(args.csv, args.duckdb, args.no_header);
    info!("{:?}", config);

    let job = GdpStagingJob {
        archive: config.archive(),
        forecast_output: config.forecast_output(),
        has_header: config.has_header,
    };
    let mut conn = job.archive.open(AccessMode::ReadWrite)?;
    let summary = match job.run(&mut conn) {
        Ok(summary) => summary,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    match args.format {
        Format::Table => println!("{}", ascii_table(&summary.forecasts)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&summary.forecasts)?),
    }

    Ok(())
}
