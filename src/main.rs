//! Command line front end: load a pedigree CSV, infer, and print posteriors.

use clap::{ArgAction, Parser, ValueEnum};
use heredity::prelude::*;
use heredity::report;
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Posterior gene copies and trait presence for everyone in a pedigree
#[derive(Parser, Debug)]
#[command(name = "heredity", version, about)]
struct Cli {
    /// CSV with name, mother, father, and trait columns
    data: PathBuf,

    /// JSON file overriding the standard probability tables
    #[arg(long, env = "HEREDITY_TABLES")]
    tables: Option<PathBuf>,

    /// Override the mutation rate
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("heredity={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut tables = match &cli.tables {
        Some(path) => ProbabilityTables::from_path(path)?,
        None => ProbabilityTables::default(),
    };
    if let Some(mutation_rate) = cli.mutation_rate {
        tables = tables.with_mutation_rate(mutation_rate);
    }

    let mut population = Population::new();
    population.observe(CsvBuilder::new().from_reader(Box::new(File::open(&cli.data)?))?)?;
    info!(individuals = population.len(), path = %cli.data.display(), "loaded population");

    let inference = population.infer(&tables)?;
    let rendered = match cli.format {
        OutputFormat::Text => report::render_text(&inference.posteriors),
        OutputFormat::Json => report::render_json(&inference.posteriors)? + "\n",
    };
    print!("{}", rendered);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
