//! Pattern extraction command line
//!
//! Loads an annotated corpus, extracts and counts every dependency
//! pattern, prints the two-node patterns as a table and writes the full
//! counted set to a delimited file.

use clap::Parser;
use depmine::{Format, extract_all, read_corpus, simple_pattern_table, tally, write_export};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "depmine")]
#[command(version, about = "Extract recurring syntactic patterns from an annotated news corpus")]
struct Cli {
    /// Annotated corpus (.xml, .json or .pkl), or "-" for standard input
    input: String,

    /// Output file for the counted pattern export
    output: PathBuf,

    /// Corpus format; required when reading from standard input,
    /// otherwise inferred from the input extension
    #[arg(short, long, value_name = "xml|json|pkl")]
    format: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let corpus = if cli.input == "-" {
        let format = match &cli.format {
            Some(name) => Format::from_name(name)?,
            None => return Err("reading from standard input requires --format".into()),
        };
        read_corpus(std::io::stdin().lock(), format)?
    } else {
        let path = PathBuf::from(&cli.input);
        let format = match &cli.format {
            Some(name) => Format::from_name(name)?,
            None => Format::from_path(&path)?,
        };
        read_corpus(BufReader::new(File::open(&path)?), format)?
    };

    let instances = extract_all(&corpus);
    let counts = tally(&instances);
    tracing::info!(instances = instances.len(), patterns = counts.len(), "extraction finished");

    print!("{}", simple_pattern_table(&counts));

    let mut writer = BufWriter::new(File::create(&cli.output)?);
    write_export(&counts, &mut writer)?;
    writer.flush()?;

    Ok(())
}
