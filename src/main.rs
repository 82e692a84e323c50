mod output;
mod parser;
mod records;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use parser::ParseConfig;

#[derive(Parser)]
#[command(
    name = "spelldump",
    about = "Turn a sourcebook's spell-section page dump into a TSV table"
)]
struct Cli {
    /// Source book label copied into every output row
    source_book: String,

    /// Page number seeding the page counter
    #[arg(short = 'p', long, default_value_t = 1)]
    start_page: u32,

    /// Spell names spread over multiple all-caps lines, school sometimes
    /// omitted (Spell Compendium layout)
    #[arg(short = 'm', long)]
    multiline_allcaps: bool,

    /// Read the page dump from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let lines = reader.lines().collect::<io::Result<Vec<_>>>()?;

    let config = ParseConfig {
        starting_page: cli.start_page,
        multiline_allcaps: cli.multiline_allcaps,
    };
    let outcome = parser::parse_lines(lines, &config);
    tracing::info!(
        spells = outcome.spells.len(),
        failures = outcome.failures.len(),
        "parse complete"
    );

    output::write_tsv(io::stdout().lock(), &outcome.spells, &cli.source_book)?;

    if !outcome.failures.is_empty() {
        eprintln!("Failed to make sense of the following entries:");
        for failure in &outcome.failures {
            eprintln!("{}", failure);
        }
    }

    Ok(())
}
