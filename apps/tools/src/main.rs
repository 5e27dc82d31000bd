use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use server_api::{select_circuit, sort_circuits, ApiContext};
use shared::{domain::SortKey, protocol::InfoPanel};
use storage::{parse_delimiter, CircuitStore};

#[derive(Parser, Debug)]
#[command(about = "Inspect the circuit data file offline")]
struct Cli {
    #[arg(long, default_value = "data/circuits.csv")]
    data: PathBuf,
    /// Field separator: one ASCII character, or `tab` / `\t`.
    #[arg(long, default_value = ",", value_parser = delimiter_arg)]
    delimiter: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the file and report how many circuits it holds.
    Validate,
    /// Circuit names in file order.
    List,
    Show {
        name: String,
    },
    /// Circuits in descending order of length, laps or turns.
    Sort {
        key: SortKey,
    },
}

fn delimiter_arg(raw: &str) -> std::result::Result<u8, String> {
    parse_delimiter(raw)
        .ok_or_else(|| format!("'{raw}' is not a single ASCII character, 'tab' or '\\t'"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = CircuitStore::open_with_delimiter(&cli.data, cli.delimiter)
        .with_context(|| format!("failed to load {}", cli.data.display()))?;
    let ctx = ApiContext {
        store,
        page_size: 10,
    };

    match cli.command {
        Command::Validate => {
            println!("{}: {} circuits", cli.data.display(), ctx.store.len());
        }
        Command::List => {
            for name in ctx.store.names() {
                println!("{name}");
            }
        }
        Command::Show { name } => match select_circuit(&ctx, Some(&name)).info {
            InfoPanel::Found(summary) => {
                println!("{}", summary.heading);
                println!("  length:      {} km", summary.length_km);
                println!("  laps:        {}", summary.laps);
                println!("  turns:       {}", summary.turns);
                println!("  lap record:  {}", summary.lap_record);
                println!("  last winner: {}", summary.last_winner);
            }
            InfoPanel::NotFound { message } => println!("{message}"),
        },
        Command::Sort { key } => {
            for record in sort_circuits(&ctx, key) {
                println!("{:>8}  {}", key.value(&record), record.name);
            }
        }
    }

    Ok(())
}
