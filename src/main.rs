#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use rich_bank::{
    account_store::{AccountStore, VecAccountStore},
    command_handler::CommandHandler,
    command_parser::iter_commands,
    csv_writer::write_accounts,
};

/// Replay a script of ledger commands (one JSON object per line) and print the resulting accounts
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Command script to replay, read from stdin when omitted
    input: Option<PathBuf>,

    /// Start with no accounts instead of the demo accounts of Alice and Bob
    #[arg(long)]
    empty: bool,
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = Args::parse();

    let store = if args.empty {
        VecAccountStore::new()
    } else {
        VecAccountStore::demo()
    };
    let mut handler = CommandHandler::new(store);

    let summary = match &args.input {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Cannot open input file {}", path.display()))?;
            handler.handle_commands(iter_commands(file))
        }
        None => handler.handle_commands(iter_commands(std::io::stdin())),
    };
    info!(
        "Processed {} commands ({} failed)",
        summary.succeeded + summary.failed,
        summary.failed
    );

    let mut stdout = Box::new(std::io::stdout());
    write_accounts(&mut stdout, handler.store().snapshot().into_iter())?;

    Ok(())
}
