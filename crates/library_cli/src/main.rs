//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `library_core` linkage against a real backing file.
//! - Print a one-screen summary of catalog state.
//!
//! Usage: `library_cli [config.json]`

use library_core::{BookCatalog, CheckoutLedger, LibraryConfig, UserDirectory};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => LibraryConfig::from_json_file(path)?,
        None => LibraryConfig::default(),
    };
    config.init_logging()?;

    let store = config.open_store()?;
    let books = BookCatalog::load(&store)?;
    let users = UserDirectory::load(&store)?;
    let ledger = CheckoutLedger::with_policy(&store, config.loan_policy()?)?;

    println!("library_core version={}", library_core::core_version());
    println!("data_file={}", store.path().display());
    println!(
        "books={} users={} checkouts={}",
        books.len(),
        users.len(),
        ledger.len()
    );
    for entry in ledger.overdue_report(library_core::local_now()) {
        println!("overdue: {entry}");
    }
    Ok(())
}
