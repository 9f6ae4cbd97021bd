//! hirelog CLI - bootstraps the three stores and reports their status
//!
//! Opens the stores fail-fast (any startup error is logged and the process
//! exits non-zero), prints per-store row counts, and closes the stores.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hirelog_core::{CandidatesDb, Stores, UsersDb, WorksDb};

/// Bootstrap the hirelog stores and report their status
#[derive(Parser, Debug)]
#[command(name = "hirelog", version, about)]
struct Cli {
    /// Print status as JSON
    #[arg(long)]
    json: bool,

    /// Use the per-user data directory instead of ./db
    #[arg(long, conflicts_with = "root")]
    data_dir: bool,

    /// Store root directory
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,
}

impl Cli {
    fn store_root(&self) -> PathBuf {
        if self.data_dir {
            hirelog_core::data_dir_root()
        } else {
            self.root
                .clone()
                .unwrap_or_else(|| PathBuf::from(hirelog_core::DEFAULT_ROOT))
        }
    }
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    log::info!("Starting hirelog v{}", env!("CARGO_PKG_VERSION"));

    let stores = match Stores::open(cli.store_root()) {
        Ok(stores) => stores,
        Err(e) => {
            log::error!("Failed to initialize stores: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let status = report(&stores, cli.json);
    let closed = stores.close();

    if let Err(e) = status {
        log::error!("Failed to read store status: {}", e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = closed {
        log::error!("Failed to close stores: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn report(stores: &Stores, json: bool) -> hirelog_core::Result<()> {
    let users = UsersDb::count(stores.users())?;
    let works = WorksDb::count(stores.works())?;
    let candidates = CandidatesDb::count(stores.candidates())?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "root": stores.root(),
                "users": users,
                "works": works,
                "candidates": candidates,
            })
        );
    } else {
        println!("store root: {}", stores.root().display());
        println!("users:      {}", users);
        println!("works:      {}", works);
        println!("candidates: {}", candidates);
    }
    Ok(())
}
