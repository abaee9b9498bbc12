//! torego library root.
//! Exposes the CLI parser, the high-level run() function, and the reminder,
//! firing and notification-grouping logic.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands, OutputArgs};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        None => cli::commands::show::handle(&OutputArgs::default(), cfg),
        Some(Commands::Init) => cli::commands::init::handle(cli),
        Some(cmd @ Commands::Config { .. }) => cli::commands::config::handle(cmd, cfg),
        Some(cmd @ Commands::Db { .. }) => cli::commands::db::handle(cmd, cfg),
        Some(cmd @ Commands::Log { .. }) => cli::commands::log::handle(cmd, cfg),
        Some(cmd @ Commands::Remind { .. }) => cli::commands::remind::handle(cmd, cfg),
        Some(cmd @ Commands::Forget { .. }) => cli::commands::forget::handle(cmd, cfg),
        Some(cmd @ Commands::Edit { .. }) => cli::commands::edit::handle(cmd, cfg),
        Some(cmd @ Commands::List { .. }) => cli::commands::list::handle(cmd, cfg),
        Some(Commands::Checkout { output }) => cli::commands::checkout::handle(output, cfg),
        Some(Commands::Show { output }) => cli::commands::show::handle(output, cfg),
        Some(cmd @ Commands::Notify { .. }) => cli::commands::notify::handle(cmd, cfg),
        Some(cmd @ Commands::Dismiss { .. }) => cli::commands::dismiss::handle(cmd, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ command-line database override
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_db_path(custom_db)
            .to_string_lossy()
            .to_string();
    }

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
