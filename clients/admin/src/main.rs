mod account;
mod analytics;
mod error;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use crate::error::Error;
use vault::blocking::Vault;
use vault::Config;

#[derive(Debug, PartialEq, Eq, Parser)]
#[command(name = "vault-admin", version, about = "Subscription and revenue tooling for vault")]
pub struct Admin {
    /// Print machine readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Resolve a single account document
    ///
    /// FILE holds one account record as stored in the document database. The resolved view is
    /// what the apps gate paid features on.
    Resolve { file: PathBuf },

    /// List the accounts in an export with their resolved tier and status
    ListUsers {
        file: PathBuf,

        #[arg(short, long, value_enum)]
        filter: Option<AccountFilter>,
    },

    /// Recurring revenue from paying subscribers
    Revenue { file: PathBuf },

    /// Sign-up to paid conversion
    Funnel { file: PathBuf },

    /// Share of paying subscribers that lapsed back to the free tier
    Churn { file: PathBuf },

    /// Headcounts by status, tier and sign-up month
    Insights { file: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AccountFilter {
    Paying,
    Trialing,
    Pass,
    Lapsed,
    Lifetime,
    Free,
}

type Res<T> = Result<T, Error>;

fn main() {
    let admin = Admin::parse();

    let result = run(admin);

    if result.is_err() {
        std::process::exit(1);
    }
}

fn run(admin: Admin) -> Res<()> {
    let json = admin.json;

    match admin.command {
        Command::Resolve { file } => account::resolve_file(&file),
        Command::ListUsers { file, filter } => account::list(&load(&file)?, &file, filter, json),
        Command::Revenue { file } => analytics::revenue(&load(&file)?, json),
        Command::Funnel { file } => analytics::funnel(&load(&file)?, json),
        Command::Churn { file } => analytics::churn(&load(&file)?, json),
        Command::Insights { file } => analytics::insights(&load(&file)?, json),
    }
}

fn load(file: &Path) -> Res<Vault> {
    let vault = Vault::init(Config::cli_config("admin"))?;
    vault.import_accounts(file)?;
    Ok(vault)
}
