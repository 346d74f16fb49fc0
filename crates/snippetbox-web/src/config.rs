//! Command-line configuration
//!
//! Usage: snippetbox [--addr <ADDR>] [--dsn <DSN>] [--static-dir <DIR>]
//!                   [--workers <N>] [--log-format <pretty|json>]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use snippetbox_core::logging_facility::Profile;

/// Database path that selects a private in-memory database
pub const MEMORY_DSN: &str = ":memory:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    pub fn profile(self) -> Profile {
        match self {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "snippetbox")]
#[command(about = "Snippetbox - share short-lived text snippets", long_about = None)]
pub struct Cli {
    /// HTTP listen address
    #[arg(long, env = "SNIPPETBOX_ADDR", default_value = "127.0.0.1:4000")]
    pub addr: String,

    /// SQLite database file (":memory:" for a throwaway database)
    #[arg(long, env = "SNIPPETBOX_DSN", default_value = "snippetbox.db")]
    pub dsn: String,

    /// Directory served under /static/
    #[arg(long, env = "SNIPPETBOX_STATIC_DIR", default_value = "./ui/static")]
    pub static_dir: PathBuf,

    /// Number of request worker threads
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..=256))]
    pub workers: u16,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// Resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: String,
    pub dsn: String,
    pub static_dir: PathBuf,
    pub workers: usize,
    pub log_format: LogFormat,
}

impl Config {
    pub fn is_in_memory(&self) -> bool {
        self.dsn == MEMORY_DSN
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            addr: cli.addr,
            dsn: cli.dsn,
            static_dir: cli.static_dir,
            workers: usize::from(cli.workers),
            log_format: cli.log_format,
        }
    }
}
