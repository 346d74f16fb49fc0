//! Snippetbox server binary

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use snippetbox_core::logging_facility;
use snippetbox_core::{HtmlRenderer, SystemClock, TracingReporter};
use snippetbox_store::SqliteSnippetStore;
use snippetbox_web::{server, Application, Cli, Config, StaticFiles};

fn main() {
    let config = Config::from(Cli::parse());
    logging_facility::init(config.log_format.profile());

    if let Err(e) = run(config) {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> anyhow::Result<()> {
    let clock = Arc::new(SystemClock);
    let store = if config.is_in_memory() {
        SqliteSnippetStore::open_in_memory(clock)
    } else {
        SqliteSnippetStore::open(&config.dsn, clock)
    }
    .with_context(|| format!("failed to open database {}", config.dsn))?;
    store.ping().context("database did not answer")?;

    if !config.static_dir.is_dir() {
        tracing::warn!(
            static_dir = %config.static_dir.display(),
            "static directory not found; /static/ requests will 404"
        );
    }

    let app = Application::new(
        Arc::new(store),
        Arc::new(HtmlRenderer::default()),
        Arc::new(TracingReporter),
    )
    .with_static_files(StaticFiles::new(&config.static_dir));

    let handle = server::start(&config.addr, config.workers, Arc::new(app))
        .with_context(|| format!("failed to listen on {}", config.addr))?;

    tracing::info!(
        addr = %config.addr,
        workers = config.workers,
        "Starting server"
    );
    handle.join();
    Ok(())
}
