mod bootstrap;
mod console;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use db::DbManager;
use db_view::{Dispatcher, Render, ViewOptions};
use ora_core::{ExplorerConfig, ProfileOverrides};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::console::StdConsole;

/// Interactive browser for the objects in an Oracle schema
#[derive(Parser, Debug)]
#[command(name = "ora-explorer", version, about)]
struct Args {
    /// Database host
    #[arg(long)]
    host: Option<String>,

    /// Listener port
    #[arg(long)]
    port: Option<u16>,

    /// Service name, e.g. FREEPDB1
    #[arg(long)]
    service: Option<String>,

    /// User to connect as
    #[arg(long, short)]
    user: Option<String>,

    /// Config file (default: <config dir>/ora-explorer/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> ProfileOverrides {
        ProfileOverrides {
            host: self.host.clone(),
            port: self.port,
            service_name: self.service.clone(),
            username: self.user.clone(),
        }
    }
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "fatal");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = ExplorerConfig::load(args.config.as_deref())?;
    let given = args.overrides();
    let profile = config.connection.clone().merge(given.clone());

    let mut console = StdConsole::new().context("Failed to open the terminal")?;
    console.print_line("Welcome to Oracle Metadata Explorer!");

    let credentials = bootstrap::gather_credentials(&mut console, profile, &given);
    info!(target_db = %credentials.connect_string(), user = %credentials.username, "connecting");

    let manager = DbManager::new();
    let session = match manager.open_session(credentials).await {
        Ok(session) => session,
        Err(e) => {
            console.print_line(&format!("Could not connect: {e}"));
            return Ok(ExitCode::FAILURE);
        }
    };
    console.print_line("Connected successfully!");

    let options = ViewOptions {
        default_width: config.display.default_width,
    };
    Dispatcher::new(session.plugin(), session.connection())
        .with_options(options)
        .run(&mut console)
        .await;

    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "disconnect failed");
    }
    console.print_line("Goodbye!");
    Ok(ExitCode::SUCCESS)
}
