use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

use sshcfg::cli::Cli;
use sshcfg::config::{AppConfig, ConfigManager};
use sshcfg::{commands, ConfigStore, Error, HostManager};

const LOG_ENV: &str = "SSHCFG_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_manager = ConfigManager::new()?;
    let app_config = config_manager.load_config()?;
    init_tracing(&app_config, cli.verbose)?;

    tracing::debug!("Settings file: {:?}", config_manager.get_config_path());

    let ssh_config_path = app_config.resolve_ssh_config(cli.file.as_deref())?;
    tracing::info!("SSH config path: {:?}", ssh_config_path);

    let manager = HostManager::new(ConfigStore::new(ssh_config_path));
    let mut stdout = io::stdout().lock();
    commands::execute(cli.command, &manager, &mut stdout)
}

fn init_tracing(config: &AppConfig, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    let builder = fmt().with_env_filter(filter).with_ansi(false).with_target(false);

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            builder.with_writer(file).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }

    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(Error::DuplicateHost(_)) => 3,
        Some(Error::Import { .. } | Error::MalformedImportLine { .. } | Error::Output(_)) => 5,
        _ => 1,
    }
}
