use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod commands;
pub mod core;
pub mod models;
pub mod platforms;
pub mod storage;

use crate::cli::{Cli, CliCommand};
use crate::core::pipeline::Pipeline;
use crate::models::settings::DownloadPathConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) {
    let settings = storage::config::load_or_init();
    let mut paths = match &cli.path {
        Some(dir) => DownloadPathConfig::new(dir.clone()),
        None => DownloadPathConfig::from(&settings.download),
    };

    let pipeline = match Pipeline::new(settings) {
        Ok(p) => p,
        Err(e) => {
            eprintln!(" Error: cannot set up HTTP client: {:#}", e);
            return;
        }
    };

    match cli.command {
        None | Some(CliCommand::Interactive) => {
            commands::interactive::run(&pipeline, &mut paths).await
        }
        Some(CliCommand::Info(arg)) => commands::download::print_info(&pipeline, &arg.url).await,
        Some(command) => {
            if let Some((platform, url)) = command.platform_target() {
                commands::download::download_url(&pipeline, url, Some(platform), &paths).await;
            }
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(cli));
    Ok(())
}
