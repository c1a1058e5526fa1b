//! need-cla CLI entry point.

use anyhow::Result;
use clap::Parser;

use need_cla::cli::commands::{check, rate_limit};
use need_cla::cli::{handle_error, Cli, Commands};
use need_cla::domain::models::Config;
use need_cla::infrastructure::config::ConfigLoader;
use need_cla::infrastructure::logging::LoggerImpl;

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(token) = &cli.token {
        config.github.token = Some(token.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };
    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Check(args) => check::execute(args, &config, cli.json).await,
        Commands::RateLimit(args) => rate_limit::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
