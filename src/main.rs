use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::error;

use crate::client::HttpClient;
use crate::config::Config;
use crate::controller::export_to_file;

mod card;
mod client;
mod common;
mod config;
mod controller;
mod date;
mod error;
mod export;
mod transaction;

/// Export all Starbucks card transactions of an account to CSV
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Account email or username
    email: String,

    /// Account password
    password: String,

    /// Config file, defaults to <config dir>/starbucks-export/config.toml
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Output CSV file, overrides the configured one
    #[clap(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli :Cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(output) = cli.output {
        config.output = output;
    }

    let client = HttpClient::new(&config.base_url, config.timeout())
        .context("unable to create http client")?;
    export_to_file(client, &config, &cli.email, &cli.password, &config.output)
        .context("export failed")?;

    Ok(())
}
