use std::{path::Path, process};

use clap::Parser;
use log::{error, info};

use lifelog::{App, Cli, Config, FileStore, JournalStorage, Result};

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn load_config(cli: &Cli, path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }

    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().or_else(Config::default_path);
    let config = load_config(&cli, config_path.as_deref())?;

    let store = FileStore::new(&config.data_dir);
    info!("Using data directory {}", store.data_dir().display());

    let storage = JournalStorage::new(store).with_pretty_json(config.pretty_json);
    let app = App::new(storage, config).with_config_path(config_path);

    app.run(cli.command)
}

fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
