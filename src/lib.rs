pub mod catalog;
pub mod cli;
pub mod clients;
pub mod config;
pub mod models;
pub mod parser;
pub mod services;
pub mod store;

use clap::{CommandFactory, Parser};
pub use config::Config;
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let args = cli::Cli::parse();

    match args.command {
        Some(cli::Commands::Import { file, handle }) => {
            cli::cmd_import(&config, file.as_deref(), handle.as_deref()).await
        }

        Some(cli::Commands::List) => cli::cmd_list(&config),

        Some(cli::Commands::Search { query }) => cli::cmd_search(&config, &query.join(" ")),

        Some(cli::Commands::Info { id }) => cli::cmd_info(&config, &id),

        Some(cli::Commands::Init) => cli::cmd_init(),

        None => {
            cli::Cli::command().print_help()?;
            Ok(())
        }
    }
}
