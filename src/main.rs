use anyhow::Context;
use api::api::{start_server, ServerSettings};

#[macro_use]
extern crate diesel;

use clap::Parser;

mod api;
mod config;
mod models;
mod schema;

#[derive(Debug, Parser)]
#[clap(
    author,
    version,
    about,
    long_about = "Admin and user endpoints of the todo service"
)]
struct ServerArgs {
    /// Address to listen on, `API_URL` when omitted
    #[clap(short = 'b', long = "bind")]
    bind: Option<String>,

    /// Num of worker threads
    #[clap(short = 'w', long = "workers", default_value_t = 1)]
    workers: usize,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config::DEFAULT_LOG_FILTER),
    )
    .init();

    let args = ServerArgs::parse();

    let database_url = config::database_url().context("DATABASE_URL must be set")?;

    for name in config::secrets_using_defaults() {
        log::warn!("{} is not set, falling back to the development value", name);
    }

    start_server(ServerSettings {
        bind: args.bind.unwrap_or_else(|| config::API_URL.clone()),
        workers: args.workers,
        database_url,
    })?;

    Ok(())
}
