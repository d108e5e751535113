use clap::Parser;
use tracing::info;

use config::Config;
use datamodel::Store;
use error::{Result, ServerError};
use server::{Library, make_app};

#[cfg(test)]
mod client;
mod config;
mod datamodel;
mod error;
mod logging;
mod server;


#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(config.verbose);

    if config.print_schema {
        println!("{}", Library::new(Store::default()).sdl());
        return Ok(());
    }

    let app = make_app(Store::seeded());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!("GraphQL running on {}", config.endpoint_url());
    axum::serve(listener, app).await?;
    Ok(())
}
