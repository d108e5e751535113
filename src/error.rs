use std::net::SocketAddr;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Raised by the record store.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("No ids left for new {0}")]
    IdsExhausted(&'static str),
}

pub type Result<T> = std::result::Result<T, ServerError>;
