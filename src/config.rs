use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

use crate::server::ENDPOINT;

pub const DEFAULT_PORT: u16 = 4000;

#[derive(Parser, Debug, Clone)]
#[command(name = "bookshelf")]
#[command(version, about = "A GraphQL API over in-memory authors and books")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interface to bind
    #[arg(long, env = "BOOKSHELF_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the schema in SDL form and exit
    #[arg(long)]
    pub print_schema: bool,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The URL clients reach the GraphQL endpoint on.
    pub fn endpoint_url(&self) -> String {
        format!("http://{}{ENDPOINT}", self.addr())
    }
}
