//! Server configuration
//!
//! Every option can be given as a flag or an environment variable; a
//! `.env` file in the working directory is loaded first by the binary.

use std::path::PathBuf;

use clap::Parser;

use crate::api::websocket::broadcaster::DEFAULT_CAPACITY;
use crate::log_store::DEFAULT_MAX_MESSAGES;

#[derive(Debug, Clone, Parser)]
#[command(name = "chat-server", version, about = "Realtime chat server")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Origin allowed for cross-origin requests (`*` for any)
    #[arg(long, env = "CLIENT_ORIGIN", default_value = "http://localhost:3000")]
    pub client_origin: String,

    /// Snapshot file holding the message log
    #[arg(long, env = "DATA_FILE", default_value = "messages.json", value_name = "FILE")]
    pub data_file: PathBuf,

    /// Number of messages retained in the log
    #[arg(
        long,
        env = "MAX_MESSAGES",
        default_value_t = DEFAULT_MAX_MESSAGES,
        value_parser = parse_positive
    )]
    pub max_messages: usize,

    /// Events buffered per subscriber before it is reported as lagging
    #[arg(
        long,
        env = "BROADCAST_CAPACITY",
        default_value_t = DEFAULT_CAPACITY,
        value_parser = parse_positive
    )]
    pub broadcast_capacity: usize,
}

impl ServerConfig {
    /// `host:port` to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
