use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::error::ConfigError;

/// Runtime settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub mongo_db: String,
    pub bind_addr: String,
    pub http_port: u16,
    pub ws_port: u16,
    /// Where the HTTP front relays submissions.
    pub endpoint_url: String,
    pub static_dir: PathBuf,
    pub relay_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let ws_port = parse_or(&lookup, "WS_PORT", 5000)?;
        let relay_secs: u64 = parse_or(&lookup, "RELAY_TIMEOUT_SECS", 10)?;

        Ok(Config {
            mongo_uri: lookup("MONGO_URI").unwrap_or_else(|| "mongodb://localhost:27017".to_owned()),
            mongo_db: lookup("MONGO_DB").unwrap_or_else(|| "message_db".to_owned()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_owned()),
            http_port: parse_or(&lookup, "HTTP_PORT", 3000)?,
            ws_port,
            endpoint_url: lookup("ENDPOINT_URL")
                .unwrap_or_else(|| format!("ws://localhost:{ws_port}")),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            relay_timeout: Duration::from_secs(relay_secs),
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
