use std::{io, net::TcpListener, sync::Arc};

use crate::config::Config;
use crate::front::{self, FrontSettings};
use crate::{db, endpoint};

/// Starts the HTTP front and the WebSocket endpoint side by side and returns once
/// both have stopped. Neither unit is restarted.
pub async fn run(config: Config) -> io::Result<()> {
    log::info!("Connecting to MongoDB at {}", config.mongo_uri);
    let store = db::connect(&config.mongo_uri, &config.mongo_db)
        .await
        .map_err(io::Error::other)?;

    let ws_listener = TcpListener::bind((config.bind_addr.as_str(), config.ws_port))?;
    let http_listener = TcpListener::bind((config.bind_addr.as_str(), config.http_port))?;

    let endpoint = endpoint::serve(ws_listener, Arc::new(store))?;
    let front = front::serve(
        http_listener,
        FrontSettings {
            static_dir: config.static_dir,
            endpoint_url: config.endpoint_url,
            relay_timeout: config.relay_timeout,
        },
    )?;

    let (front, endpoint) = tokio::join!(front, endpoint);
    if let Err(err) = &front {
        log::error!("HTTP server exited with error: {err}");
    }
    if let Err(err) = &endpoint {
        log::error!("WebSocket server exited with error: {err}");
    }
    front.and(endpoint)
}
