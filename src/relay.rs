use std::time::Duration;

use awc::ws::{CloseCode, CloseReason, Frame, Message};
use futures_util::{SinkExt as _, StreamExt as _};

use crate::error::RelayError;

/// Client side of the front-to-endpoint hop. Every [`send`](WsRelay::send) opens
/// its own connection and closes it again; nothing is retried.
pub struct WsRelay {
    client: awc::Client,
    url: String,
    timeout: Duration,
}

impl WsRelay {
    pub fn new(url: impl Into<String>, timeout: Duration) -> WsRelay {
        WsRelay {
            // `send` bounds the whole exchange, handshake included.
            client: awc::Client::builder().disable_timeout().finish(),
            url: url.into(),
            timeout,
        }
    }

    pub async fn send(&self, payload: String) -> Result<(), RelayError> {
        log::debug!("Relaying message to {}", self.url);
        tokio::time::timeout(self.timeout, self.exchange(payload))
            .await
            .map_err(|_| RelayError::Timeout(self.timeout))?
    }

    async fn exchange(&self, payload: String) -> Result<(), RelayError> {
        let (_, mut framed) = self
            .client
            .ws(self.url.as_str())
            .connect()
            .await
            .map_err(|err| RelayError::Connect {
                url: self.url.clone(),
                reason: err.to_string(),
            })?;

        framed.send(Message::Text(payload.into())).await?;
        framed
            .send(Message::Close(Some(CloseReason::from(CloseCode::Normal))))
            .await?;

        // The endpoint answers our close once it has handled every earlier frame.
        // Any other close code means it gave up on the message.
        while let Some(frame) = framed.next().await {
            if let Frame::Close(reason) = frame? {
                return match reason {
                    Some(reason) if reason.code != CloseCode::Normal => {
                        Err(RelayError::Rejected {
                            code: reason.code.into(),
                            description: reason.description.unwrap_or_default(),
                        })
                    }
                    _ => Ok(()),
                };
            }
        }

        Err(RelayError::Dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{net::TcpListener, sync::Arc};

    use actix_web::{web, App};

    use crate::endpoint;
    use crate::models::MAX_FRAME_SIZE;
    use crate::store::{MemoryStore, MessageStore};

    fn start_endpoint(store: &Arc<MemoryStore>) -> actix_test::TestServer {
        let store: Arc<dyn MessageStore> = store.clone();
        let data = web::Data::from(store);
        actix_test::start(move || App::new().app_data(data.clone()).configure(endpoint::routes))
    }

    fn payload(message: &str) -> String {
        serde_json::json!({ "username": "alice", "message": message }).to_string()
    }

    #[actix_web::test]
    async fn delivers_and_waits_for_the_insert() {
        let store = Arc::new(MemoryStore::new());
        let srv = start_endpoint(&store);
        let relay = WsRelay::new(format!("ws://{}/", srv.addr()), Duration::from_secs(5));

        relay.send(payload("hello")).await.unwrap();

        assert_eq!(store.messages()[0].message, "hello");
    }

    #[actix_web::test]
    async fn carries_frames_beyond_the_default_limit() {
        let store = Arc::new(MemoryStore::new());
        let srv = start_endpoint(&store);
        let relay = WsRelay::new(format!("ws://{}/", srv.addr()), Duration::from_secs(5));
        let text = "a".repeat(200_000);

        relay.send(payload(&text)).await.unwrap();

        assert_eq!(store.messages()[0].message.len(), 200_000);
    }

    #[actix_web::test]
    async fn oversized_frame_is_reported() {
        let store = Arc::new(MemoryStore::new());
        let srv = start_endpoint(&store);
        let relay = WsRelay::new(format!("ws://{}/", srv.addr()), Duration::from_secs(5));

        // Depending on timing the endpoint's 1009 close or the reset socket
        // surfaces first; either way the relay must not report success.
        let result = relay.send(payload(&"a".repeat(MAX_FRAME_SIZE + 1))).await;

        assert!(result.is_err());
        assert!(store.messages().is_empty());
    }

    #[actix_web::test]
    async fn rejected_frame_is_reported() {
        let store = Arc::new(MemoryStore::new());
        let srv = start_endpoint(&store);
        let relay = WsRelay::new(format!("ws://{}/", srv.addr()), Duration::from_secs(5));

        let err = relay.send("not json".to_owned()).await.unwrap_err();

        assert!(matches!(err, RelayError::Rejected { code: 1007, .. }), "{err}");
    }

    #[actix_web::test]
    async fn silent_peer_times_out() {
        // Accepted by the kernel backlog, never answered.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let relay = WsRelay::new(
            format!("ws://{}/", listener.local_addr().unwrap()),
            Duration::from_millis(300),
        );

        let err = relay.send(payload("hello")).await.unwrap_err();

        assert!(matches!(err, RelayError::Timeout(_)), "{err}");
    }
}
