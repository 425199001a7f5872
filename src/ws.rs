
use std::sync::Arc;

use actix::prelude::*;
use actix_web_actors::ws;
use chrono::Local;
use uuid::Uuid;

use crate::error::EndpointError;
use crate::models::{ChatMessage, MessagePayload};
use crate::store::MessageStore;

/// One inbound endpoint connection. Every frame is parsed, stamped and handed to
/// the store; nothing is ever written back to the peer.
pub struct IngestSession {
    id: Uuid,
    store: Arc<dyn MessageStore>,
}

impl IngestSession {
    pub fn new(store: Arc<dyn MessageStore>) -> IngestSession {
        IngestSession {
            id: Uuid::new_v4(),
            store,
        }
    }

    fn ingest(&mut self, frame: &[u8], ctx: &mut ws::WebsocketContext<Self>) {
        let payload = match serde_json::from_slice::<MessagePayload>(frame) {
            Ok(payload) => payload,
            Err(err) => {
                let err = EndpointError::MalformedFrame(err);
                log::warn!("Closing session {}: {err}", self.id);
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Invalid,
                    description: Some(err.to_string()),
                }));
                ctx.stop();
                return;
            }
        };

        log::info!("Received message: {payload:?}");
        let message = ChatMessage::received(payload, Local::now());
        let store = self.store.clone();

        // Blocks the session's frame stream until the insert settles.
        ctx.wait(
            async move {
                let saved = message.clone();
                match store.insert(message).await {
                    Ok(()) => log::info!("Saved message: {saved:?}"),
                    Err(err) => log::error!("Failed to insert message: {err}"),
                }
            }
            .into_actor(self),
        );
    }
}

impl Actor for IngestSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, _: &mut Self::Context) {
        log::debug!("Session {} connected", self.id);
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        log::debug!("Session {} closed", self.id);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for IngestSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => self.ingest(text.as_bytes(), ctx),
            Ok(ws::Message::Binary(bytes)) => self.ingest(&bytes, ctx),
            Ok(ws::Message::Ping(bytes)) => ctx.pong(&bytes),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(err) => {
                log::warn!("Session {} protocol error: {err}", self.id);
                let code = match err {
                    ws::ProtocolError::Overflow => ws::CloseCode::Size,
                    _ => ws::CloseCode::Protocol,
                };
                ctx.close(Some(code.into()));
                ctx.stop();
            }
            _ => (),
        }
    }
}
