
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use crate::models::MAX_FRAME_SIZE;
use crate::store::MessageStore;
use crate::ws::IngestSession;

/// Upgrades any request to an ingest session, whatever its path.
pub async fn start_session(
    req: HttpRequest,
    stream: web::Payload,
    store: web::Data<dyn MessageStore>,
) -> Result<HttpResponse, Error> {
    let session = IngestSession::new(store.into_inner());
    ws::WsResponseBuilder::new(session, &req, stream)
        .frame_size(MAX_FRAME_SIZE)
        .start()
}
