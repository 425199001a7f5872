use std::{io, net::TcpListener, sync::Arc};

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::handlers::ingest;
use crate::store::MessageStore;

/// Every path upgrades to an ingest session. Expects `Data<dyn MessageStore>` on
/// the app.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::to(ingest::start_session));
}

pub fn serve(listener: TcpListener, store: Arc<dyn MessageStore>) -> io::Result<Server> {
    log::info!("WebSocket server started on {}", listener.local_addr()?);

    let store = web::Data::from(store);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
