use std::{io, net::TcpListener, path::PathBuf, time::Duration};

use actix_web::{dev::Server, guard, middleware::Logger, web, App, HttpServer};

use crate::handlers::{pages, submit};
use crate::models::MAX_FORM_SIZE;
use crate::relay::WsRelay;

/// What the HTTP front needs to know to serve pages and relay posts.
#[derive(Debug, Clone)]
pub struct FrontSettings {
    pub static_dir: PathBuf,
    pub endpoint_url: String,
    pub relay_timeout: Duration,
}

/// Routes of the HTTP front. Expects `Data<Pages>` and `Data<WsRelay>` to be
/// registered on the app.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_FORM_SIZE))
        .service(
            web::resource("/{tail:.*}")
                .guard(guard::Post())
                .to(submit::submit),
        )
        .service(web::resource("/").guard(guard::Get()).to(pages::index))
        .service(
            web::resource("/message.html")
                .guard(guard::Get())
                .to(pages::message_form),
        )
        .service(web::resource("/logo.png").guard(guard::Get()).to(pages::logo))
        .default_service(web::to(pages::not_found));
}

pub fn serve(listener: TcpListener, settings: FrontSettings) -> io::Result<Server> {
    log::info!(
        "HTTP server started on {}, relaying to {}",
        listener.local_addr()?,
        settings.endpoint_url
    );

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(pages::Pages::new(settings.static_dir.clone())))
            .app_data(web::Data::new(WsRelay::new(
                settings.endpoint_url.clone(),
                settings.relay_timeout,
            )))
            .configure(routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
