
use actix_web::{http::header, web, HttpRequest, HttpResponse};

use crate::error::FrontError;
use crate::models::MessagePayload;
use crate::relay::WsRelay;

pub const CONFIRMATION: &str = "Message successfully sent!";

/// Accepts a form post on any path and relays it to the endpoint.
pub async fn submit(
    req: HttpRequest,
    body: web::Bytes,
    relay: web::Data<WsRelay>,
) -> Result<HttpResponse, FrontError> {
    content_length(&req)?;
    let payload = parse_form(&body)?;
    let frame = serde_json::to_string(&payload)?;

    relay.send(frame).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(CONFIRMATION))
}

fn content_length(req: &HttpRequest) -> Result<usize, FrontError> {
    req.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .ok_or(FrontError::ContentLength)
}

/// Blank values are dropped and the first remaining value of a key wins. The raw
/// body must be UTF-8; percent escapes that decode to invalid UTF-8 become U+FFFD.
fn parse_form(body: &[u8]) -> Result<MessagePayload, FrontError> {
    let body = std::str::from_utf8(body)?;
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body)?;
    let first = |key: &'static str| {
        pairs
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.clone())
            .ok_or(FrontError::MissingField(key))
    };

    Ok(MessagePayload {
        username: first("username")?,
        message: first("message")?,
    })
}
