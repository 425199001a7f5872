use std::time::Duration;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("could not connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("websocket send failed: {0}")]
    Send(#[from] awc::error::WsProtocolError),

    #[error("endpoint closed with code {code}: {description}")]
    Rejected { code: u16, description: String },

    #[error("endpoint dropped the connection without a close reply")]
    Dropped,

    #[error("relay timed out after {0:?}")]
    Timeout(Duration),
}

/// Failures on the HTTP front. None of them are recovered: each one turns the
/// request into a 500.
#[derive(Debug, thiserror::Error)]
pub enum FrontError {
    #[error("missing or invalid Content-Length header")]
    ContentLength,

    #[error("request body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("could not decode form: {0}")]
    Form(#[from] serde_urlencoded::de::Error),

    #[error("missing form field: {0}")]
    MissingField(&'static str),

    #[error("could not encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not read {name}: {source}")]
    Resource {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl ResponseError for FrontError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("Request failed: {self}");
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("malformed message frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),
}
