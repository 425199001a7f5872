use std::{io, path::PathBuf};

use actix_web::{http::StatusCode, web, HttpResponse};

use crate::error::FrontError;

const INDEX: &str = "index.html";
const MESSAGE_FORM: &str = "message.html";
const NOT_FOUND: &str = "error.html";
const LOGO: &str = "logo.png";

/// Directory the fixed pages are served from. Files are read on every request.
#[derive(Debug, Clone)]
pub struct Pages {
    dir: PathBuf,
}

impl Pages {
    pub fn new(dir: impl Into<PathBuf>) -> Pages {
        Pages { dir: dir.into() }
    }

    async fn read(&self, name: &'static str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.dir.join(name)).await
    }

    async fn html(&self, name: &'static str, status: StatusCode) -> Result<HttpResponse, FrontError> {
        let body = self
            .read(name)
            .await
            .map_err(|source| FrontError::Resource { name, source })?;
        Ok(HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body))
    }

    async fn not_found(&self) -> Result<HttpResponse, FrontError> {
        self.html(NOT_FOUND, StatusCode::NOT_FOUND).await
    }
}

pub async fn index(pages: web::Data<Pages>) -> Result<HttpResponse, FrontError> {
    pages.html(INDEX, StatusCode::OK).await
}

pub async fn message_form(pages: web::Data<Pages>) -> Result<HttpResponse, FrontError> {
    pages.html(MESSAGE_FORM, StatusCode::OK).await
}

pub async fn logo(pages: web::Data<Pages>) -> Result<HttpResponse, FrontError> {
    match pages.read(LOGO).await {
        Ok(bytes) => Ok(HttpResponse::Ok().content_type("image/png").body(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => pages.not_found().await,
        Err(source) => Err(FrontError::Resource { name: LOGO, source }),
    }
}

pub async fn not_found(pages: web::Data<Pages>) -> Result<HttpResponse, FrontError> {
    pages.not_found().await
}
