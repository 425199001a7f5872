pub mod ingest;
pub mod pages;
pub mod submit;
