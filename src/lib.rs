pub mod config;
pub mod db;
pub mod endpoint;
pub mod error;
pub mod front;
pub mod handlers;
pub mod models;
pub mod relay;
pub mod store;
pub mod supervisor;
pub mod ws;
