//! Infrastructure layer - adapters behind the player ports

pub mod config;
pub mod console;
pub mod http_client;
pub mod storage;
