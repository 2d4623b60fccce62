//! Infrastructure adapters for the outbound ports.

pub mod http_client;
pub mod platform;

pub mod testing;
