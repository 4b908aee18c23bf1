// Adapters layer: wire formats and catalog sources wrapped around the core.

pub mod api;
pub mod catalog;
pub mod gateway;

#[cfg(feature = "server")]
pub mod http;
