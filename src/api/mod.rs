//! API module - HTTP routes, handlers, and models

pub mod assistant_handlers;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod proxy_handlers;
pub mod routes;
