//! HTTP request handlers.

pub mod health;
pub mod webhook;

pub use health::{health_check, root_health};
pub use webhook::handle_webhook;
