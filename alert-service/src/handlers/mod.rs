pub mod alerts;
pub mod health;

pub use alerts::{send_emergency, send_update};
pub use health::{health_check, metrics_endpoint, readiness_check};
