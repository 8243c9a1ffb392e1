pub mod metrics;
pub mod tracing;

pub use self::metrics::track_requests;
pub use self::tracing::{REQUEST_ID_HEADER, request_id_middleware};
