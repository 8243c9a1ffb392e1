pub mod dispatch;
pub mod metrics;
pub mod providers;
pub mod registry;

pub use dispatch::AlertDispatcher;
pub use metrics::{get_metrics, init_metrics, record_dispatch, record_provider_call};
pub use providers::{ExpoPushProvider, MockPushProvider, ProviderError, PushProvider};
pub use registry::RecipientRegistry;
