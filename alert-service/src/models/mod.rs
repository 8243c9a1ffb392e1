pub mod alert;

pub use alert::{AlertKind, PatientReport, PushMessage, RecipientId};
