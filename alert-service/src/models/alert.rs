use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

/// Identifier for a registered alert recipient.
///
/// Callers may send either a JSON number or a JSON string; both forms
/// resolve against the registry by their canonical string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipientId {
    Int(i64),
    Str(String),
}

impl RecipientId {
    /// A blank id is rejected before any registry lookup: the integer 0 or
    /// a string that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            RecipientId::Int(id) => *id == 0,
            RecipientId::Str(id) => id.trim().is_empty(),
        }
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipientId::Int(id) => write!(f, "{}", id),
            RecipientId::Str(id) => write!(f, "{}", id),
        }
    }
}

/// Free-form report payload attached to an alert request.
///
/// Unknown fields are preserved so the original payload can be echoed to
/// the push provider unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PatientReport {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("Unknown")
    }

    pub fn symptoms_text(&self) -> &str {
        self.symptoms
            .as_deref()
            .filter(|symptoms| !symptoms.is_empty())
            .unwrap_or("No symptoms")
    }
}

/// The two kinds of alert the relay accepts. Each kind owns its envelope
/// construction rules: title, sound, body text, and the emergency flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Update,
    Emergency,
}

impl AlertKind {
    pub fn title(self) -> &'static str {
        match self {
            AlertKind::Update => "🩺 Patient Update",
            AlertKind::Emergency => "🚨 Emergency Alert",
        }
    }

    /// Sound asset name. The emergency sound file must ship with the
    /// recipient's mobile app.
    pub fn sound(self) -> &'static str {
        match self {
            AlertKind::Update => "default",
            AlertKind::Emergency => "emergency.wav",
        }
    }

    pub fn is_emergency(self) -> bool {
        matches!(self, AlertKind::Emergency)
    }

    pub fn body(self, report: &PatientReport) -> String {
        match self {
            AlertKind::Update => format!(
                "{} reported: {}",
                report.display_name(),
                report.symptoms_text()
            ),
            AlertKind::Emergency => {
                format!("{} needs **IMMEDIATE attention!**", report.display_name())
            }
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::Update => write!(f, "update"),
            AlertKind::Emergency => write!(f, "emergency"),
        }
    }
}

/// Message envelope submitted to the push delivery API. Built per request,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    pub to: String,
    pub sound: &'static str,
    pub priority: &'static str,
    pub title: &'static str,
    pub body: String,
    pub data: Value,
}

impl PushMessage {
    /// Builds the provider envelope for one alert. The request's report is
    /// echoed under `data.patient`; emergencies additionally set
    /// `data.emergency`.
    pub fn for_alert(token: String, kind: AlertKind, report: &PatientReport) -> Self {
        let mut data = json!({ "patient": report });
        if kind.is_emergency() {
            data["emergency"] = json!(true);
        }

        Self {
            to: token,
            sound: kind.sound(),
            priority: "high",
            title: kind.title(),
            body: kind.body(report),
            data,
        }
    }
}
