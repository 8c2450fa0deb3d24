//! Source protocol types.
//!
//! Defines the JSON protocol used for communication between notedir-cli
//! and calendar source binaries over stdin/stdout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Commands that sources must implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ListAppointments,
}

/// Request sent from CLI to source.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Parameters for `list_appointments`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListParams {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    /// Sources must expand recurring series into individual occurrences.
    pub expand_recurring: bool,
    /// Source-specific settings passed through from config.toml.
    #[serde(default)]
    pub source: serde_json::Map<String, serde_json::Value>,
}

/// Response sent from source to CLI.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            error: msg.to_string(),
        })
        .unwrap()
    }
}
