//! Calendar source boundary.
//!
//! The pipeline only needs one capability from a calendar: enumerating
//! appointments in a window, with recurring series expanded into
//! individual occurrences. `AppointmentSource` captures that capability
//! so the pipeline can run against an in-memory fake in tests.
//!
//! The real implementation talks to external source binaries
//! (e.g. `notedir-source-outlook`) using JSON over stdin/stdout. The
//! protocol is language-agnostic: any executable that speaks it can be
//! a source. Sources manage their own credentials and platform setup;
//! the CLI just passes source-specific parameters from config.toml.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::appointment::Appointment;
use crate::date_range::DateRange;
use crate::error::{NoteDirError, NoteDirResult};
use crate::protocol::{Command, ListParams, Request, Response};

const SOURCE_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can enumerate appointments in a date window.
///
/// Implementations must return occurrences (recurring series expanded)
/// and should return them sorted ascending by start time; the pipeline
/// re-sorts defensively either way.
#[async_trait]
pub trait AppointmentSource {
    async fn list_appointments(&self, range: &DateRange) -> NoteDirResult<Vec<Appointment>>;
}

/// A client for communicating with a source subprocess.
///
/// Sources are discovered by looking for executables named
/// `notedir-source-{name}` in PATH.
pub struct SubprocessSource {
    name: String,
    params: serde_json::Map<String, serde_json::Value>,
    timeout: Duration,
}

impl SubprocessSource {
    pub fn new(name: &str, params: serde_json::Map<String, serde_json::Value>) -> Self {
        SubprocessSource {
            name: name.to_string(),
            params,
            timeout: SOURCE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn binary_path(&self) -> NoteDirResult<PathBuf> {
        let binary_name = format!("notedir-source-{}", self.name);
        which::which(&binary_name).map_err(|_| {
            NoteDirError::SourceNotInstalled(format!(
                "{}. Install it with:\n  cargo install {}",
                self.name, binary_name
            ))
        })
    }

    /// Send one command to the source binary and deserialize its reply.
    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> NoteDirResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| NoteDirError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| NoteDirError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;

        // kill_on_drop: a timed-out call drops the in-flight future, and
        // the hung source must not outlive it.
        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                NoteDirError::Connection(format!(
                    "Failed to spawn {}: {}",
                    binary_path.display(),
                    e
                ))
            })?;

        // Write request to stdin (unwrap safe: we piped stdin above)
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(NoteDirError::Connection(format!(
                "Source exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let response: Response<R> = serde_json::from_str(stdout.trim())
            .map_err(|e| NoteDirError::Query(format!("Invalid source response: {e}")))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(NoteDirError::Query(error)),
        }
    }
}

#[async_trait]
impl AppointmentSource for SubprocessSource {
    async fn list_appointments(&self, range: &DateRange) -> NoteDirResult<Vec<Appointment>> {
        let params = ListParams {
            from: range.from,
            to: range.to,
            expand_recurring: true,
            source: self.params.clone(),
        };

        timeout(
            self.timeout,
            self.call(Command::ListAppointments, params),
        )
        .await
        .map_err(|_| NoteDirError::SourceTimeout(self.timeout.as_secs()))?
    }
}
