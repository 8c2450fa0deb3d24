//! Core types for the notedir ecosystem.
//!
//! This crate provides the types shared between notedir-cli and calendar
//! source binaries:
//! - `Appointment` and the `DateRange` it is fetched for
//! - `protocol` module for the CLI-source communication protocol
//! - the `AppointmentSource` trait and its subprocess client

pub mod appointment;
pub mod date_range;
pub mod error;
pub mod protocol;
pub mod source;

pub use appointment::Appointment;
pub use date_range::{DateRange, DEFAULT_WINDOW_DAYS};
pub use error::{NoteDirError, NoteDirResult};
pub use source::{AppointmentSource, SubprocessSource};
