//! Single-event iCalendar invitations.
//!
//! This crate builds one VCALENDAR/VEVENT with METHOD:REQUEST and renders it
//! to CRLF-terminated .ics text, ready to attach to an email:
//! - `InviteEvent` holds the event fields and renders them
//! - `ics` contains the escaping and line generation
//! - `uid` provides injectable sources for UID local parts
//! - `config` loads per-user defaults from TOML

pub mod config;
pub mod constants;
pub mod date;
pub mod error;
pub mod event;
pub mod ics;
pub mod uid;

pub use config::InviteDefaults;
pub use error::{DateField, InviteError, InviteResult, RequiredField};
pub use event::InviteEvent;
pub use uid::{CounterSource, FixedSource, UidSource, UuidSource};
