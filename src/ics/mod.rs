//! ICS text generation for invitations.
//!
//! Output follows a fixed subset of RFC 5545: one VCALENDAR holding one
//! VEVENT, CRLF line endings, no line folding.

mod escape;
mod generate;

pub use escape::escape_text;
pub use generate::{format_utc, generate_ics};

/// MIME type for attaching the rendered invitation to an email.
pub const CONTENT_TYPE: &str = "text/calendar; method=REQUEST; charset=UTF-8";
