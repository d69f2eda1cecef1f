//! Error types for invitation building and rendering.

use std::fmt;

use thiserror::Error;

/// Fields that must be set before an invitation can be rendered.
///
/// Declaration order is the order in which validation reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Organizer,
    Start,
    End,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequiredField::Organizer => "organizer",
            RequiredField::Start => "start",
            RequiredField::End => "end",
        };
        f.write_str(name)
    }
}

/// The timestamp field a string was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Start => f.write_str("start"),
            DateField::End => f.write_str("end"),
        }
    }
}

/// Errors that can occur while building or rendering an invitation.
#[derive(Error, Debug)]
pub enum InviteError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(RequiredField),

    #[error("Organizer {} has no domain part", describe_organizer(.0))]
    InvalidOrganizer(Option<String>),

    #[error("Could not parse {field} date: \"{input}\"")]
    MalformedDate { field: DateField, input: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_organizer(organizer: &Option<String>) -> String {
    match organizer {
        Some(o) => format!("'{o}'"),
        None => "(unset)".to_string(),
    }
}

/// Result type alias for invitation operations.
pub type InviteResult<T> = Result<T, InviteError>;
