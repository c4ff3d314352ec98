use thiserror::Error;

use crate::core::types::EntityKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // ---- Data entry ---------------------------------------------------------
    /// Malformed time, day out of range, or an empty/inverted interval.
    #[error("Validation error: {0}")]
    Validation(String),

    // ---- Store --------------------------------------------------------------
    /// Storage failure while loading, creating or deleting.
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("No {kind} with id {id} exists.")]
    NotFound { kind: EntityKind, id: i32 },

    /// Replace-all save failed after the old rows were already removed.
    #[error(
        "Saved only {saved} of {intended} schedule(s) for course {course_id} ({reason}). Re-open the course and verify its schedule."
    )]
    PartialSave {
        course_id: i32,
        saved: usize,
        intended: usize,
        reason: String,
    },

    // ---- Config -------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    // ---- Prompt -------------------------------------------------------------
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    // ---- Plumbing -----------------------------------------------------------
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }
    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        Error::Persistence(msg.into())
    }
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
    pub fn not_found(kind: EntityKind, id: i32) -> Self {
        Error::NotFound { kind, id }
    }

    /// True for errors raised before any store mutation happened.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
