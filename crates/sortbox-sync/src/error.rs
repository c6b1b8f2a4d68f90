//! Error Types
//!
//! `FetchError` is what the gateway returns; `MutationError` is what the
//! orchestrator hands to the view, already display-ready.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Transport-level failure: the request never produced an HTTP response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Failure of a single gateway call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request failed: {status} - {message}")]
    Http { status: u16, message: String },

    /// The request was superseded or its session ended. Not a user-facing error.
    #[error("Request cancelled")]
    Cancelled,

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Empty response from {0}")]
    MissingBody(String),
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        FetchError::Transport(err.0)
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Field name -> message, the shape the form validator produces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for message in self.0.values() {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

/// Failure of a create/update/delete. Stores are untouched when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("{0}")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl MutationError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, MutationError::Fetch(FetchError::Cancelled))
    }
}

pub type MutationResult<T> = Result<T, MutationError>;
