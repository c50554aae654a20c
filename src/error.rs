// Error types shared by the host boundary and the facade.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failure reported by the host when invoking a full-screen method.
///
/// Carried through untouched: `name` is the host's error class
/// (e.g. "TypeError", "NotAllowedError"), `message` its text.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{name}: {message}")]
pub struct HostError {
    pub name: String,
    pub message: String,
}

impl HostError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// The host refused the transition (no user gesture, permissions policy, ...)
    pub fn not_allowed(message: impl Into<String>) -> Self {
        Self::new("NotAllowedError", message)
    }

    /// The named member exists but is not callable, or does not exist at all.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new("TypeError", message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FullscreenError {
    /// The host rejected the request/exit call
    #[error(transparent)]
    Rejected(#[from] HostError),
    /// The host dropped the completion listener without ever firing it
    #[error("full-screen completion listener was discarded by the host before a change event")]
    Abandoned,
}
