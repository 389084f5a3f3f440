//! Error types for panel loading and dispatch.

use thiserror::Error;

/// A failure reported by the host bridge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("host call `{method}` failed: {message}")]
pub struct HostError {
    /// Name of the host API method that failed.
    pub method: String,
    pub message: String,
}

impl HostError {
    pub fn new(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while building or dispatching a module panel.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("malformed {what} payload: {source}")]
    Payload {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("table `{table}` has no column detail for `{column}`")]
    MissingColumnDetail { table: String, column: String },

    #[error("table `{table}` has no action detail for `{action}`")]
    MissingActionDetail { table: String, action: String },

    #[error("no table named `{0}`")]
    UnknownTable(String),

    #[error("table `{table}` has no row {row}")]
    RowOutOfRange { table: String, row: usize },

    #[error("action template `{template}`: {reason}")]
    Template { template: String, reason: String },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl PanelError {
    pub(crate) fn payload(what: &'static str, source: serde_json::Error) -> Self {
        PanelError::Payload { what, source }
    }

    pub(crate) fn template(template: &str, reason: impl Into<String>) -> Self {
        PanelError::Template {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = PanelError> = std::result::Result<T, E>;
