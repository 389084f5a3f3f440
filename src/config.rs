//! Shell configuration.
//!
//! Every field has a default matching the pywebview configurator, so an
//! empty JSON object is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{PanelError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Window event fired once the host bridge is injected.
    pub ready_event: String,
    /// Property path from `window` to the host API object.
    pub api_path: Vec<String>,
    /// Id of the element the UI mounts into.
    pub root_id: String,
    pub true_label: String,
    pub false_label: String,
    /// Header of the row-action column.
    pub actions_header: String,
    /// Ask before dispatching a row action that declares `confirm` text.
    pub confirm_row_actions: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            ready_event: "pywebviewready".to_string(),
            api_path: vec!["pywebview".to_string(), "api".to_string()],
            root_id: "app".to_string(),
            true_label: "Yes".to_string(),
            false_label: "No".to_string(),
            actions_header: "Actions".to_string(),
            confirm_row_actions: true,
        }
    }
}

impl ShellConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| PanelError::payload("config", e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| PanelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Label for a boolean cell.
    pub fn bool_label(&self, value: bool) -> &str {
        if value {
            &self.true_label
        } else {
            &self.false_label
        }
    }
}
