//! Wire shapes of the host payloads.
//!
//! The host sends plain JSON. Key names follow the host's convention
//! (`tabular-data`, `column-detail`, ...), so most fields carry a serde
//! rename. Unknown keys are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::{PanelError, Result};

/// One data record: arbitrary key/value pairs.
pub type Row = Map<String, Value>;

/// Table name -> ordered rows.
pub type ModuleData = BTreeMap<String, Vec<Row>>;

/// A selectable panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub module_name: String,
}

/// Module list as returned by `get_module_list`.
///
/// The host either returns an object keyed by id or, straight from its
/// database layer, a list of rows. A list is keyed by position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ModuleList {
    Keyed(BTreeMap<String, ModuleEntry>),
    Rows(Vec<ModuleEntry>),
}

impl ModuleList {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| PanelError::payload("module list", e))
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| PanelError::payload("module list", e))
    }

    /// `(key, entry)` pairs in no particular order.
    pub fn entries(&self) -> Vec<(String, &ModuleEntry)> {
        match self {
            ModuleList::Keyed(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            ModuleList::Rows(rows) => rows
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ModuleList::Keyed(map) => map.len(),
            ModuleList::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A button on the module's action bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub action: String,
    pub title: String,
    /// Message shown after the action is dispatched.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub alert: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDetail {
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: ColumnType,
}

/// Declared type of a table column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    Boolean,
    #[default]
    Text,
    /// Any other declared type, kept verbatim and rendered as text.
    Other(String),
}

impl From<String> for ColumnType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "boolean" => ColumnType::Boolean,
            "text" => ColumnType::Text,
            _ => ColumnType::Other(s),
        }
    }
}

impl From<ColumnType> for String {
    fn from(t: ColumnType) -> Self {
        match t {
            ColumnType::Boolean => "boolean".to_string(),
            ColumnType::Text => "text".to_string(),
            ColumnType::Other(s) => s,
        }
    }
}

/// A row action as declared in `action-detail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowActionDetail {
    pub action: String,
    pub title: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub confirm: Option<String>,
    /// Remaining declared attributes, usable as template values.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub title: String,
    #[serde(default)]
    pub identifier: String,
    pub columns: Vec<String>,
    #[serde(rename = "column-detail")]
    pub column_detail: BTreeMap<String, ColumnDetail>,
    #[serde(rename = "row-actions", default)]
    pub row_actions: Option<Vec<String>>,
    #[serde(rename = "action-detail", default)]
    pub action_detail: BTreeMap<String, RowActionDetail>,
}

impl TableSpec {
    pub fn has_row_actions(&self) -> bool {
        self.row_actions.is_some()
    }
}

/// The `webview` half of a module view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewDescriptor {
    #[serde(default)]
    pub actions: Vec<ActionSpec>,
    #[serde(rename = "tabular-data", default)]
    pub tabular_data: BTreeMap<String, TableSpec>,
}

/// Response of `get_module_webview`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModuleView {
    #[serde(default)]
    pub webview: ViewDescriptor,
    #[serde(default)]
    pub module_data: ModuleData,
}

impl ModuleView {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| PanelError::payload("module view", e))
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| PanelError::payload("module view", e))
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
