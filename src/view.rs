//! Render model for a loaded module.
//!
//! [`PanelView::build`] turns a [`ModuleView`] into plain data (buttons,
//! header titles, cell text, row-action options) that both the browser UI
//! and the preview CLI draw without looking at the raw descriptor again.

use serde_json::Value;
use tracing::warn;

use crate::command::{AdminCommand, PanelCommand};
use crate::config::ShellConfig;
use crate::descriptor::{ColumnType, ModuleView, Row, RowActionDetail, TableSpec};
use crate::error::{PanelError, Result};
use crate::template::{ActionTemplate, RowContext};

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Text form of a JSON value as shown in a cell or substituted in a template.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cell text for a column of the given type.
pub fn cell_text(kind: &ColumnType, value: Option<&Value>, config: &ShellConfig) -> String {
    match kind {
        ColumnType::Boolean => config.bool_label(is_truthy(value)).to_string(),
        _ => value.map(value_text).unwrap_or_default(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionButton {
    pub title: String,
    pub command: PanelCommand,
}

/// One entry of a row's action selector.
#[derive(Debug, Clone, PartialEq)]
pub struct RowActionOption {
    /// Action name; empty for the blank default entry.
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub cells: Vec<String>,
    /// Index of the source record in the module data.
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub name: String,
    pub title: String,
    pub identifier: String,
    pub headers: Vec<String>,
    pub rows: Vec<RowView>,
    /// Selector entries, blank default first. Empty when the table has no
    /// row actions.
    pub action_options: Vec<RowActionOption>,
}

impl TableView {
    pub fn has_actions(&self) -> bool {
        !self.action_options.is_empty()
    }
}

/// Everything needed to draw one module.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub module: String,
    pub actions: Vec<ActionButton>,
    pub tables: Vec<TableView>,
    source: ModuleView,
}

impl PanelView {
    pub fn build(module: &str, source: ModuleView, config: &ShellConfig) -> Result<Self> {
        let actions = source
            .webview
            .actions
            .iter()
            .map(|spec| {
                if let Err(e) = spec.action.parse::<AdminCommand>() {
                    warn!(module, error = %e, "toolbar action is not an admin command");
                }
                ActionButton {
                    title: spec.title.clone(),
                    command: PanelCommand::toolbar(&spec.action, spec.alert.clone(), module),
                }
            })
            .collect();

        let tables = source
            .webview
            .tabular_data
            .iter()
            .map(|(name, spec)| build_table(name, spec, source.module_data.get(name), config))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            module: module.to_string(),
            actions,
            tables,
            source,
        })
    }

    pub fn table(&self, name: &str) -> Option<&TableView> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Bind a row action into a command for the given record.
    pub fn bind_row_action(&self, table: &str, row: usize, action: &str) -> Result<PanelCommand> {
        let spec = self
            .source
            .webview
            .tabular_data
            .get(table)
            .ok_or_else(|| PanelError::UnknownTable(table.to_string()))?;
        let record = self
            .source
            .module_data
            .get(table)
            .and_then(|rows| rows.get(row))
            .ok_or_else(|| PanelError::RowOutOfRange {
                table: table.to_string(),
                row,
            })?;
        let detail = action_detail(table, spec, action)?;

        let ctx = RowContext {
            row: record,
            attributes: &detail.attributes,
        };
        let command = ActionTemplate::parse(&detail.action).bind(&ctx)?;
        let confirm = detail
            .confirm
            .as_deref()
            .map(|text| ActionTemplate::parse(text).render(&ctx));

        Ok(PanelCommand::row_action(&command, confirm, &self.module))
    }
}

fn action_detail<'a>(table: &str, spec: &'a TableSpec, action: &str) -> Result<&'a RowActionDetail> {
    spec.action_detail
        .get(action)
        .ok_or_else(|| PanelError::MissingActionDetail {
            table: table.to_string(),
            action: action.to_string(),
        })
}

fn build_table(
    name: &str,
    spec: &TableSpec,
    data: Option<&Vec<Row>>,
    config: &ShellConfig,
) -> Result<TableView> {
    let columns = spec
        .columns
        .iter()
        .map(|column| {
            spec.column_detail
                .get(column)
                .map(|detail| (column.as_str(), detail))
                .ok_or_else(|| PanelError::MissingColumnDetail {
                    table: name.to_string(),
                    column: column.clone(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut headers: Vec<String> = columns.iter().map(|(_, d)| d.title.clone()).collect();

    let mut action_options = Vec::new();
    if let Some(row_actions) = &spec.row_actions {
        headers.push(config.actions_header.clone());
        action_options.push(RowActionOption {
            name: String::new(),
            title: String::new(),
        });
        for action in row_actions {
            let detail = action_detail(name, spec, action)?;
            action_options.push(RowActionOption {
                name: action.clone(),
                title: detail.title.clone(),
            });
        }
    }

    let records: &[Row] = match data {
        Some(records) => records.as_slice(),
        None => {
            warn!(table = name, "no module data for table");
            &[]
        }
    };

    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| RowView {
            cells: columns
                .iter()
                .map(|(column, detail)| cell_text(&detail.kind, record.get(*column), config))
                .collect(),
            index,
        })
        .collect();

    Ok(TableView {
        name: name.to_string(),
        title: spec.title.clone(),
        identifier: spec.identifier.clone(),
        headers,
        rows,
        action_options,
    })
}
