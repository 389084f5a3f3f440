//! Plain-text rendering of panels for the `panel-preview` tool.

use std::fs;
use std::path::Path;

use crate::descriptor::ModuleList;
use crate::error::{PanelError, Result};
use crate::navigation::nav_entries;
use crate::view::{PanelView, TableView};

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| PanelError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// One line per navigation entry, in render order.
pub fn render_modules(list: &ModuleList) -> String {
    let entries = nav_entries(list);
    let key_width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|e| format!("{:<key_width$}  {}", e.key, e.module_name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_view(view: &PanelView) -> String {
    let mut out = format!("== {} ==\n", view.module);

    if !view.actions.is_empty() {
        let buttons: Vec<String> = view
            .actions
            .iter()
            .map(|a| format!("[{}]", a.title))
            .collect();
        out.push_str(&buttons.join(" "));
        out.push('\n');
    }

    for table in &view.tables {
        out.push('\n');
        out.push_str(&render_table(table));
    }
    out
}

fn render_table(table: &TableView) -> String {
    let action_names: Vec<&str> = table
        .action_options
        .iter()
        .filter(|o| !o.name.is_empty())
        .map(|o| o.name.as_str())
        .collect();
    let action_cell = action_names.join(", ");

    let mut lines: Vec<Vec<String>> = vec![table.headers.clone()];
    for row in &table.rows {
        let mut cells = row.cells.clone();
        if table.has_actions() {
            cells.push(action_cell.clone());
        }
        lines.push(cells);
    }

    let mut widths = vec![0; table.headers.len()];
    for line in &lines {
        for (i, cell) in line.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let format_line = |line: &[String]| {
        line.iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = format!("{} ({})\n", table.title, table.name);
    out.push_str(&format_line(lines[0].as_slice()));
    out.push('\n');
    let rule_len = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for line in &lines[1..] {
        out.push_str(&format_line(line.as_slice()));
        out.push('\n');
    }
    out
}
