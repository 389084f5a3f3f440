//! # module-panel
//!
//! Descriptor-driven module panels for a webview configurator shell.
//!
//! The host process (a chat bot with pluggable modules) describes each
//! configurable module as JSON: a bar of actions plus zero or more data
//! tables whose rows carry per-record actions. This crate turns those
//! descriptors into a render model and sends the resulting admin commands
//! back to the host.
//!
//! ## Overview
//!
//! - **Bootstrap**: initialize the host and list its modules
//!   ([`session::bootstrap`])
//! - **Module rendering**: fetch a module's descriptor and data and build a
//!   [`PanelView`] ([`session::load_module`])
//! - **Dispatch**: forward toolbar actions verbatim and row actions as bound
//!   [`AdminCommand`]s, then reload the module ([`session::run_command`])
//!
//! The browser front end lives in the `wasm-ui` crate; the host itself is
//! reached through the [`HostApi`] trait.
//!
//! ## Example
//!
//! ```
//! use module_panel::{ModuleView, PanelView, ShellConfig};
//!
//! let view = ModuleView::from_json(r#"{
//!     "webview": {"tabular-data": {"timers": {
//!         "title": "Timers",
//!         "identifier": "id",
//!         "columns": ["id", "enabled"],
//!         "column-detail": {
//!             "id": {"title": "ID", "type": "int"},
//!             "enabled": {"title": "Enabled", "type": "boolean"}
//!         },
//!         "row-actions": ["delete"],
//!         "action-detail": {"delete": {"action": "timer delete {id}", "title": "Delete"}}
//!     }}},
//!     "module_data": {"timers": [{"id": 42, "enabled": true}]}
//! }"#).unwrap();
//!
//! let panel = PanelView::build("timer", view, &ShellConfig::default()).unwrap();
//! assert_eq!(panel.tables[0].rows[0].cells, vec!["42", "Yes"]);
//!
//! let cmd = panel.bind_row_action("timers", 0, "delete").unwrap();
//! assert_eq!(cmd.command, "timer delete 42");
//! ```

pub mod command;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod navigation;
pub mod preview;
pub mod session;
pub mod template;
pub mod view;

pub use command::{AdminCommand, CommandKind, CommandRegistry, FollowUp, PanelCommand};
pub use config::ShellConfig;
pub use descriptor::{
    ActionSpec, ColumnDetail, ColumnType, ModuleData, ModuleEntry, ModuleList, ModuleView, Row,
    RowActionDetail, TableSpec, ViewDescriptor,
};
pub use error::{HostError, PanelError};
pub use host::HostApi;
pub use navigation::{NavEntry, nav_entries};
pub use session::{
    Completed, Dispatched, LoadTicket, PanelSession, bootstrap, dispatch, execute_command,
    fetch_view, load_module, run_command,
};
pub use template::{ActionTemplate, FieldSource, RowContext};
pub use view::{ActionButton, PanelView, RowActionOption, RowView, TableView};
