//! The host API seam.
//!
//! The embedding runtime exposes four asynchronous procedures. Results are
//! handed over as raw JSON; decoding into descriptor types happens in the
//! session layer so every bridge stays a thin forwarder.

use serde_json::Value;

use crate::error::HostError;

/// Procedures exposed by the host process.
///
/// Futures returned here are driven on the UI thread and need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait HostApi {
    /// Prepare the host side connection. Called once, before anything else.
    async fn init(&self) -> Result<(), HostError>;

    /// Configurable modules, keyed by id (or as a plain list).
    async fn get_module_list(&self) -> Result<Value, HostError>;

    /// `{webview, module_data}` for one module.
    async fn get_module_webview(&self, module_name: &str) -> Result<Value, HostError>;

    /// Run an admin command. Resolves once the host has finished with it.
    async fn execute_command(&self, command: &str) -> Result<(), HostError>;
}
