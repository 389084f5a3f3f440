//! Loading modules and dispatching commands against the host.
//!
//! The panel's only state is a [`PanelSession`]: which module is current and
//! a generation counter that lets late responses from superseded loads be
//! discarded. Callers own the session and pass it in explicitly, inside a
//! `RefCell` that is only borrowed between host calls, never across one.

use std::cell::RefCell;

use tracing::{debug, warn};

use crate::command::{CommandRegistry, FollowUp, PanelCommand};
use crate::config::ShellConfig;
use crate::descriptor::{ModuleList, ModuleView};
use crate::error::Result;
use crate::host::HostApi;
use crate::navigation::{NavEntry, nav_entries};
use crate::view::PanelView;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelSession {
    current: Option<String>,
    generation: u64,
}

/// Handle for one in-flight module load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub module: String,
    generation: u64,
}

impl PanelSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Module shown by the most recent completed load.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn begin_load(&mut self, module: &str) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            module: module.to_string(),
            generation: self.generation,
        }
    }

    /// True while no newer load has started.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Complete a load. Returns false if a newer load has started since.
    pub fn finish_load(&mut self, ticket: &LoadTicket) -> bool {
        if !self.is_current(ticket) {
            warn!(module = %ticket.module, "discarding stale module load");
            return false;
        }
        self.current = Some(ticket.module.clone());
        true
    }
}

/// Result of dispatching a [`PanelCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    /// The host ran the command; these follow-ups are due.
    Sent(Vec<FollowUp>),
}

/// What is left for the UI after a command and its follow-ups ran.
#[derive(Debug, Default, PartialEq)]
pub struct Completed {
    /// Alerts to show, in order.
    pub alerts: Vec<String>,
    /// The reloaded view; `None` when no reload was due or a newer load won.
    pub reloaded: Option<PanelView>,
}

/// Initialize the host and fetch the navigation entries.
pub async fn bootstrap<H: HostApi>(host: &H) -> Result<Vec<NavEntry>> {
    host.init().await?;
    let list = ModuleList::from_value(host.get_module_list().await?)?;
    debug!(modules = list.len(), "module list received");
    Ok(nav_entries(&list))
}

/// Fetch and build the view of one module without touching any session.
pub async fn fetch_view<H: HostApi>(
    host: &H,
    module: &str,
    config: &ShellConfig,
) -> Result<PanelView> {
    debug!(module, "loading module");
    let raw = host.get_module_webview(module).await?;
    PanelView::build(module, ModuleView::from_value(raw)?, config)
}

/// Load a module and make it current.
///
/// Returns `None` when a newer load superseded this one while it was in
/// flight. A superseded load that fails is discarded the same way.
pub async fn load_module<H: HostApi>(
    host: &H,
    session: &RefCell<PanelSession>,
    module: &str,
    config: &ShellConfig,
) -> Result<Option<PanelView>> {
    let ticket = session.borrow_mut().begin_load(module);
    match fetch_view(host, module, config).await {
        Ok(view) => Ok(session.borrow_mut().finish_load(&ticket).then_some(view)),
        Err(e) if session.borrow().is_current(&ticket) => Err(e),
        Err(e) => {
            warn!(module, error = %e, "discarding failed stale module load");
            Ok(None)
        }
    }
}

/// Forward a command to the host. Returns the alert to show afterwards.
pub async fn execute_command<H: HostApi>(
    host: &H,
    command: &str,
    alert: Option<&str>,
) -> Result<Option<String>> {
    debug!(command, "executing command");
    host.execute_command(command).await?;
    Ok(alert.map(str::to_string))
}

/// Dispatch a command, asking `confirm` first when it carries a question.
pub async fn dispatch<H, F>(
    host: &H,
    registry: &CommandRegistry,
    cmd: &PanelCommand,
    config: &ShellConfig,
    confirm: F,
) -> Result<Dispatched>
where
    H: HostApi,
    F: FnOnce(&str) -> bool,
{
    if config.confirm_row_actions
        && let Some(question) = cmd.confirm.as_deref()
        && !confirm(question)
    {
        debug!(command = %cmd.command, "command cancelled");
        return Ok(Dispatched::Cancelled);
    }
    execute_command(host, &cmd.command, None).await?;
    Ok(Dispatched::Sent(registry.follow_ups(cmd)))
}

/// Dispatch a command and carry out its follow-ups.
///
/// Reloads happen here; alerts are handed back for the caller to show.
/// Returns `None` if the user cancelled.
pub async fn run_command<H, F>(
    host: &H,
    session: &RefCell<PanelSession>,
    registry: &CommandRegistry,
    cmd: &PanelCommand,
    config: &ShellConfig,
    confirm: F,
) -> Result<Option<Completed>>
where
    H: HostApi,
    F: FnOnce(&str) -> bool,
{
    let follow_ups = match dispatch(host, registry, cmd, config, confirm).await? {
        Dispatched::Cancelled => return Ok(None),
        Dispatched::Sent(follow_ups) => follow_ups,
    };

    let mut completed = Completed::default();
    for follow_up in follow_ups {
        match follow_up {
            FollowUp::ShowAlert(text) => completed.alerts.push(text),
            FollowUp::Reload(module) => {
                completed.reloaded = load_module(host, session, &module, config).await?;
            }
        }
    }
    Ok(Some(completed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{HostError, PanelError};
    use crate::host::testing::RecordingHost;
    use futures::executor::block_on;
    use serde_json::{Value, json};

    fn timer_view(message: &str) -> Value {
        json!({
            "webview": {
                "actions": [{"action": "timer reload", "title": "Reload", "alert": "Reloaded"}],
                "tabular-data": {
                    "timers": {
                        "title": "Timers",
                        "identifier": "id",
                        "columns": ["id", "message"],
                        "column-detail": {
                            "id": {"title": "ID", "type": "int"},
                            "message": {"title": "Message", "type": "text"}
                        },
                        "row-actions": ["delete"],
                        "action-detail": {
                            "delete": {"action": "timer delete {id}", "title": "Delete",
                                       "confirm": "Delete timer {id}?"}
                        }
                    }
                }
            },
            "module_data": {"timers": [{"id": 42, "message": message}]}
        })
    }

    fn host() -> RecordingHost {
        RecordingHost::new(json!({
            "a": {"module_name": "Zeta"},
            "b": {"module_name": "Alpha"}
        }))
        .with_view("timer", timer_view("first"))
        .with_view("raffle", json!({"webview": {}}))
    }

    fn session() -> RefCell<PanelSession> {
        RefCell::new(PanelSession::new())
    }

    /// Starts a load of `raffle` while a view request is in flight.
    struct Interrupting<'a> {
        inner: RecordingHost,
        session: &'a RefCell<PanelSession>,
    }

    impl HostApi for Interrupting<'_> {
        async fn init(&self) -> Result<(), HostError> {
            self.inner.init().await
        }

        async fn get_module_list(&self) -> Result<Value, HostError> {
            self.inner.get_module_list().await
        }

        async fn get_module_webview(&self, module_name: &str) -> Result<Value, HostError> {
            self.session.borrow_mut().begin_load("raffle");
            self.inner.get_module_webview(module_name).await
        }

        async fn execute_command(&self, command: &str) -> Result<(), HostError> {
            self.inner.execute_command(command).await
        }
    }

    #[test]
    fn test_bootstrap_inits_then_lists() {
        let host = host();
        let nav = block_on(bootstrap(&host)).unwrap();
        let names: Vec<_> = nav.iter().map(|e| e.module_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
        assert_eq!(host.calls(), vec!["init", "get_module_list"]);
    }

    #[test]
    fn test_bootstrap_failure_is_reported() {
        let mut host = host();
        host.failing = vec!["init"];
        let err = block_on(bootstrap(&host)).unwrap_err();
        assert!(matches!(err, PanelError::Host(ref e) if e.method == "init"));
        assert_eq!(host.calls(), vec!["init"]);
    }

    #[test]
    fn test_load_sets_current_module() {
        let host = host();
        let session = session();
        assert_eq!(session.borrow().current(), None);

        let view = block_on(load_module(&host, &session, "timer", &ShellConfig::default()))
            .unwrap()
            .unwrap();
        assert_eq!(view.module, "timer");
        assert_eq!(session.borrow().current(), Some("timer"));
    }

    #[test]
    fn test_failed_load_keeps_current_module() {
        let host = host();
        let config = ShellConfig::default();
        let session = session();
        block_on(load_module(&host, &session, "timer", &config)).unwrap();

        let err = block_on(load_module(&host, &session, "missing", &config)).unwrap_err();
        assert!(matches!(err, PanelError::Host(_)));
        assert_eq!(session.borrow().current(), Some("timer"));
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut session = PanelSession::new();
        let slow = session.begin_load("timer");
        let fast = session.begin_load("raffle");
        assert!(!session.is_current(&slow));

        assert!(session.finish_load(&fast));
        assert!(!session.finish_load(&slow));
        assert_eq!(session.current(), Some("raffle"));
    }

    #[test]
    fn test_superseded_load_is_dropped() {
        let session = session();
        let host = Interrupting {
            inner: host(),
            session: &session,
        };
        let config = ShellConfig::default();

        let loaded = block_on(load_module(&host, &session, "timer", &config)).unwrap();
        assert!(loaded.is_none());
        assert_eq!(session.borrow().current(), None);

        // Failures of superseded loads are not reported either.
        let loaded = block_on(load_module(&host, &session, "missing", &config)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_execute_command_returns_alert() {
        let host = host();
        let alert = block_on(execute_command(&host, "timer reload", Some("Reloaded"))).unwrap();
        assert_eq!(alert.as_deref(), Some("Reloaded"));
        assert_eq!(host.calls(), vec!["execute_command timer reload"]);
    }

    #[test]
    fn test_toolbar_command_shows_alert() {
        let host = host();
        let config = ShellConfig::default();
        let session = session();
        let view = block_on(load_module(&host, &session, "timer", &config))
            .unwrap()
            .unwrap();

        let completed = block_on(run_command(
            &host,
            &session,
            &CommandRegistry::standard(),
            &view.actions[0].command,
            &config,
            |_| panic!("toolbar commands are not confirmed"),
        ))
        .unwrap()
        .unwrap();
        assert_eq!(completed.alerts, vec!["Reloaded"]);
        assert_eq!(completed.reloaded, None);
        assert_eq!(
            host.calls(),
            vec!["get_module_webview timer", "execute_command timer reload"]
        );
    }

    #[test]
    fn test_toolbar_text_is_sent_verbatim() {
        let host = host();
        let config = ShellConfig::default();
        let cmd = PanelCommand::toolbar("timer add  5m  hi ", None, "timer");

        let outcome = block_on(dispatch(&host, &CommandRegistry::standard(), &cmd, &config, |_| true))
            .unwrap();
        assert_eq!(outcome, Dispatched::Sent(vec![]));
        assert_eq!(host.calls(), vec!["execute_command timer add  5m  hi "]);
    }

    #[test]
    fn test_row_action_reloads_previous_module() {
        let host = host();
        let config = ShellConfig::default();
        let registry = CommandRegistry::standard();
        let session = session();

        let view = block_on(load_module(&host, &session, "timer", &config))
            .unwrap()
            .unwrap();
        let cmd = view.bind_row_action("timers", 0, "delete").unwrap();

        // The host changes the module's descriptor before the action runs.
        host.set_view("timer", timer_view("second"));

        let mut asked = None;
        let completed = block_on(run_command(&host, &session, &registry, &cmd, &config, |q| {
            asked = Some(q.to_string());
            true
        }))
        .unwrap()
        .unwrap();

        assert_eq!(asked.as_deref(), Some("Delete timer 42?"));
        assert!(completed.alerts.is_empty());
        let reloaded = completed.reloaded.unwrap();
        assert_eq!(reloaded.module, "timer");
        assert_eq!(reloaded.tables[0].rows[0].cells[1], "second");
        assert_eq!(session.borrow().current(), Some("timer"));
        assert_eq!(
            host.calls(),
            vec![
                "get_module_webview timer",
                "execute_command timer delete 42",
                "get_module_webview timer",
            ]
        );
    }

    #[test]
    fn test_row_action_cancelled() {
        let host = host();
        let config = ShellConfig::default();
        let session = session();
        let view = block_on(load_module(&host, &session, "timer", &config))
            .unwrap()
            .unwrap();
        let cmd = view.bind_row_action("timers", 0, "delete").unwrap();

        let completed = block_on(run_command(
            &host,
            &session,
            &CommandRegistry::standard(),
            &cmd,
            &config,
            |_| false,
        ))
        .unwrap();
        assert!(completed.is_none());
        assert_eq!(host.calls(), vec!["get_module_webview timer"]);
    }

    #[test]
    fn test_confirmation_can_be_disabled() {
        let host = host();
        let config = ShellConfig {
            confirm_row_actions: false,
            ..ShellConfig::default()
        };
        let view = block_on(fetch_view(&host, "timer", &config)).unwrap();
        let cmd = view.bind_row_action("timers", 0, "delete").unwrap();

        let outcome = block_on(dispatch(&host, &CommandRegistry::standard(), &cmd, &config, |_| {
            false
        }))
        .unwrap();
        assert_eq!(outcome, Dispatched::Sent(vec![FollowUp::Reload("timer".into())]));
    }

    #[test]
    fn test_failed_dispatch_skips_reload() {
        let mut host = host();
        host.failing = vec!["execute_command"];
        let config = ShellConfig::default();
        let session = session();
        let view = block_on(load_module(&host, &session, "timer", &config))
            .unwrap()
            .unwrap();
        let cmd = view.bind_row_action("timers", 0, "delete").unwrap();

        let err = block_on(run_command(
            &host,
            &session,
            &CommandRegistry::standard(),
            &cmd,
            &config,
            |_| true,
        ))
        .unwrap_err();
        assert!(matches!(err, PanelError::Host(_)));
        assert_eq!(host.calls().len(), 2);
    }
}
