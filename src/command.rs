//! Structured admin commands and the follow-up registry.
//!
//! The host accepts admin commands as text in the form
//! `<module> <trigger> [params]`: single spaces after the module and the
//! trigger, everything after that is the parameter text. Row actions are
//! bound into [`AdminCommand`] values so row data can only reach the
//! parameters; toolbar actions are forwarded exactly as declared.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::PanelError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCommand {
    pub module: String,
    pub trigger: String,
    pub params: String,
}

impl AdminCommand {
    pub fn new(
        module: impl Into<String>,
        trigger: impl Into<String>,
        params: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            trigger: trigger.into(),
            params: params.into(),
        }
    }
}

impl fmt::Display for AdminCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.module, self.trigger)?;
        if !self.params.is_empty() {
            write!(f, " {}", self.params)?;
        }
        Ok(())
    }
}

impl FromStr for AdminCommand {
    type Err = PanelError;

    /// Parse with the host's grammar. Parameters are kept verbatim, so
    /// `Display` gives back the input for every command the host accepts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, rest) = s.split_once(' ').unwrap_or((s, ""));
        let (trigger, params) = rest.split_once(' ').unwrap_or((rest, ""));

        if module.is_empty() || trigger.is_empty() {
            return Err(PanelError::template(s, "expected `<module> <trigger>`"));
        }
        Ok(AdminCommand::new(module, trigger, params))
    }
}

/// Where a command was issued from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// A button on the module action bar.
    Toolbar,
    /// An entry picked from a table row's action selector.
    RowAction,
}

/// A command ready to be dispatched, with the context needed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelCommand {
    pub kind: CommandKind,
    /// Text sent to the host.
    pub command: String,
    /// Alert text shown once the command has been sent.
    pub alert: Option<String>,
    /// Confirmation question asked before sending.
    pub confirm: Option<String>,
    /// Module whose view issued the command.
    pub origin: String,
}

impl PanelCommand {
    pub fn toolbar(command: impl Into<String>, alert: Option<String>, origin: &str) -> Self {
        Self {
            kind: CommandKind::Toolbar,
            command: command.into(),
            alert,
            confirm: None,
            origin: origin.to_string(),
        }
    }

    pub fn row_action(command: &AdminCommand, confirm: Option<String>, origin: &str) -> Self {
        Self {
            kind: CommandKind::RowAction,
            command: command.to_string(),
            alert: None,
            confirm,
            origin: origin.to_string(),
        }
    }
}

/// What the panel does after the host has run a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    ShowAlert(String),
    Reload(String),
}

type Handler = Box<dyn Fn(&PanelCommand) -> Vec<FollowUp>>;

/// Maps each command kind to the follow-ups it triggers.
pub struct CommandRegistry {
    handlers: HashMap<CommandKind, Handler>,
}

impl CommandRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Toolbar commands show their alert; row actions reload the module
    /// they were issued from.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(CommandKind::Toolbar, |cmd| {
            cmd.alert.iter().cloned().map(FollowUp::ShowAlert).collect()
        });
        registry.register(CommandKind::RowAction, |cmd| {
            vec![FollowUp::Reload(cmd.origin.clone())]
        });
        registry
    }

    pub fn register<F>(&mut self, kind: CommandKind, handler: F)
    where
        F: Fn(&PanelCommand) -> Vec<FollowUp> + 'static,
    {
        self.handlers.insert(kind, Box::new(handler));
    }

    /// Follow-ups for a completed command. Unregistered kinds have none.
    pub fn follow_ups(&self, cmd: &PanelCommand) -> Vec<FollowUp> {
        self.handlers
            .get(&cmd.kind)
            .map(|handler| handler(cmd))
            .unwrap_or_default()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
