//! CLI tool to preview host payloads as plain text.
//!
//! Usage:
//!   panel-preview modules <modules.json>
//!   panel-preview view <view.json> [--module NAME]
//!   panel-preview bind <view.json> --table T --row N --action A

use clap::{Parser, Subcommand};
use module_panel::preview::{read_file, render_modules, render_view};
use module_panel::{ModuleList, ModuleView, PanelError, PanelView, ShellConfig};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Render module lists, module views and row-action commands from JSON files.
#[derive(Parser)]
#[command(name = "panel-preview")]
struct Cli {
    /// Shell configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print navigation entries in render order
    Modules {
        /// Response of get_module_list
        file: PathBuf,
    },
    /// Print the action bar and tables of a module
    View {
        /// Response of get_module_webview
        file: PathBuf,

        /// Module name shown in the heading
        #[arg(short, long, default_value = "module")]
        module: String,
    },
    /// Print the admin command a row action dispatches
    Bind {
        /// Response of get_module_webview
        file: PathBuf,

        #[arg(short, long, default_value = "module")]
        module: String,

        #[arg(short, long)]
        table: String,

        /// Zero-based row index
        #[arg(short, long)]
        row: usize,

        #[arg(short, long)]
        action: String,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<String, PanelError> {
    let config = match &cli.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };

    match cli.command {
        Command::Modules { file } => {
            let list = ModuleList::from_json(&read_file(&file)?)?;
            Ok(render_modules(&list))
        }
        Command::View { file, module } => {
            let view = ModuleView::from_json(&read_file(&file)?)?;
            let panel = PanelView::build(&module, view, &config)?;
            Ok(render_view(&panel))
        }
        Command::Bind {
            file,
            module,
            table,
            row,
            action,
        } => {
            let view = ModuleView::from_json(&read_file(&file)?)?;
            let panel = PanelView::build(&module, view, &config)?;
            let cmd = panel.bind_row_action(&table, row, &action)?;
            let mut out = cmd.command;
            if let Some(question) = cmd.confirm {
                out.push_str(&format!("\nconfirm: {question}"));
            }
            Ok(out)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(output) => {
            println!("{}", output.trim_end());
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
