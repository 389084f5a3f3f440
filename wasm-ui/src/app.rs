//! Main application component.

use gloo::console;
use gloo::events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use module_panel::{
    CommandRegistry, NavEntry, PanelCommand, PanelSession, PanelView, ShellConfig, bootstrap,
    load_module, run_command,
};

use crate::bridge::PywebviewHost;
use crate::components::{ActionBar, DataTable, ErrorBanner, NavList};

fn show_alert(text: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(text);
    }
}

fn ask_confirm(question: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(question).ok())
        .unwrap_or(false)
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<ShellConfig>,
}

/// Main application component.
#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = props.config.clone();
    let host = use_memo(config.api_path.clone(), |path| PywebviewHost::new(path.clone()));
    let registry = use_memo((), |_| CommandRegistry::standard());
    let session: Rc<RefCell<PanelSession>> = use_mut_ref(PanelSession::new);

    let nav = use_state(Vec::<NavEntry>::new);
    let view = use_state(|| None::<Rc<PanelView>>);
    let error = use_state(|| None::<String>);

    let report = {
        let error = error.clone();
        Callback::from(move |message: String| {
            console::error!(message.clone());
            error.set(Some(message));
        })
    };

    let on_load = {
        let host = host.clone();
        let config = config.clone();
        let session = session.clone();
        let view = view.clone();
        let error = error.clone();
        let report = report.clone();
        Callback::from(move |module: String| {
            let host = host.clone();
            let config = config.clone();
            let session = session.clone();
            let view = view.clone();
            let error = error.clone();
            let report = report.clone();
            spawn_local(async move {
                match load_module(&*host, &session, &module, &config).await {
                    Ok(Some(panel)) => {
                        view.set(Some(Rc::new(panel)));
                        error.set(None);
                    }
                    Ok(None) => {}
                    Err(e) => report.emit(format!("Loading {module} failed: {e}")),
                }
            });
        })
    };

    let on_command = {
        let host = host.clone();
        let config = config.clone();
        let registry = registry.clone();
        let session = session.clone();
        let view = view.clone();
        let report = report.clone();
        Callback::from(move |cmd: PanelCommand| {
            let host = host.clone();
            let config = config.clone();
            let registry = registry.clone();
            let session = session.clone();
            let view = view.clone();
            let report = report.clone();
            spawn_local(async move {
                match run_command(&*host, &session, &registry, &cmd, &config, ask_confirm).await {
                    Ok(None) => {}
                    Ok(Some(completed)) => {
                        for text in &completed.alerts {
                            show_alert(text);
                        }
                        if let Some(panel) = completed.reloaded {
                            view.set(Some(Rc::new(panel)));
                        }
                    }
                    Err(e) => {
                        // The alert does not depend on the outcome
                        if let Some(text) = cmd.alert.as_deref() {
                            show_alert(text);
                        }
                        report.emit(format!("`{}` failed: {e}", cmd.command));
                    }
                }
            });
        })
    };

    let on_row_action = {
        let view = view.clone();
        let on_command = on_command.clone();
        let report = report.clone();
        move |table: String| {
            let view = view.clone();
            let on_command = on_command.clone();
            let report = report.clone();
            Callback::from(move |(row, action): (usize, String)| {
                let Some(panel) = (*view).clone() else {
                    return;
                };
                match panel.bind_row_action(&table, row, &action) {
                    Ok(cmd) => on_command.emit(cmd),
                    Err(e) => report.emit(e.to_string()),
                }
            })
        }
    };

    let on_dismiss = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    // Bootstrap once the host bridge is ready; pywebview signals this with
    // a window event, which may already have fired before the wasm loaded.
    {
        let host = host.clone();
        let nav = nav.clone();
        let report = report.clone();
        let ready_event = config.ready_event.clone();
        use_effect_with((), move |_| {
            let ready = host.is_ready();
            let start = move || {
                let host = host.clone();
                let nav = nav.clone();
                let report = report.clone();
                spawn_local(async move {
                    match bootstrap(&*host).await {
                        Ok(entries) => nav.set(entries),
                        Err(e) => report.emit(format!("Host initialisation failed: {e}")),
                    }
                });
            };

            let mut listener = None;
            if ready {
                start();
            } else if let Some(window) = web_sys::window() {
                listener = Some(EventListener::once(&window, ready_event, move |_| start()));
            }
            move || drop(listener)
        });
    }

    let active = session.borrow().current().map(str::to_string);

    html! {
        <div class="app">
            <nav class="sidebar">
                <NavList entries={(*nav).clone()} active={active} on_select={on_load} />
            </nav>

            <main id="module-settings" class="main">
                <ErrorBanner message={(*error).clone()} on_dismiss={on_dismiss} />
                if let Some(panel) = &*view {
                    <h1>{ &panel.module }</h1>
                    <ActionBar actions={panel.actions.clone()} on_command={on_command.clone()} />
                    { for panel.tables.iter().map(|table| html! {
                        <DataTable
                            key={table.name.clone()}
                            table={table.clone()}
                            on_action={on_row_action(table.name.clone())}
                        />
                    })}
                } else {
                    <p class="hint">{ "Select a module." }</p>
                }
            </main>
        </div>
    }
}
