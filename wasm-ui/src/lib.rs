//! Web UI for module-panel
//!
//! A Yew front end rendered inside the configurator's pywebview window.
//! It talks to the Python side through `window.pywebview.api`.

mod app;
mod bridge;
mod components;

use module_panel::ShellConfig;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Entry point for the WASM application.
#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();

    let config = Rc::new(ShellConfig::default());
    let props = app::AppProps {
        config: config.clone(),
    };

    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(&config.root_id));
    match root {
        Some(root) => yew::Renderer::<app::App>::with_root_and_props(root, props).render(),
        None => yew::Renderer::<app::App>::with_props(props).render(),
    };
}
