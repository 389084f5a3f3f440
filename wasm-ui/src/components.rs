//! UI components for the module panel.

use module_panel::{ActionButton, NavEntry, PanelCommand, TableView};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

/// Navigation list with one entry per module.
#[derive(Properties, PartialEq)]
pub struct NavListProps {
    pub entries: Vec<NavEntry>,
    pub active: Option<String>,
    pub on_select: Callback<String>,
}

#[function_component(NavList)]
pub fn nav_list(props: &NavListProps) -> Html {
    html! {
        <ul id="module-nav" class="module-nav">
            { for props.entries.iter().map(|entry| {
                let name = entry.module_name.clone();
                let is_active = props.active.as_deref() == Some(name.as_str());
                let on_click = props.on_select.reform(move |_: MouseEvent| name.clone());
                html! {
                    <li key={entry.key.clone()} class={classes!("nav-entry", is_active.then_some("active"))}>
                        <button onclick={on_click}>{ &entry.module_name }</button>
                    </li>
                }
            })}
        </ul>
    }
}

/// Module action bar.
#[derive(Properties, PartialEq)]
pub struct ActionBarProps {
    pub actions: Vec<ActionButton>,
    pub on_command: Callback<PanelCommand>,
}

#[function_component(ActionBar)]
pub fn action_bar(props: &ActionBarProps) -> Html {
    if props.actions.is_empty() {
        return html! {};
    }

    html! {
        <div class="action-bar">
            { for props.actions.iter().map(|action| {
                let command = action.command.clone();
                let on_click = props.on_command.reform(move |_: MouseEvent| command.clone());
                html! {
                    <button class="action-button" onclick={on_click}>{ &action.title }</button>
                }
            })}
        </div>
    }
}

/// Map a selector value to the chosen action; the blank entry picks none.
pub fn chosen_action(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// One data table with an optional per-row action selector.
#[derive(Properties, PartialEq)]
pub struct DataTableProps {
    pub table: TableView,
    /// Emits `(row index, action name)`.
    pub on_action: Callback<(usize, String)>,
}

#[function_component(DataTable)]
pub fn data_table(props: &DataTableProps) -> Html {
    let table = &props.table;

    html! {
        <div class="panel table-panel" id={table.identifier.clone()}>
            <div class="panel-header">
                <h2>{ &table.title }</h2>
            </div>
            <table class="data-table">
                <thead>
                    <tr>
                        { for table.headers.iter().map(|h| html! { <th>{ h }</th> }) }
                    </tr>
                </thead>
                <tbody>
                    { for table.rows.iter().map(|row| {
                        let index = row.index;
                        let on_change = {
                            let on_action = props.on_action.clone();
                            Callback::from(move |e: Event| {
                                let select: HtmlSelectElement = e.target_unchecked_into();
                                let value = select.value();
                                // Back to the blank entry so the same action can be picked again
                                select.set_value("");
                                if let Some(action) = chosen_action(&value) {
                                    on_action.emit((index, action.to_string()));
                                }
                            })
                        };
                        html! {
                            <tr key={index}>
                                { for row.cells.iter().map(|cell| html! { <td>{ cell }</td> }) }
                                if table.has_actions() {
                                    <td>
                                        <select class="row-action" onchange={on_change}>
                                            { for table.action_options.iter().map(|option| html! {
                                                <option value={option.name.clone()}>{ &option.title }</option>
                                            })}
                                        </select>
                                    </td>
                                }
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}

/// Last error reported by the host or the renderer.
#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: Option<String>,
    pub on_dismiss: Callback<()>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    let Some(message) = &props.message else {
        return html! {};
    };
    let on_click = props.on_dismiss.reform(|_: MouseEvent| ());

    html! {
        <div class="error">
            <span>{ message }</span>
            <button class="dismiss" onclick={on_click}>{ "Dismiss" }</button>
        </div>
    }
}
