use dioxus::prelude::*;
use shared_types::{Product, ValueRow};

use crate::actions;
use crate::api::HttpCatalogApi;
use crate::router::Router;
use crate::sync::Liveness;
use crate::value_entry::{CellField, ValueEntryState};

#[component]
pub fn ValueEntryView(product: Product) -> Element {
    let router = use_context::<Signal<Router>>();
    let initial = product.clone();
    let mut state = use_signal(move || ValueEntryState::new(initial));
    let mut hint = use_signal(|| None::<String>);
    let alive = use_hook(Liveness::new);

    {
        let alive = alive.clone();
        use_drop(move || alive.dispose());
    }

    {
        let alive = alive.clone();
        use_effect(move || {
            let generation = router.read().catalog_generation();
            if !state.peek().needs_refresh(generation) {
                return;
            }
            let alive = alive.clone();
            spawn(async move {
                actions::refresh_values(&HttpCatalogApi::new(), state, generation, alive).await;
            });
        });
    }

    let save = {
        let alive = alive.clone();
        move |_| {
            let alive = alive.clone();
            let generation = router.peek().catalog_generation();
            spawn(async move {
                actions::save_value_row(&HttpCatalogApi::new(), state, generation, alive).await;
            });
        }
    };

    let (current, draft, rows, busy) = {
        let state = state.read();
        (
            state.product().cloned().unwrap_or(product),
            state.draft().cloned(),
            state.saved_rows().to_vec(),
            state.is_busy(),
        )
    };
    let headers: Vec<String> = current
        .parameters
        .iter()
        .map(|p| p.parameter_name.clone())
        .collect();

    rsx! {
        div { class: "panel",
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h3 { style: "margin: 0;", "Saved Values" }
                if draft.is_none() {
                    button {
                        r#type: "button",
                        onclick: move |_| {
                            let result = state.write().start_new_row();
                            hint.set(result.err().map(|err| err.to_string()));
                        },
                        "Add Values"
                    }
                }
            }
            if let Some(text) = hint() {
                div { class: "hint", "{text}" }
            }
            if rows.is_empty() {
                div { class: "empty-state", "No values saved yet" }
            } else {
                table {
                    thead {
                        tr {
                            th { "Name" }
                            for header in headers.iter() {
                                th { "{header}" }
                            }
                            th {}
                        }
                    }
                    tbody {
                        for (id, row) in rows.into_iter().map(|r| (r.id, r)) {
                            SavedRow {
                                key: "{id}",
                                row,
                                product: current.clone(),
                                state,
                                busy,
                                alive: alive.clone(),
                            }
                        }
                    }
                }
            }
        }
        if let Some(draft) = draft {
            div { class: "panel",
                h3 { "New Values" }
                label {
                    "Name"
                    input {
                        r#type: "text",
                        value: "{draft.name}",
                        required: true,
                        oninput: move |e| {
                            if let Err(err) = state.write().edit_cell(0, CellField::Name, &e.value()) {
                                dioxus_logger::tracing::warn!("{err}");
                            }
                        },
                    }
                }
                div { class: "value-form",
                    for (index, cell) in draft.cells.iter().enumerate() {
                        ValueInput {
                            key: "{cell.parameter_id}",
                            state,
                            index,
                            label: current
                                .parameter(cell.parameter_id)
                                .map(|p| p.parameter_name.clone())
                                .unwrap_or_default(),
                            placeholder: current
                                .parameter(cell.parameter_id)
                                .map(|p| p.range.clone())
                                .unwrap_or_default(),
                            value: cell.value.clone(),
                        }
                    }
                }
                div { class: "panel-actions",
                    button { r#type: "button", disabled: busy, onclick: save, "Save Values" }
                    button {
                        class: "secondary",
                        r#type: "button",
                        onclick: move |_| state.write().cancel_row(),
                        "Cancel"
                    }
                }
            }
        }
    }
}

#[component]
fn ValueInput(
    state: Signal<ValueEntryState>,
    index: usize,
    label: String,
    placeholder: String,
    value: String,
) -> Element {
    let mut state = state;
    rsx! {
        label {
            "{label}"
            input {
                r#type: "text",
                value: "{value}",
                placeholder: "{placeholder}",
                oninput: move |e| {
                    if let Err(err) = state.write().edit_cell(index, CellField::Value, &e.value()) {
                        dioxus_logger::tracing::warn!("{err}");
                    }
                },
            }
        }
    }
}

#[component]
fn SavedRow(
    row: ValueRow,
    product: Product,
    state: Signal<ValueEntryState>,
    busy: bool,
    alive: Liveness,
) -> Element {
    let router = use_context::<Signal<Router>>();
    let values: Vec<String> = product
        .parameters
        .iter()
        .map(|p| row.value_for(p.id).unwrap_or("").to_string())
        .collect();
    let value_id = row.id;

    let delete = move |_| {
        let alive = alive.clone();
        let generation = router.peek().catalog_generation();
        spawn(async move {
            actions::delete_value_row(&HttpCatalogApi::new(), state, value_id, generation, alive)
                .await;
        });
    };

    rsx! {
        tr {
            td { "{row.name}" }
            for value in values {
                td { "{value}" }
            }
            td {
                button {
                    class: "danger",
                    r#type: "button",
                    disabled: busy,
                    onclick: delete,
                    "Delete"
                }
            }
        }
    }
}
