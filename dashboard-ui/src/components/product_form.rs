use dioxus::prelude::*;
use shared_types::{DataType, ParameterDraft, Product};

use crate::actions;
use crate::api::HttpCatalogApi;
use crate::product_form::{FormMode, ParameterField, ProductForm, MAX_PARAMETER_COUNT, MIN_PARAMETER_COUNT};
use crate::router::Router;
use crate::sync::Liveness;

/// Create form when `product` is `None`, edit form otherwise.
#[component]
pub fn ProductFormView(
    product: Option<Product>,
    on_saved: EventHandler<Product>,
    on_cancel: EventHandler<()>,
) -> Element {
    let initial = product.clone();
    let mut form = use_signal(move || match &initial {
        Some(product) => ProductForm::edit(product),
        None => ProductForm::create(),
    });
    let mut hint = use_signal(|| None::<String>);
    let alive = use_hook(Liveness::new);

    {
        let alive = alive.clone();
        use_drop(move || alive.dispose());
    }

    let submit = {
        let alive = alive.clone();
        move |_| {
            let alive = alive.clone();
            spawn(async move {
                let api = HttpCatalogApi::new();
                if let Some(product) = actions::submit_product(&api, form, alive).await {
                    on_saved.call(product);
                }
            });
        }
    };

    let (mode, busy, name, count) = {
        let form = form.read();
        (
            form.mode(),
            form.is_busy(),
            form.product_name.clone(),
            form.parameter_count(),
        )
    };
    let is_create = mode == FormMode::Create;

    rsx! {
        div { class: "panel",
            label {
                "Product Name"
                input {
                    r#type: "text",
                    value: "{name}",
                    placeholder: "e.g. Widget",
                    required: true,
                    oninput: move |e| form.write().product_name = e.value(),
                }
            }
            if is_create {
                label {
                    "Number of Parameters"
                    input {
                        r#type: "number",
                        min: "{MIN_PARAMETER_COUNT}",
                        max: "{MAX_PARAMETER_COUNT}",
                        value: "{count}",
                        oninput: move |e| {
                            let result = ProductForm::parse_parameter_count(&e.value())
                                .and_then(|n| form.write().set_parameter_count(n));
                            hint.set(result.err().map(|err| err.to_string()));
                        },
                    }
                }
            }
            if let Some(text) = hint() {
                div { class: "hint", "{text}" }
            }
        }
        div { class: "panel",
            h3 { "Parameters" }
            for index in 0..count {
                ParameterRow { key: "{index}", form, index, alive: alive.clone() }
            }
            if is_create {
                div { class: "panel-actions",
                    button {
                        class: "secondary",
                        r#type: "button",
                        disabled: count >= MAX_PARAMETER_COUNT,
                        onclick: move |_| {
                            if let Err(err) = form.write().add_parameter_local() {
                                hint.set(Some(err.to_string()));
                            }
                        },
                        "Add Parameter"
                    }
                }
            } else {
                NewParameterRow { form, alive: alive.clone() }
            }
        }
        div { class: "panel-actions",
            button {
                r#type: "button",
                disabled: busy,
                onclick: submit,
                if is_create { "Create Product" } else { "Save Product" }
            }
            button {
                class: "secondary",
                r#type: "button",
                onclick: move |_| on_cancel.call(()),
                "Cancel"
            }
        }
    }
}

#[component]
fn DataTypeSelect(value: DataType, disabled: bool, on_change: EventHandler<String>) -> Element {
    rsx! {
        select {
            value: "{value}",
            disabled,
            onchange: move |e| on_change.call(e.value()),
            for data_type in DataType::ALL {
                option {
                    value: "{data_type}",
                    selected: data_type == value,
                    "{data_type}"
                }
            }
        }
    }
}

/// One parameter. In create mode the fields are always editable; in edit
/// mode they open with the row's Edit button and save straight to the server.
#[component]
fn ParameterRow(form: Signal<ProductForm>, index: usize, alive: Liveness) -> Element {
    let mut router = use_context::<Signal<Router>>();
    let mut form = form;

    let (parameter, is_create, editing, busy) = {
        let form = form.read();
        (
            form.parameters().get(index).cloned().unwrap_or_default(),
            form.mode() == FormMode::Create,
            form.editing_parameter_index() == Some(index),
            form.is_busy(),
        )
    };
    let ParameterDraft {
        parameter_name,
        data_type,
        range,
        ..
    } = parameter;
    let editable = is_create || editing;

    let mut edit = move |field: ParameterField, value: String| {
        if let Err(err) = form.write().edit_field(index, field, &value) {
            dioxus_logger::tracing::warn!("{err}");
        }
    };

    let save = {
        let alive = alive.clone();
        move |_| {
            let alive = alive.clone();
            spawn(async move {
                let api = HttpCatalogApi::new();
                if actions::update_parameter(&api, form, index, alive).await {
                    router.write().invalidate_catalog();
                }
            });
        }
    };

    let delete = move |_| {
        if is_create {
            if let Err(err) = form.write().delete_parameter_local(index) {
                dioxus_logger::tracing::warn!("{err}");
            }
            return;
        }
        let alive = alive.clone();
        spawn(async move {
            let api = HttpCatalogApi::new();
            if actions::delete_parameter(&api, form, index, alive).await {
                router.write().invalidate_catalog();
            }
        });
    };

    rsx! {
        div { class: "parameter-row",
            if editable {
                label {
                    "Parameter Name"
                    input {
                        r#type: "text",
                        value: "{parameter_name}",
                        required: true,
                        oninput: move |e| edit(ParameterField::Name, e.value()),
                    }
                }
                label {
                    "Data Type"
                    DataTypeSelect {
                        value: data_type,
                        disabled: false,
                        on_change: move |v| edit(ParameterField::DataType, v),
                    }
                }
                label {
                    "Range"
                    input {
                        r#type: "text",
                        value: "{range}",
                        placeholder: "e.g. 1-100",
                        oninput: move |e| edit(ParameterField::Range, e.value()),
                    }
                }
            } else {
                div { "{parameter_name}" }
                div { class: "product-meta", "{data_type}" }
                div { class: "product-meta", "{range}" }
            }
            div { class: "row-actions",
                if editing {
                    button { r#type: "button", disabled: busy, onclick: save, "Save" }
                    button {
                        class: "secondary",
                        r#type: "button",
                        onclick: move |_| form.write().cancel_editing(),
                        "Cancel"
                    }
                } else if !is_create {
                    button {
                        class: "secondary",
                        r#type: "button",
                        disabled: busy,
                        onclick: move |_| {
                            if let Err(err) = form.write().begin_editing(index) {
                                dioxus_logger::tracing::warn!("{err}");
                            }
                        },
                        "Edit"
                    }
                }
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

/// Edit mode: compose a parameter and add it on the server.
#[component]
fn NewParameterRow(form: Signal<ProductForm>, alive: Liveness) -> Element {
    let mut router = use_context::<Signal<Router>>();
    let mut form = form;

    let (pending, busy) = {
        let form = form.read();
        (form.pending().clone(), form.is_busy())
    };

    let mut edit = move |field: ParameterField, value: String| {
        if let Err(err) = form.write().edit_pending_field(field, &value) {
            dioxus_logger::tracing::warn!("{err}");
        }
    };

    let add = move |_| {
        let alive = alive.clone();
        spawn(async move {
            let api = HttpCatalogApi::new();
            if actions::add_parameter(&api, form, alive).await {
                router.write().invalidate_catalog();
            }
        });
    };

    rsx! {
        div { class: "parameter-row",
            label {
                "New Parameter"
                input {
                    r#type: "text",
                    value: "{pending.parameter_name}",
                    oninput: move |e| edit(ParameterField::Name, e.value()),
                }
            }
            label {
                "Data Type"
                DataTypeSelect {
                    value: pending.data_type,
                    disabled: false,
                    on_change: move |v| edit(ParameterField::DataType, v),
                }
            }
            label {
                "Range"
                input {
                    r#type: "text",
                    value: "{pending.range}",
                    oninput: move |e| edit(ParameterField::Range, e.value()),
                }
            }
            div { class: "row-actions",
                button {
                    r#type: "button",
                    disabled: busy || pending.parameter_name.trim().is_empty(),
                    onclick: add,
                    "Add Parameter"
                }
            }
        }
    }
}
