use dioxus::prelude::*;
use shared_types::Product;

use crate::actions;
use crate::api::HttpCatalogApi;
use crate::catalog::{Catalog, CatalogKind, NO_PRODUCTS};
use crate::router::Router;
use crate::sync::Liveness;

/// Product listing that re-fetches whenever the catalog is invalidated.
#[component]
pub fn ProductList(kind: CatalogKind, on_open: EventHandler<Product>) -> Element {
    let router = use_context::<Signal<Router>>();
    let catalog = use_signal(move || Catalog::new(kind));
    let alive = use_hook(Liveness::new);

    {
        let alive = alive.clone();
        use_drop(move || alive.dispose());
    }

    use_effect(move || {
        let generation = router.read().catalog_generation();
        if !catalog.peek().needs_refresh(generation) {
            return;
        }
        let alive = alive.clone();
        spawn(async move {
            actions::refresh_catalog(&HttpCatalogApi::new(), catalog, generation, alive).await;
        });
    });

    let (loading, empty, products) = {
        let catalog = catalog.read();
        (catalog.is_loading(), catalog.is_empty(), catalog.products().to_vec())
    };

    rsx! {
        div { class: "product-list",
            if loading {
                div { class: "loading", "Loading products..." }
            } else if empty {
                div { class: "empty-state", "{NO_PRODUCTS}" }
            } else {
                for (id, product) in products.into_iter().map(|p| (p.id, p)) {
                    ProductRow { key: "{id}", product, kind, on_open }
                }
            }
        }
    }
}

#[component]
fn ProductRow(product: Product, kind: CatalogKind, on_open: EventHandler<Product>) -> Element {
    let name = product.product_name.clone();
    let summary = match product.parameters.len() {
        0 => "No parameters".to_string(),
        1 => "1 parameter".to_string(),
        n => format!("{n} parameters"),
    };
    let parameter_names = product
        .parameters
        .iter()
        .map(|p| p.parameter_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    match kind {
        CatalogKind::Selectable => rsx! {
            div {
                class: "product-row selectable",
                onclick: move |_| on_open.call(product.clone()),
                div {
                    div { "{name}" }
                    div { class: "product-meta", "{summary}" }
                }
            }
        },
        CatalogKind::Editable => rsx! {
            div { class: "product-row",
                div {
                    div { "{name}" }
                    div { class: "product-meta", "{summary}: {parameter_names}" }
                }
                button {
                    r#type: "button",
                    onclick: move |_| on_open.call(product.clone()),
                    "Edit"
                }
            }
        },
    }
}
