use dioxus::prelude::*;

use super::layout::DashboardLayout;
use super::login::LoginView;
use super::product_form::ProductFormView;
use super::product_list::ProductList;
use super::styles::DASHBOARD_STYLES;
use super::value_entry::ValueEntryView;
use crate::catalog::CatalogKind;
use crate::router::{Router, View};
use crate::session::{Session, SessionGate};

/// Root component: login until a session exists, then the dashboard.
#[component]
pub fn App() -> Element {
    let mut gate = use_signal(SessionGate::default);
    let session = gate.read().session().cloned();

    let body = match session {
        Some(session) => rsx! {
            Dashboard {
                session,
                on_logout: move |_| gate.write().logout(),
            }
        },
        None => rsx! {
            LoginView { on_login: move |session| gate.write().sign_in(session) }
        },
    };

    rsx! {
        style { {DASHBOARD_STYLES} }
        {body}
    }
}

#[component]
pub fn Dashboard(session: Session, on_logout: EventHandler<()>) -> Element {
    let mut router = use_context_provider(|| Signal::new(Router::new()));
    let view = router.read().view().clone();

    let body = match view.clone() {
        View::Home => rsx! {
            HomePanel { on_navigate: move |v| router.write().navigate(v) }
        },
        View::Catalog => rsx! {
            div { class: "panel-actions", style: "margin: 0 0 1rem 0;",
                button {
                    r#type: "button",
                    onclick: move |_| router.write().navigate(View::CreateProduct),
                    "Create Product"
                }
            }
            ProductList {
                kind: CatalogKind::Selectable,
                on_open: move |product| router.write().product_selected(product),
            }
        },
        View::ManageCatalog => rsx! {
            ProductList {
                kind: CatalogKind::Editable,
                on_open: move |product| router.write().edit_product(product),
            }
        },
        View::CreateProduct => rsx! {
            ProductFormView {
                product: None,
                on_saved: move |product| router.write().product_created(product),
                on_cancel: move |_| router.write().back(),
            }
        },
        View::EditProduct(product) => {
            let id = product.id;
            rsx! {
                ProductFormView {
                    key: "{id}",
                    product: Some(product),
                    on_saved: move |product| router.write().product_updated(product),
                    on_cancel: move |_| router.write().back(),
                }
            }
        }
        View::ValueEntry(product) => {
            let id = product.id;
            rsx! {
                div {
                    key: "{id}",
                    class: "panel-actions",
                    style: "margin: 0 0 1rem 0;",
                    button {
                        class: "secondary",
                        r#type: "button",
                        onclick: move |_| router.write().back(),
                        "Back to Products"
                    }
                }
                ValueEntryView { product }
            }
        }
    };

    rsx! {
        DashboardLayout {
            title: view.title(&session.token_id),
            subtitle: view.subtitle().to_string(),
            crumbs: view.breadcrumbs(),
            token_id: session.token_id.clone(),
            on_navigate: move |v| router.write().navigate(v),
            on_logout,
            {body}
        }
    }
}

#[component]
fn HomePanel(on_navigate: EventHandler<View>) -> Element {
    rsx! {
        div { class: "home-grid",
            HomeCard {
                title: "Products",
                description: "Browse products and enter parameter values",
                target: View::Catalog,
                on_navigate,
            }
            HomeCard {
                title: "Create Product",
                description: "Define a new product and its parameters",
                target: View::CreateProduct,
                on_navigate,
            }
            HomeCard {
                title: "Edit Products",
                description: "Rename products and change their parameters",
                target: View::ManageCatalog,
                on_navigate,
            }
        }
    }
}

#[component]
fn HomeCard(
    title: &'static str,
    description: &'static str,
    target: View,
    on_navigate: EventHandler<View>,
) -> Element {
    rsx! {
        div {
            class: "panel home-card",
            onclick: move |_| on_navigate.call(target.clone()),
            h3 { "{title}" }
            p { class: "product-meta", "{description}" }
        }
    }
}
