use dioxus::prelude::*;

use crate::router::{Crumb, View};

#[component]
pub fn DashboardLayout(
    title: String,
    subtitle: String,
    crumbs: Vec<Crumb>,
    token_id: String,
    on_navigate: EventHandler<View>,
    on_logout: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        div { class: "dashboard",
            header { class: "dashboard-header",
                span {
                    class: "brand",
                    style: "cursor: pointer;",
                    onclick: move |_| on_navigate.call(View::Home),
                    "ProductFlow"
                }
                div { class: "user-box",
                    span { "{token_id}" }
                    button {
                        class: "secondary",
                        r#type: "button",
                        onclick: move |_| on_logout.call(()),
                        "Logout"
                    }
                }
            }
            main { class: "dashboard-main",
                nav { class: "breadcrumbs",
                    for (i, crumb) in crumbs.into_iter().enumerate() {
                        Breadcrumb { key: "{i}", crumb, first: i == 0, on_navigate }
                    }
                }
                h1 { class: "page-title", "{title}" }
                p { class: "page-subtitle", "{subtitle}" }
                {children}
            }
        }
    }
}

#[component]
fn Breadcrumb(crumb: Crumb, first: bool, on_navigate: EventHandler<View>) -> Element {
    let label = crumb.label.clone();
    let node = match crumb.target {
        Some(target) => rsx! {
            a { onclick: move |_| on_navigate.call(target.clone()), "{label}" }
        },
        None => rsx! {
            span { "{label}" }
        },
    };

    rsx! {
        if !first {
            span { "/" }
        }
        {node}
    }
}
