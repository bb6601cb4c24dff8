use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::actions;
use crate::api::HttpCatalogApi;
use crate::session::{LoginForm, Session};
use crate::sync::Liveness;

/// Pause on the success message before entering the dashboard.
const ENTER_DELAY_MS: u32 = 1_000;

#[component]
pub fn LoginView(on_login: EventHandler<Session>) -> Element {
    let mut form = use_signal(LoginForm::new);
    let mut hint = use_signal(|| None::<String>);
    let alive = use_hook(Liveness::new);

    {
        let alive = alive.clone();
        use_drop(move || alive.dispose());
    }

    let submit = move |_| {
        let alive = alive.clone();
        spawn(async move {
            let api = HttpCatalogApi::new();
            match actions::login(&api, form, alive.clone()).await {
                Ok(Some(session)) => {
                    hint.set(None);
                    TimeoutFuture::new(ENTER_DELAY_MS).await;
                    if alive.is_alive() {
                        on_login.call(session);
                    }
                }
                Ok(None) => {}
                Err(err) => hint.set(Some(err.to_string())),
            }
        });
    };

    let submitting = form.read().is_submitting();
    let locked = form.read().is_locked();
    let message = form.read().message().cloned();
    let token_id = form.read().token_id.clone();
    let password = form.read().password.clone();

    rsx! {
        div { class: "login-page",
            div { class: "login-card",
                h1 { "ProductFlow" }
                p { class: "hint", "Sign in with your token ID" }
                label {
                    "Token ID"
                    input {
                        r#type: "text",
                        value: "{token_id}",
                        required: true,
                        disabled: locked,
                        oninput: move |e| form.write().token_id = e.value(),
                    }
                }
                label {
                    "Password"
                    input {
                        r#type: "password",
                        value: "{password}",
                        required: true,
                        disabled: locked,
                        oninput: move |e| form.write().password = e.value(),
                    }
                }
                if let Some(text) = hint() {
                    div { class: "hint", "{text}" }
                }
                if let Some(message) = message {
                    div {
                        class: if message.is_error() { "message error" } else { "message success" },
                        "{message.text()}"
                    }
                }
                button {
                    r#type: "button",
                    disabled: locked,
                    onclick: submit,
                    if submitting { "Signing in..." } else { "Sign In" }
                }
            }
        }
    }
}
