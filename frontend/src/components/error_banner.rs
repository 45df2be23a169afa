use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::constants::ERROR_AUTO_HIDE_MS;

/// Shows a message and clears it after a few seconds, unless a newer
/// message replaced it in the meantime.
pub fn show_transient(feedback: UseStateHandle<String>, message: String) {
    feedback.set(message.clone());
    spawn_local(async move {
        TimeoutFuture::new(ERROR_AUTO_HIDE_MS).await;
        if *feedback == message {
            feedback.set(String::new());
        }
    });
}

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: String,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    if props.message.is_empty() {
        return html! {};
    }

    html! {
        <div class="mb-4 p-3 rounded-lg bg-red-100 text-red-800 dark:bg-red-800 dark:text-red-100 text-sm shadow-md">
            { &props.message }
        </div>
    }
}
