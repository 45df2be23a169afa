use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Event, VisibilityState};
use yew::prelude::*;

/// Fires the callback every time the tab regains visibility, so volatile
/// aggregates can be revalidated after the page was backgrounded.
#[hook]
pub fn use_visibility_refresh(on_visible: Callback<()>) {
    use_effect_with((), move |_| {
        let listener = Closure::wrap(Box::new(move |_: Event| {
            let visible = window()
                .and_then(|w| w.document())
                .map(|d| d.visibility_state() == VisibilityState::Visible)
                .unwrap_or(false);
            if visible {
                on_visible.emit(());
            }
        }) as Box<dyn FnMut(Event)>);

        if let Some(document) = window().and_then(|w| w.document()) {
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                listener.as_ref().unchecked_ref(),
            );
        }

        move || {
            if let Some(document) = window().and_then(|w| w.document()) {
                let _ = document.remove_event_listener_with_callback(
                    "visibilitychange",
                    listener.as_ref().unchecked_ref(),
                );
            }
        }
    });
}
