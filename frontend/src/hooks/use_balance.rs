use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, CustomEvent};
use yew::prelude::*;

use crate::base::BALANCE_UPDATE_EVENT;

/// Last broadcast balance in cents. Seeded from localStorage, kept current
/// by `balanceUpdate` events dispatched on every authoritative change.
#[hook]
pub fn use_balance() -> i64 {
    let balance = use_state(|| {
        window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item("balance").ok().flatten())
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0)
    });

    {
        let balance = balance.clone();
        use_effect_with((), move |_| {
            let listener = Closure::wrap(Box::new(move |e: CustomEvent| {
                if let Some(value) = e.detail().as_f64() {
                    balance.set(value as i64);
                }
            }) as Box<dyn FnMut(CustomEvent)>);

            if let Some(window) = window() {
                let _ = window.add_event_listener_with_callback(
                    BALANCE_UPDATE_EVENT,
                    listener.as_ref().unchecked_ref(),
                );
            }

            move || {
                if let Some(window) = window() {
                    let _ = window.remove_event_listener_with_callback(
                        BALANCE_UPDATE_EVENT,
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    *balance
}
