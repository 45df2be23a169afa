use wasm_bindgen::JsValue;
use web_sys::{window, CustomEvent, CustomEventInit};
use yew::prelude::*;
use yew_router::prelude::*;

use shared::currency::format_usd;

use crate::hooks::auth_state::use_auth_state;
use crate::hooks::use_balance::use_balance;
use crate::Route;

pub const BALANCE_UPDATE_EVENT: &str = "balanceUpdate";

/// Broadcasts an authoritative balance so every mounted view stays current.
pub fn dispatch_balance_event(balance: i64) {
    if let Some(window) = window() {
        if let Some(storage) = window.local_storage().ok().flatten() {
            let _ = storage.set_item("balance", &balance.to_string());
        }
        let event_init = CustomEventInit::new();
        event_init.set_detail(&JsValue::from_f64(balance as f64));
        if let Ok(event) = CustomEvent::new_with_event_init_dict(BALANCE_UPDATE_EVENT, &event_init)
        {
            let _ = window.dispatch_event(&event);
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct BaseProps {
    pub children: Html,
}

/// A missing token sends inner pages back to the landing page.
fn should_return_home(logged_in: bool, at_home: bool) -> bool {
    !logged_in && !at_home
}

#[function_component(Base)]
pub fn base(props: &BaseProps) -> Html {
    let balance = use_balance();
    let logged_in = use_auth_state();
    let navigator = use_navigator();
    let route = use_route::<Route>();
    let at_home = matches!(route, Some(Route::Dashboard) | None);

    use_effect_with((logged_in, at_home), move |&(logged_in, at_home)| {
        if should_return_home(logged_in, at_home) {
            if let Some(navigator) = navigator {
                navigator.push(&Route::Dashboard);
            }
        }
        || ()
    });

    html! {
        <div class="min-h-screen bg-gray-50 dark:bg-gray-900">
            <nav class="bg-white dark:bg-gray-800 shadow-sm">
                <div class="max-w-5xl mx-auto px-4 py-3 flex items-center justify-between">
                    <div class="flex items-center gap-6">
                        <Link<Route> to={Route::Dashboard}>
                            <span class="text-xl font-bold text-indigo-600 dark:text-indigo-400">
                                {"PhraseForge"}
                            </span>
                        </Link<Route>>
                        <Link<Route> to={Route::Dashboard} classes="text-sm text-gray-600 dark:text-gray-300 hover:text-indigo-600">
                            {"Play"}
                        </Link<Route>>
                        <Link<Route> to={Route::Phrasesets} classes="text-sm text-gray-600 dark:text-gray-300 hover:text-indigo-600">
                            {"My phrasesets"}
                        </Link<Route>>
                    </div>
                    <span class="px-3 py-1 rounded-full bg-amber-100 dark:bg-amber-900/40 text-amber-800 dark:text-amber-200 text-sm font-semibold">
                        { format_usd(balance) }
                    </span>
                </div>
            </nav>
            <main class="max-w-5xl mx-auto px-4 py-8">
                {
                    if logged_in {
                        props.children.clone()
                    } else {
                        html! {
                            <div class="bg-white dark:bg-gray-800 p-6 rounded-lg shadow text-center">
                                <p class="text-gray-700 dark:text-gray-200">
                                    {"Log in to play. Your session token was not found."}
                                </p>
                            </div>
                        }
                    }
                }
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_out_returns_home_from_inner_pages() {
        assert!(should_return_home(false, false));
        assert!(!should_return_home(false, true));
        assert!(!should_return_home(true, false));
        assert!(!should_return_home(true, true));
    }
}
