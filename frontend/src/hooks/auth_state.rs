use yew::prelude::*;

use crate::api::get_auth_token;

/// Whether a session token is present in local or session storage.
#[hook]
pub fn use_auth_state() -> bool {
    let logged_in = use_state(|| get_auth_token().is_some());

    {
        let logged_in = logged_in.clone();
        use_effect_with((), move |_| {
            logged_in.set(get_auth_token().is_some());
            || ()
        });
    }

    *logged_in
}
