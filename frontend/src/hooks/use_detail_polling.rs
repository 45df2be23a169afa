use gloo_timers::callback::Interval;
use uuid::Uuid;
use yew::prelude::*;

use shared::constants::DETAIL_POLL_INTERVAL_MS;

/// Polls a watched entity while its status is non-terminal.
///
/// `watched` is `(id, is_terminal)` for the currently open detail, or `None`
/// when nothing is selected. The interval is torn down when the selection
/// changes, when the entity reaches a terminal status, and on unmount.
#[hook]
pub fn use_detail_polling(watched: Option<(Uuid, bool)>, on_tick: Callback<()>) {
    use_effect_with(watched, move |watched| {
        let interval = match watched {
            Some((_, terminal)) if !terminal => {
                Some(Interval::new(DETAIL_POLL_INTERVAL_MS, move || {
                    on_tick.emit(());
                }))
            }
            _ => None,
        };
        move || drop(interval)
    });
}
