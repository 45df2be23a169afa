use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use yew::prelude::*;

use shared::constants::COUNTDOWN_TICK_MS;
use shared::countdown::{CountdownSnapshot, CountdownThresholds};

fn advance(
    deadline_ms: f64,
    thresholds: CountdownThresholds,
    snapshot: &UseStateHandle<CountdownSnapshot>,
    fired: &Rc<Cell<bool>>,
    on_expired: &Callback<()>,
) {
    let snap = CountdownSnapshot::at(js_sys::Date::now(), deadline_ms, thresholds);
    if snap.is_expired && !fired.get() {
        fired.set(true);
        on_expired.emit(());
    }
    snapshot.set(snap);
}

/// Countdown against a fixed deadline (epoch ms), ticking once per second.
///
/// The effect is keyed on the deadline: changing it resets tick state and
/// the expiry latch immediately, and a `None` deadline stops the interval
/// and reports the neutral state. `on_expired` fires exactly once per
/// distinct deadline, however many re-renders happen around the transition.
#[hook]
pub fn use_countdown(
    deadline_ms: Option<f64>,
    thresholds: CountdownThresholds,
    on_expired: Callback<()>,
) -> CountdownSnapshot {
    let snapshot = use_state(CountdownSnapshot::idle);

    {
        let snapshot = snapshot.clone();
        use_effect_with(deadline_ms, move |deadline_ms| {
            let interval = match *deadline_ms {
                Some(deadline) => {
                    let fired = Rc::new(Cell::new(false));
                    advance(deadline, thresholds, &snapshot, &fired, &on_expired);
                    Some(Interval::new(COUNTDOWN_TICK_MS, move || {
                        advance(deadline, thresholds, &snapshot, &fired, &on_expired);
                    }))
                }
                None => {
                    snapshot.set(CountdownSnapshot::idle());
                    None
                }
            };
            move || drop(interval)
        });
    }

    *snapshot
}
