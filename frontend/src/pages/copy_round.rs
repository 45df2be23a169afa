use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;
use yew_router::prelude::*;

use shared::constants::{START_FAILURE_REDIRECT_MS, SUBMIT_SUCCESS_DISPLAY_MS};
use shared::countdown::CountdownThresholds;
use shared::currency::format_usd;
use shared::phrase_round::{CopyState, RoundState, RoundStatus, RoundType};
use shared::validation::{error_message, validate_copy_phrase};

use crate::base::Base;
use crate::components::{show_transient, CountdownDisplay, ErrorBanner};
use crate::hooks::use_countdown::use_countdown;
use crate::models::RoundPhase;
use crate::session::SessionHandle;
use crate::Route;

/// Copy rounds show the original phrase and ask for a lookalike written
/// blind to the prompt. Everything but "must differ from the original" is
/// enforced server-side.
#[function_component(CopyRound)]
pub fn copy_round() -> Html {
    let session = use_context::<SessionHandle>().expect("session context missing");
    let navigator = use_navigator().expect("navigator missing");

    let phase = use_state(|| RoundPhase::Uninitialized);
    let round = use_state(|| None::<CopyState>);
    let deadline_ms = use_state(|| None::<f64>);
    let text = use_state(String::new);
    let error = use_state(String::new);

    let started = use_mut_ref(|| false);
    let alive = use_mut_ref(|| true);
    // Live phase for callbacks that outlive the render that created them.
    let phase_ref = use_mut_ref(|| RoundPhase::Uninitialized);
    *phase_ref.borrow_mut() = *phase;

    {
        let alive = alive.clone();
        use_effect_with((), move |_| {
            move || {
                *alive.borrow_mut() = false;
            }
        });
    }

    {
        let session = session.clone();
        let navigator = navigator.clone();
        let phase = phase.clone();
        let round = round.clone();
        let deadline_ms = deadline_ms.clone();
        let error = error.clone();
        let alive = alive.clone();

        use_effect_with((), move |_| {
            if !*started.borrow() {
                *started.borrow_mut() = true;

                match session.active_round() {
                    Some(existing) if existing.round_type() == RoundType::Copy => {
                        if existing.status() == RoundStatus::Submitted {
                            navigator.push(&Route::Dashboard);
                        } else if let RoundState::Copy(state) = &existing.state {
                            deadline_ms.set(existing.expires_at_ms());
                            round.set(Some(state.clone()));
                            phase.set(RoundPhase::Active);
                        }
                    }
                    _ => {
                        phase.set(RoundPhase::Starting);
                        spawn_local(async move {
                            match session.start_round(RoundType::Copy).await {
                                Ok(started_round) => {
                                    if !*alive.borrow() {
                                        return;
                                    }
                                    if let RoundState::Copy(state) = started_round.state {
                                        deadline_ms.set(
                                            shared::phrase_round::parse_timestamp_ms(
                                                &state.expires_at,
                                            ),
                                        );
                                        round.set(Some(state));
                                        phase.set(RoundPhase::Active);
                                    } else {
                                        error.set(
                                            "Server started a different round type".to_string(),
                                        );
                                        TimeoutFuture::new(START_FAILURE_REDIRECT_MS).await;
                                        if *alive.borrow() {
                                            navigator.push(&Route::Dashboard);
                                        }
                                    }
                                }
                                Err(err) => {
                                    if !*alive.borrow() {
                                        return;
                                    }
                                    error.set(err.message);
                                    TimeoutFuture::new(START_FAILURE_REDIRECT_MS).await;
                                    if *alive.borrow() {
                                        navigator.push(&Route::Dashboard);
                                    }
                                }
                            }
                        });
                    }
                }
            }
            || ()
        });
    }

    let countdown = {
        let phase = phase.clone();
        let phase_ref = phase_ref.clone();
        use_countdown(
            *deadline_ms,
            CountdownThresholds::default(),
            Callback::from(move |_| {
                let current = *phase_ref.borrow();
                let next = current.on_deadline();
                if next != current {
                    phase.set(next);
                }
            }),
        )
    };

    let on_input = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };

    let on_submit = {
        let session = session.clone();
        let navigator = navigator.clone();
        let phase = phase.clone();
        let round = round.clone();
        let deadline_ms = deadline_ms.clone();
        let text = text.clone();
        let error = error.clone();
        let alive = alive.clone();

        Callback::from(move |_: MouseEvent| {
            if !phase.can_submit() || countdown.is_expired {
                return;
            }
            let Some(state) = (*round).clone() else {
                return;
            };
            if let Err(err) = validate_copy_phrase(&text, &state.original_phrase) {
                show_transient(error.clone(), error_message(&err).to_string());
                return;
            }

            phase.set(RoundPhase::Submitting);
            let session = session.clone();
            let navigator = navigator.clone();
            let phase = phase.clone();
            let deadline_ms = deadline_ms.clone();
            let text_value = (*text).clone();
            let error = error.clone();
            let alive = alive.clone();
            spawn_local(async move {
                match session.submit_phrase(state.round_id, &text_value).await {
                    Ok(_) => {
                        if !*alive.borrow() {
                            return;
                        }
                        // The deadline no longer applies to a submitted round.
                        deadline_ms.set(None);
                        phase.set(RoundPhase::Submitted);
                        TimeoutFuture::new(SUBMIT_SUCCESS_DISPLAY_MS).await;
                        if *alive.borrow() {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(err) => {
                        if !*alive.borrow() {
                            return;
                        }
                        show_transient(error.clone(), err.message);
                        phase.set(RoundPhase::Active);
                    }
                }
            });
        })
    };

    html! {
        <Base>
            <div class="max-w-xl mx-auto bg-white dark:bg-gray-800 p-6 rounded-lg shadow-lg">
                <div class="flex items-center justify-between mb-4">
                    <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{"Copy Round"}</h1>
                    <CountdownDisplay countdown={countdown} />
                </div>

                <ErrorBanner message={(*error).clone()} />

                {
                    match (*phase, (*round).clone()) {
                        (RoundPhase::Uninitialized | RoundPhase::Starting, _) => html! {
                            <div class="flex justify-center items-center h-40">
                                <div class="animate-spin rounded-full h-10 w-10 border-t-2 border-b-2 border-indigo-500"></div>
                            </div>
                        },
                        (RoundPhase::Submitted, _) => html! {
                            <div class="p-3 rounded-lg bg-green-100 text-green-800 dark:bg-green-800 dark:text-green-100 text-center font-bold">
                                {"Copy submitted!"}
                            </div>
                        },
                        (RoundPhase::Expired, Some(_)) => html! {
                            <div class="p-3 rounded-lg bg-red-100 text-red-800 dark:bg-red-800 dark:text-red-100 text-center">
                                {"Time's up. This round can no longer be submitted."}
                            </div>
                        },
                        (_, Some(state)) => html! {
                            <>
                                <div class="mb-4">
                                    <p class="text-sm text-gray-500 dark:text-gray-400">{"Write a phrase that could pass for this one:"}</p>
                                    <p class="text-lg text-gray-800 dark:text-gray-100 font-medium mt-1">
                                        { &state.original_phrase }
                                    </p>
                                    <p class="text-sm text-gray-500 dark:text-gray-400 mt-1">
                                        { format!("Entry cost: {}", format_usd(state.cost)) }
                                        {
                                            if state.discount_active {
                                                html! { <span class="ml-2 text-green-600 dark:text-green-400 font-semibold">{"discount applied"}</span> }
                                            } else {
                                                html! {}
                                            }
                                        }
                                    </p>
                                </div>
                                <textarea
                                    class="w-full p-3 border rounded-lg dark:bg-gray-700 dark:text-white mb-4"
                                    rows="2"
                                    placeholder="Write your copy..."
                                    value={(*text).clone()}
                                    oninput={on_input}
                                    disabled={*phase == RoundPhase::Submitting}
                                />
                                <button
                                    onclick={on_submit}
                                    disabled={*phase == RoundPhase::Submitting}
                                    class="w-full py-2 bg-indigo-600 hover:bg-indigo-700 disabled:opacity-50 text-white font-medium rounded-lg"
                                >
                                    { if *phase == RoundPhase::Submitting { "Submitting..." } else { "Submit copy" } }
                                </button>
                            </>
                        },
                        (_, None) => html! {},
                    }
                }
            </div>
        </Base>
    }
}
