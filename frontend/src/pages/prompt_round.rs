use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;
use yew_router::prelude::*;

use shared::constants::{START_FAILURE_REDIRECT_MS, SUBMIT_SUCCESS_DISPLAY_MS};
use shared::countdown::CountdownThresholds;
use shared::currency::format_usd;
use shared::phrase_round::{FeedbackType, PromptState, RoundState, RoundStatus, RoundType};
use shared::validation::{error_message, validate_phrase};

use crate::api;
use crate::base::Base;
use crate::components::{show_transient, CountdownDisplay, ErrorBanner};
use crate::hooks::use_countdown::use_countdown;
use crate::models::RoundPhase;
use crate::session::SessionHandle;
use crate::Route;

#[function_component(PromptRound)]
pub fn prompt_round() -> Html {
    let session = use_context::<SessionHandle>().expect("session context missing");
    let navigator = use_navigator().expect("navigator missing");

    let phase = use_state(|| RoundPhase::Uninitialized);
    let round = use_state(|| None::<PromptState>);
    let deadline_ms = use_state(|| None::<f64>);
    let text = use_state(String::new);
    let error = use_state(String::new);
    let feedback_choice = use_state(|| None::<FeedbackType>);

    // One-shot mount latch: a remount cycle must not start a second round.
    let started = use_mut_ref(|| false);
    // Cleared on unmount so late responses are dropped, not applied.
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
        let feedback_choice = feedback_choice.clone();
        let alive = alive.clone();

        use_effect_with((), move |_| {
            if !*started.borrow() {
                *started.borrow_mut() = true;

                match session.active_round() {
                    Some(existing) if existing.round_type() == RoundType::Prompt => {
                        if existing.status() == RoundStatus::Submitted {
                            // Nothing left to do on a submitted round.
                            navigator.push(&Route::Dashboard);
                        } else if let RoundState::Prompt(state) = &existing.state {
                            deadline_ms.set(existing.expires_at_ms());
                            let round_id = state.round_id;
                            round.set(Some(state.clone()));
                            phase.set(RoundPhase::Active);

                            let feedback_choice = feedback_choice.clone();
                            let alive = alive.clone();
                            spawn_local(async move {
                                match api::fetch_feedback(round_id).await {
                                    Ok(existing) if *alive.borrow() => {
                                        feedback_choice.set(match existing {
                                            Some(FeedbackType::None) | None => None,
                                            Some(choice) => Some(choice),
                                        });
                                    }
                                    Ok(_) => {}
                                    Err(err) => {
                                        log::warn!("feedback lookup failed: {}", err.message)
                                    }
                                }
                            });
                        }
                    }
                    _ => {
                        phase.set(RoundPhase::Starting);
                        spawn_local(async move {
                            match session.start_round(RoundType::Prompt).await {
                                Ok(started_round) => {
                                    if !*alive.borrow() {
                                        return;
                                    }
                                    if let RoundState::Prompt(state) = started_round.state {
                                        deadline_ms.set(started_round_deadline(&state));
                                        round.set(Some(state));
                                        phase.set(RoundPhase::Active);
                                    } else {
                                        error.set("Server started a different round type".to_string());
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
                // Expiry only disables submission; the server applies its
                // own penalty rule independently.
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
            // Re-entry guard: no second submission while one is in flight
            // or after expiry.
            if !phase.can_submit() || countdown.is_expired {
                return;
            }
            let Some(state) = (*round).clone() else {
                return;
            };
            if let Err(err) = validate_phrase(&text) {
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
                        // Input is preserved for retry.
                        show_transient(error.clone(), err.message);
                        phase.set(RoundPhase::Active);
                    }
                }
            });
        })
    };

    let on_feedback = {
        let feedback_choice = feedback_choice.clone();
        let round = round.clone();
        Callback::from(move |choice: FeedbackType| {
            // Re-clicking the same reaction is a no-op; there is no
            // deletion endpoint.
            if *feedback_choice == Some(choice) {
                return;
            }
            let Some(state) = (*round).clone() else {
                return;
            };
            feedback_choice.set(Some(choice));
            spawn_local(async move {
                if let Err(err) = api::submit_feedback(state.round_id, choice).await {
                    log::warn!("feedback submission failed: {}", err.message);
                }
            });
        })
    };

    let feedback_button = |choice: FeedbackType, symbol: &str| {
        let on_feedback = on_feedback.clone();
        let selected = *feedback_choice == Some(choice);
        let classes = if selected {
            "px-2 py-1 rounded bg-indigo-100 dark:bg-indigo-900/40"
        } else {
            "px-2 py-1 rounded hover:bg-gray-100 dark:hover:bg-gray-700"
        };
        html! {
            <button class={classes} onclick={Callback::from(move |_| on_feedback.emit(choice))}>
                { symbol }
            </button>
        }
    };

    html! {
        <Base>
            <div class="max-w-xl mx-auto bg-white dark:bg-gray-800 p-6 rounded-lg shadow-lg">
                <div class="flex items-center justify-between mb-4">
                    <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{"Prompt Round"}</h1>
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
                                {"Phrase submitted!"}
                            </div>
                        },
                        (RoundPhase::Expired, Some(state)) => html! {
                            <>
                                { prompt_header(&state, feedback_button) }
                                <div class="p-3 rounded-lg bg-red-100 text-red-800 dark:bg-red-800 dark:text-red-100 text-center">
                                    {"Time's up. This round can no longer be submitted."}
                                </div>
                                { back_link(&navigator) }
                            </>
                        },
                        (_, Some(state)) => html! {
                            <>
                                { prompt_header(&state, feedback_button) }
                                <textarea
                                    class="w-full p-3 border rounded-lg dark:bg-gray-700 dark:text-white mb-4"
                                    rows="2"
                                    placeholder="Write your phrase..."
                                    value={(*text).clone()}
                                    oninput={on_input}
                                    disabled={*phase == RoundPhase::Submitting}
                                />
                                <button
                                    onclick={on_submit}
                                    disabled={*phase == RoundPhase::Submitting}
                                    class="w-full py-2 bg-indigo-600 hover:bg-indigo-700 disabled:opacity-50 text-white font-medium rounded-lg"
                                >
                                    { if *phase == RoundPhase::Submitting { "Submitting..." } else { "Submit phrase" } }
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

fn started_round_deadline(state: &PromptState) -> Option<f64> {
    shared::phrase_round::parse_timestamp_ms(&state.expires_at)
}

fn prompt_header(
    state: &PromptState,
    feedback_button: impl Fn(FeedbackType, &str) -> Html,
) -> Html {
    html! {
        <div class="mb-4">
            <div class="flex items-start justify-between">
                <p class="text-lg text-gray-800 dark:text-gray-100 font-medium">
                    { &state.prompt_text }
                </p>
                <div class="flex gap-1 ml-2">
                    { feedback_button(FeedbackType::Like, "👍") }
                    { feedback_button(FeedbackType::Dislike, "👎") }
                </div>
            </div>
            <p class="text-sm text-gray-500 dark:text-gray-400 mt-1">
                { format!("Entry cost: {}", format_usd(state.cost)) }
            </p>
        </div>
    }
}

fn back_link(navigator: &Navigator) -> Html {
    let navigator = navigator.clone();
    html! {
        <div class="mt-4 text-center">
            <button
                onclick={Callback::from(move |_| navigator.push(&Route::Dashboard))}
                class="px-4 py-2 bg-gray-200 dark:bg-gray-700 text-gray-800 dark:text-gray-100 rounded-lg"
            >
                {"Back to dashboard"}
            </button>
        </div>
    }
}
