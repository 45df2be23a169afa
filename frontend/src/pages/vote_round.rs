use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use shared::constants::{START_FAILURE_REDIRECT_MS, VOTE_RESULT_DISPLAY_MS, VOTE_STAKE_CENTS};
use shared::countdown::CountdownThresholds;
use shared::currency::format_usd;
use shared::phrase_round::{RoundState, RoundStatus, RoundType, VoteResult, VoteState};

use crate::base::Base;
use crate::components::{show_transient, CountdownDisplay, ErrorBanner};
use crate::hooks::use_countdown::use_countdown;
use crate::models::RoundPhase;
use crate::session::SessionHandle;
use crate::Route;

/// Vote rounds show three phrases in server-issued order; the player picks
/// the one they believe is the original. Submitting shows the result
/// immediately, a fourth outcome distinct from the generic submitted state.
#[function_component(VoteRound)]
pub fn vote_round() -> Html {
    let session = use_context::<SessionHandle>().expect("session context missing");
    let navigator = use_navigator().expect("navigator missing");

    let phase = use_state(|| RoundPhase::Uninitialized);
    let round = use_state(|| None::<VoteState>);
    let deadline_ms = use_state(|| None::<f64>);
    let result = use_state(|| None::<VoteResult>);
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
                    Some(existing) if existing.round_type() == RoundType::Vote => {
                        if existing.status() == RoundStatus::Submitted {
                            navigator.push(&Route::Dashboard);
                        } else if let RoundState::Vote(state) = &existing.state {
                            deadline_ms.set(existing.expires_at_ms());
                            round.set(Some(state.clone()));
                            phase.set(RoundPhase::Active);
                        }
                    }
                    _ => {
                        phase.set(RoundPhase::Starting);
                        spawn_local(async move {
                            match session.start_round(RoundType::Vote).await {
                                Ok(started_round) => {
                                    if !*alive.borrow() {
                                        return;
                                    }
                                    if let RoundState::Vote(state) = started_round.state {
                                        if !state.has_valid_ballot() {
                                            log::warn!(
                                                "vote round {} has a malformed ballot",
                                                state.round_id
                                            );
                                        }
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
                // The stake is forfeited on expiry; the server is the source
                // of truth for the charge.
                let current = *phase_ref.borrow();
                let next = current.on_deadline();
                if next != current {
                    phase.set(next);
                }
            }),
        )
    };

    let on_vote = {
        let session = session.clone();
        let navigator = navigator.clone();
        let phase = phase.clone();
        let round = round.clone();
        let deadline_ms = deadline_ms.clone();
        let result = result.clone();
        let error = error.clone();
        let alive = alive.clone();

        Callback::from(move |phrase: String| {
            // Double-click protection: once Submitting, further clicks are
            // no-ops until the response lands.
            if !phase.can_submit() || countdown.is_expired {
                return;
            }
            let Some(state) = (*round).clone() else {
                return;
            };

            phase.set(RoundPhase::Submitting);
            let session = session.clone();
            let navigator = navigator.clone();
            let phase = phase.clone();
            let deadline_ms = deadline_ms.clone();
            let result = result.clone();
            let error = error.clone();
            let alive = alive.clone();
            spawn_local(async move {
                match session.submit_vote(state.phraseset_id, &phrase).await {
                    Ok(vote_result) => {
                        if !*alive.borrow() {
                            return;
                        }
                        // The deadline no longer applies once the result is in.
                        deadline_ms.set(None);
                        result.set(Some(vote_result));
                        phase.set(RoundPhase::VotedResult);
                        TimeoutFuture::new(VOTE_RESULT_DISPLAY_MS).await;
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
                    <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{"Vote Round"}</h1>
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
                        (RoundPhase::VotedResult, _) => vote_result_panel(&result),
                        (RoundPhase::Expired, Some(_)) => html! {
                            <div class="p-3 rounded-lg bg-red-100 text-red-800 dark:bg-red-800 dark:text-red-100 text-center">
                                { format!("Time's up. Your {} stake is forfeited.", format_usd(VOTE_STAKE_CENTS)) }
                            </div>
                        },
                        (_, Some(state)) => html! {
                            <>
                                <p class="text-sm text-gray-500 dark:text-gray-400 mb-1">{"Which phrase is the original?"}</p>
                                <p class="text-lg text-gray-800 dark:text-gray-100 font-medium mb-4">
                                    { &state.prompt_text }
                                </p>
                                <div class="flex flex-col gap-3">
                                    {
                                        // Ballot is rendered in server order.
                                        state.phrases.iter().map(|phrase| {
                                            let on_vote = on_vote.clone();
                                            let value = phrase.clone();
                                            html! {
                                                <button
                                                    key={phrase.clone()}
                                                    onclick={Callback::from(move |_| on_vote.emit(value.clone()))}
                                                    disabled={*phase == RoundPhase::Submitting}
                                                    class="w-full py-3 px-4 text-left bg-gray-100 hover:bg-indigo-100 dark:bg-gray-700 dark:hover:bg-indigo-900/40 disabled:opacity-50 rounded-lg text-gray-800 dark:text-gray-100"
                                                >
                                                    { phrase }
                                                </button>
                                            }
                                        }).collect::<Html>()
                                    }
                                </div>
                            </>
                        },
                        (_, None) => html! {},
                    }
                }
            </div>
        </Base>
    }
}

fn vote_result_panel(result: &UseStateHandle<Option<VoteResult>>) -> Html {
    let Some(result) = result.as_ref() else {
        return html! {};
    };

    html! {
        <div class="text-center">
            {
                if result.correct {
                    html! {
                        <div class="p-3 rounded-lg bg-green-100 text-green-800 dark:bg-green-800 dark:text-green-100 font-bold mb-3">
                            { format!("Correct! You won {}.", format_usd(result.payout)) }
                        </div>
                    }
                } else {
                    html! {
                        <div class="p-3 rounded-lg bg-red-100 text-red-800 dark:bg-red-800 dark:text-red-100 font-bold mb-3">
                            {"Not quite."}
                        </div>
                    }
                }
            }
            <p class="text-gray-700 dark:text-gray-200">
                { "You picked: " }<span class="font-medium">{ &result.your_choice }</span>
            </p>
            <p class="text-gray-700 dark:text-gray-200 mt-1">
                { "The original was: " }<span class="font-medium">{ &result.original_phrase }</span>
            </p>
        </div>
    }
}
