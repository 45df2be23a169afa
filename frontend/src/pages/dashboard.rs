use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use shared::currency::format_usd;
use shared::phrase_round::RoundType;

use crate::base::Base;
use crate::components::{show_transient, ErrorBanner};
use crate::hooks::use_visibility::use_visibility_refresh;
use crate::session::SessionHandle;
use crate::Route;

/// Landing page: balance, daily bonus, round availability and pending
/// payouts. All aggregates are refreshed as an independent fan-out on mount
/// and whenever the tab regains visibility.
#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let session = use_context::<SessionHandle>().expect("session context missing");
    let error = use_state(String::new);
    let notice = use_state(String::new);
    let claiming = use_state(|| false);

    {
        let session = session.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                session.refresh_all().await;
            });
            || ()
        });
    }

    {
        let session = session.clone();
        use_visibility_refresh(Callback::from(move |_| {
            let session = session.clone();
            spawn_local(async move {
                session.refresh_all().await;
            });
        }));
    }

    let on_claim_bonus = {
        let session = session.clone();
        let error = error.clone();
        let notice = notice.clone();
        let claiming = claiming.clone();
        Callback::from(move |_: MouseEvent| {
            if *claiming {
                return;
            }
            claiming.set(true);
            let session = session.clone();
            let error = error.clone();
            let notice = notice.clone();
            let claiming = claiming.clone();
            spawn_local(async move {
                match session.claim_daily_bonus().await {
                    Ok(response) => {
                        show_transient(
                            notice.clone(),
                            format!("Daily bonus claimed: {}", format_usd(response.amount)),
                        );
                    }
                    Err(err) => {
                        show_transient(error.clone(), err.message);
                    }
                }
                claiming.set(false);
            });
        })
    };

    let state = session.state();
    let active_round = state.active_round.clone();
    let availability = state.availability.clone();

    let resume_route = active_round.as_ref().map(|round| match round.round_type() {
        RoundType::Prompt => Route::PromptRound,
        RoundType::Copy => Route::CopyRound,
        RoundType::Vote => Route::VoteRound,
    });

    // The availability endpoint reports an in-flight round too, which covers
    // the window where the current-round fetch failed or has not landed yet.
    let round_blocked = active_round.is_some()
        || availability
            .as_ref()
            .map(|a| a.has_active_round())
            .unwrap_or(false);

    html! {
        <Base>
            <h1 class="text-3xl font-bold text-gray-900 dark:text-white mb-6">{"Dashboard"}</h1>

            <ErrorBanner message={(*error).clone()} />
            {
                if !notice.is_empty() {
                    html! {
                        <div class="mb-4 p-3 rounded-lg bg-green-100 text-green-800 dark:bg-green-800 dark:text-green-100 text-sm shadow-md">
                            { (*notice).clone() }
                        </div>
                    }
                } else {
                    html! {}
                }
            }

            {
                if let (Some(round), Some(route)) = (active_round.as_ref(), resume_route) {
                    html! {
                        <div class="mb-6 p-4 rounded-lg bg-indigo-50 dark:bg-indigo-900/30 flex items-center justify-between">
                            <span class="text-indigo-800 dark:text-indigo-200 font-medium">
                                { format!("You have a {} round in progress", round.round_type().label().to_lowercase()) }
                            </span>
                            <Link<Route> to={route}>
                                <button class="px-4 py-2 bg-indigo-600 hover:bg-indigo-700 text-white rounded-lg">
                                    {"Resume"}
                                </button>
                            </Link<Route>>
                        </div>
                    }
                } else {
                    html! {}
                }
            }

            <div class="grid grid-cols-1 sm:grid-cols-3 gap-4 mb-8">
                { round_card(
                    "Prompt",
                    "Write an original phrase for a prompt",
                    Route::PromptRound,
                    availability.as_ref().map(|a| a.can_prompt).unwrap_or(false) && !round_blocked,
                    availability.as_ref().map(|a| format!("{} prompts waiting", a.prompts_waiting)),
                ) }
                { round_card(
                    "Copy",
                    "Imitate a phrase without seeing its prompt",
                    Route::CopyRound,
                    availability.as_ref().map(|a| a.can_copy).unwrap_or(false) && !round_blocked,
                    availability.as_ref().map(|a| {
                        if a.copy_discount_active {
                            format!("Cost {} (discounted)", format_usd(a.copy_cost))
                        } else {
                            format!("Cost {}", format_usd(a.copy_cost))
                        }
                    }),
                ) }
                { round_card(
                    "Vote",
                    "Spot the original among the decoys",
                    Route::VoteRound,
                    availability.as_ref().map(|a| a.can_vote).unwrap_or(false) && !round_blocked,
                    availability.as_ref().map(|a| format!("{} phrasesets waiting", a.phrasesets_waiting)),
                ) }
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div class="bg-white dark:bg-gray-800 p-4 rounded-lg shadow">
                    <h2 class="text-lg font-bold text-gray-900 dark:text-white mb-3">{"Daily bonus"}</h2>
                    {
                        match &state.daily_bonus {
                            Some(bonus) if bonus.available => html! {
                                <button
                                    onclick={on_claim_bonus}
                                    disabled={*claiming}
                                    class="px-4 py-2 bg-amber-500 hover:bg-amber-600 disabled:opacity-50 text-white font-medium rounded-lg"
                                >
                                    { format!("Claim {}", format_usd(bonus.amount)) }
                                </button>
                            },
                            Some(_) => html! {
                                <p class="text-sm text-gray-500 dark:text-gray-400">{"Already claimed today. Come back tomorrow!"}</p>
                            },
                            None => html! {
                                <p class="text-sm text-gray-500 dark:text-gray-400">{"Loading..."}</p>
                            },
                        }
                    }
                </div>

                <div class="bg-white dark:bg-gray-800 p-4 rounded-lg shadow">
                    <h2 class="text-lg font-bold text-gray-900 dark:text-white mb-3">{"Unclaimed payouts"}</h2>
                    {
                        if state.pending_results.is_empty() {
                            html! { <p class="text-sm text-gray-500 dark:text-gray-400">{"Nothing waiting to be claimed."}</p> }
                        } else {
                            html! {
                                <ul class="divide-y divide-gray-200 dark:divide-gray-700">
                                    {
                                        state.pending_results.iter().map(|result| html! {
                                            <li key={result.phraseset_id.to_string()} class="py-2 flex items-center justify-between">
                                                <span class="text-sm text-gray-700 dark:text-gray-200 truncate mr-2">
                                                    { &result.prompt_text }
                                                </span>
                                                <span class="text-sm font-semibold text-green-600 dark:text-green-400">
                                                    { format_usd(result.amount) }
                                                </span>
                                            </li>
                                        }).collect::<Html>()
                                    }
                                </ul>
                            }
                        }
                    }
                    <Link<Route> to={Route::Phrasesets} classes="inline-block mt-3 text-sm text-indigo-600 dark:text-indigo-400 hover:underline">
                        {"View phrasesets"}
                    </Link<Route>>
                </div>
            </div>

            {
                if let Some(summary) = &state.summary {
                    html! {
                        <div class="mt-4 grid grid-cols-3 gap-4 text-center">
                            { summary_card("Rounds played", summary.rounds_played.to_string()) }
                            { summary_card("In progress", summary.phrasesets_in_progress.to_string()) }
                            { summary_card("Unclaimed", format_usd(summary.unclaimed_total)) }
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </Base>
    }
}

fn round_card(
    title: &str,
    description: &str,
    route: Route,
    enabled: bool,
    detail: Option<String>,
) -> Html {
    html! {
        <div class="bg-white dark:bg-gray-800 p-4 rounded-lg shadow flex flex-col">
            <h2 class="text-lg font-bold text-gray-900 dark:text-white">{ title }</h2>
            <p class="text-sm text-gray-500 dark:text-gray-400 flex-grow mt-1">{ description }</p>
            {
                if let Some(detail) = detail {
                    html! { <p class="text-xs text-gray-400 dark:text-gray-500 mt-2">{ detail }</p> }
                } else {
                    html! {}
                }
            }
            {
                if enabled {
                    html! {
                        <Link<Route> to={route} classes="mt-3">
                            <button class="w-full py-2 bg-indigo-600 hover:bg-indigo-700 text-white font-medium rounded-lg">
                                { format!("Start {}", title.to_lowercase()) }
                            </button>
                        </Link<Route>>
                    }
                } else {
                    html! {
                        <button disabled=true class="mt-3 w-full py-2 bg-gray-300 dark:bg-gray-700 text-gray-500 font-medium rounded-lg cursor-not-allowed">
                            {"Unavailable"}
                        </button>
                    }
                }
            }
        </div>
    }
}

fn summary_card(label: &str, value: String) -> Html {
    html! {
        <div class="bg-white dark:bg-gray-800 p-4 rounded-lg shadow">
            <p class="text-xs text-gray-500 dark:text-gray-400">{ label }</p>
            <p class="text-xl font-bold text-gray-900 dark:text-white">{ value }</p>
        </div>
    }
}
