use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::currency::format_usd;
use shared::phraseset::{
    filter_summaries, preserve_selection, PhrasesetDetails, PhrasesetSummary, RoleFilter,
    StatusFilter,
};

use crate::api;
use crate::base::Base;
use crate::components::{show_transient, ErrorBanner, StatusBadge};
use crate::hooks::use_detail_polling::use_detail_polling;
use crate::hooks::use_visibility::use_visibility_refresh;
use crate::session::SessionHandle;

fn load_details(
    phraseset_id: Uuid,
    selected_ref: Rc<RefCell<Option<Uuid>>>,
    details: UseStateHandle<Option<PhrasesetDetails>>,
    error: UseStateHandle<String>,
    alive: Rc<RefCell<bool>>,
) {
    spawn_local(async move {
        match api::fetch_phraseset_details(phraseset_id).await {
            Ok(fetched) => {
                // A response for a stale selection is dropped, not applied.
                if *alive.borrow() && *selected_ref.borrow() == Some(phraseset_id) {
                    details.set(Some(fetched));
                }
            }
            Err(err) => {
                if *alive.borrow() {
                    show_transient(error, err.message);
                }
            }
        }
    });
}

#[allow(clippy::too_many_arguments)]
fn load_list(
    role: RoleFilter,
    status: StatusFilter,
    all: UseStateHandle<Vec<PhrasesetSummary>>,
    selected: UseStateHandle<Option<Uuid>>,
    selected_ref: Rc<RefCell<Option<Uuid>>>,
    details: UseStateHandle<Option<PhrasesetDetails>>,
    error: UseStateHandle<String>,
    alive: Rc<RefCell<bool>>,
) {
    spawn_local(async move {
        match api::fetch_phrasesets().await {
            Ok(items) => {
                if !*alive.borrow() {
                    return;
                }
                let filtered = filter_summaries(&items, role, status);
                let previous = *selected_ref.borrow();
                let next = preserve_selection(previous, &filtered);
                all.set(items);
                if next != previous {
                    *selected_ref.borrow_mut() = next;
                    selected.set(next);
                    details.set(None);
                    if let Some(id) = next {
                        load_details(id, selected_ref.clone(), details.clone(), error, alive);
                    }
                } else if next.is_none() {
                    details.set(None);
                }
            }
            Err(err) => {
                if *alive.borrow() {
                    show_transient(error, err.message);
                }
            }
        }
    });
}

/// Tracking view for the player's phrasesets: filterable list, selected
/// detail kept fresh by polling while non-terminal, and payout claiming.
#[function_component(Phrasesets)]
pub fn phrasesets() -> Html {
    let session = use_context::<SessionHandle>().expect("session context missing");

    let role_filter = use_state(|| RoleFilter::All);
    let status_filter = use_state(|| StatusFilter::All);
    let all = use_state(Vec::<PhrasesetSummary>::new);
    let selected = use_state(|| None::<Uuid>);
    let details = use_state(|| None::<PhrasesetDetails>);
    let error = use_state(String::new);
    let notice = use_state(String::new);
    let claiming = use_state(|| false);

    let alive = use_mut_ref(|| true);
    // Live filter and selection values for callbacks registered once.
    let filters_ref = use_mut_ref(|| (RoleFilter::All, StatusFilter::All));
    let selected_ref = use_mut_ref(|| None::<Uuid>);

    {
        let alive = alive.clone();
        use_effect_with((), move |_| {
            move || {
                *alive.borrow_mut() = false;
            }
        });
    }

    {
        let filters_ref = filters_ref.clone();
        let all = all.clone();
        let selected = selected.clone();
        let selected_ref = selected_ref.clone();
        let details = details.clone();
        let error = error.clone();
        let alive = alive.clone();
        use_effect_with((), move |_| {
            let (role, status) = *filters_ref.borrow();
            load_list(role, status, all, selected, selected_ref, details, error, alive);
            || ()
        });
    }

    {
        let filters_ref = filters_ref.clone();
        let all = all.clone();
        let selected = selected.clone();
        let selected_ref = selected_ref.clone();
        let details = details.clone();
        let error = error.clone();
        let alive = alive.clone();
        use_visibility_refresh(Callback::from(move |_| {
            let (role, status) = *filters_ref.borrow();
            load_list(
                role,
                status,
                all.clone(),
                selected.clone(),
                selected_ref.clone(),
                details.clone(),
                error.clone(),
                alive.clone(),
            );
        }));
    }

    // Poll the open detail every 10s until its status goes terminal.
    {
        let watched = (*selected).map(|id| {
            let terminal = details
                .as_ref()
                .map(|d| d.status.is_terminal())
                .unwrap_or(false);
            (id, terminal)
        });
        let selected_ref = selected_ref.clone();
        let details = details.clone();
        let error = error.clone();
        let alive = alive.clone();
        use_detail_polling(
            watched,
            Callback::from(move |_| {
                let current = *selected_ref.borrow();
                if let Some(id) = current {
                    load_details(
                        id,
                        selected_ref.clone(),
                        details.clone(),
                        error.clone(),
                        alive.clone(),
                    );
                }
            }),
        );
    }

    let set_filters = {
        let role_filter = role_filter.clone();
        let status_filter = status_filter.clone();
        let filters_ref = filters_ref.clone();
        let all = all.clone();
        let selected = selected.clone();
        let selected_ref = selected_ref.clone();
        let details = details.clone();
        let error = error.clone();
        let alive = alive.clone();
        Callback::from(move |(role, status): (RoleFilter, StatusFilter)| {
            *filters_ref.borrow_mut() = (role, status);
            role_filter.set(role);
            status_filter.set(status);
            // Filter changes re-fetch the list and re-apply the selection rule.
            load_list(
                role,
                status,
                all.clone(),
                selected.clone(),
                selected_ref.clone(),
                details.clone(),
                error.clone(),
                alive.clone(),
            );
        })
    };

    let on_select = {
        let selected = selected.clone();
        let selected_ref = selected_ref.clone();
        let details = details.clone();
        let error = error.clone();
        let alive = alive.clone();
        Callback::from(move |id: Uuid| {
            if *selected_ref.borrow() == Some(id) {
                return;
            }
            *selected_ref.borrow_mut() = Some(id);
            selected.set(Some(id));
            details.set(None);
            load_details(
                id,
                selected_ref.clone(),
                details.clone(),
                error.clone(),
                alive.clone(),
            );
        })
    };

    let on_claim = {
        let session = session.clone();
        let filters_ref = filters_ref.clone();
        let all = all.clone();
        let selected = selected.clone();
        let selected_ref = selected_ref.clone();
        let details = details.clone();
        let error = error.clone();
        let notice = notice.clone();
        let claiming = claiming.clone();
        let alive = alive.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(current) = (*details).clone() else {
                return;
            };
            if *claiming || !current.claimable() {
                return;
            }
            claiming.set(true);

            let session = session.clone();
            let filters_ref = filters_ref.clone();
            let all = all.clone();
            let selected = selected.clone();
            let selected_ref = selected_ref.clone();
            let details = details.clone();
            let error = error.clone();
            let notice = notice.clone();
            let claiming = claiming.clone();
            let alive = alive.clone();
            spawn_local(async move {
                match api::claim_phraseset(current.phraseset_id).await {
                    Ok(response) => {
                        if *alive.borrow() {
                            show_transient(
                                notice,
                                format!("Claimed {}", format_usd(response.amount)),
                            );
                        }
                        // A claim changes five aggregates together: detail,
                        // list, balance, summary and the unclaimed results.
                        let (role, status) = *filters_ref.borrow();
                        load_details(
                            current.phraseset_id,
                            selected_ref.clone(),
                            details.clone(),
                            error.clone(),
                            alive.clone(),
                        );
                        load_list(
                            role,
                            status,
                            all,
                            selected,
                            selected_ref,
                            details,
                            error,
                            alive.clone(),
                        );
                        session.refresh_after_claim().await;
                    }
                    Err(err) => {
                        if *alive.borrow() {
                            show_transient(error, err.message);
                        }
                    }
                }
                if *alive.borrow() {
                    claiming.set(false);
                }
            });
        })
    };

    let filtered = filter_summaries(&all, *role_filter, *status_filter);

    html! {
        <Base>
            <h1 class="text-3xl font-bold text-gray-900 dark:text-white mb-6">{"My Phrasesets"}</h1>

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

            <div class="flex flex-wrap gap-2 mb-4">
                {
                    RoleFilter::all_options().into_iter().map(|option| {
                        let set_filters = set_filters.clone();
                        let status = *status_filter;
                        let active = *role_filter == option;
                        html! {
                            <button
                                key={option.label()}
                                onclick={Callback::from(move |_| set_filters.emit((option, status)))}
                                class={filter_classes(active)}
                            >
                                { option.label() }
                            </button>
                        }
                    }).collect::<Html>()
                }
                <span class="mx-2 text-gray-300 dark:text-gray-600">{"|"}</span>
                {
                    StatusFilter::all_options().into_iter().map(|option| {
                        let set_filters = set_filters.clone();
                        let role = *role_filter;
                        let active = *status_filter == option;
                        html! {
                            <button
                                key={option.label()}
                                onclick={Callback::from(move |_| set_filters.emit((role, option)))}
                                class={filter_classes(active)}
                            >
                                { option.label() }
                            </button>
                        }
                    }).collect::<Html>()
                }
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div class="bg-white dark:bg-gray-800 rounded-lg shadow divide-y divide-gray-200 dark:divide-gray-700">
                    {
                        if filtered.is_empty() {
                            html! { <p class="p-4 text-sm text-gray-500 dark:text-gray-400">{"No phrasesets match these filters."}</p> }
                        } else {
                            filtered.iter().map(|summary| {
                                let on_select = on_select.clone();
                                let id = summary.phraseset_id;
                                let is_selected = *selected == Some(id);
                                let row_classes = if is_selected {
                                    "p-3 cursor-pointer bg-indigo-50 dark:bg-indigo-900/30"
                                } else {
                                    "p-3 cursor-pointer hover:bg-gray-50 dark:hover:bg-gray-700/50"
                                };
                                html! {
                                    <div
                                        key={id.to_string()}
                                        class={row_classes}
                                        onclick={Callback::from(move |_| on_select.emit(id))}
                                    >
                                        <div class="flex items-center justify-between">
                                            <span class="text-sm text-gray-800 dark:text-gray-100 truncate mr-2">
                                                { &summary.prompt_text }
                                            </span>
                                            <StatusBadge status={summary.status} />
                                        </div>
                                        <p class="text-xs text-gray-500 dark:text-gray-400 mt-1">
                                            { summary.your_role.label() }
                                        </p>
                                    </div>
                                }
                            }).collect::<Html>()
                        }
                    }
                </div>

                <div class="bg-white dark:bg-gray-800 rounded-lg shadow p-4">
                    { detail_panel(&details, &claiming, on_claim) }
                </div>
            </div>
        </Base>
    }
}

fn filter_classes(active: bool) -> &'static str {
    if active {
        "px-3 py-1 rounded-full text-sm bg-indigo-600 text-white"
    } else {
        "px-3 py-1 rounded-full text-sm bg-gray-200 dark:bg-gray-700 text-gray-700 dark:text-gray-200 hover:bg-gray-300"
    }
}

fn detail_panel(
    details: &UseStateHandle<Option<PhrasesetDetails>>,
    claiming: &UseStateHandle<bool>,
    on_claim: Callback<MouseEvent>,
) -> Html {
    let Some(details) = details.as_ref() else {
        return html! {
            <p class="text-sm text-gray-500 dark:text-gray-400">{"Select a phraseset to see its progress."}</p>
        };
    };

    html! {
        <>
            <div class="flex items-center justify-between mb-2">
                <h2 class="text-lg font-bold text-gray-900 dark:text-white truncate mr-2">
                    { &details.prompt_text }
                </h2>
                <StatusBadge status={details.status} />
            </div>
            <p class="text-xs text-gray-500 dark:text-gray-400 mb-3">
                { format!("Your role: {}", details.your_role.label()) }
            </p>

            {
                if details.copies.is_empty() {
                    html! { <p class="text-sm text-gray-500 dark:text-gray-400">{"No copies submitted yet."}</p> }
                } else {
                    html! {
                        <ul class="mb-3 space-y-1">
                            {
                                details.copies.iter().enumerate().map(|(i, copy)| html! {
                                    <li key={i} class="text-sm text-gray-700 dark:text-gray-200 p-2 bg-gray-50 dark:bg-gray-700/50 rounded">
                                        { copy }
                                    </li>
                                }).collect::<Html>()
                            }
                        </ul>
                    }
                }
            }

            <p class="text-sm text-gray-500 dark:text-gray-400">
                { format!("Votes cast: {}", details.votes_cast) }
            </p>

            {
                if let Some(payout) = details.your_payout {
                    html! {
                        <div class="mt-3">
                            <p class="text-sm font-semibold text-gray-800 dark:text-gray-100">
                                { format!("Your payout: {}", format_usd(payout)) }
                                {
                                    if details.payout_claimed {
                                        html! { <span class="ml-2 text-green-600 dark:text-green-400">{"(claimed)"}</span> }
                                    } else {
                                        html! {}
                                    }
                                }
                            </p>
                            {
                                if details.claimable() {
                                    html! {
                                        <button
                                            onclick={on_claim}
                                            disabled={**claiming}
                                            class="mt-2 px-4 py-2 bg-green-600 hover:bg-green-700 disabled:opacity-50 text-white font-medium rounded-lg"
                                        >
                                            { if **claiming { "Claiming..." } else { "Claim payout" } }
                                        </button>
                                    }
                                } else {
                                    html! {}
                                }
                            }
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </>
    }
}
