pub mod api;
pub mod base;
pub mod components;
pub mod config;
pub mod hooks;
pub mod models;
pub mod pages;
pub mod session;

use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{
    copy_round::CopyRound, dashboard::Dashboard, phrasesets::Phrasesets,
    prompt_round::PromptRound, vote_round::VoteRound,
};
use crate::session::{SessionHandle, SessionState};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/rounds/prompt")]
    PromptRound,
    #[at("/rounds/copy")]
    CopyRound,
    #[at("/rounds/vote")]
    VoteRound,
    #[at("/phrasesets")]
    Phrasesets,
}

#[function_component(App)]
pub fn app() -> Html {
    // The session store is created once here and threaded to every page
    // through context; pages never reach for a global.
    let session = use_reducer(SessionState::default);
    let handle = SessionHandle::new(session);

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<SessionHandle>>
    }
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Dashboard => html! { <Dashboard /> },
        Route::PromptRound => html! { <PromptRound /> },
        Route::CopyRound => html! { <CopyRound /> },
        Route::VoteRound => html! { <VoteRound /> },
        Route::Phrasesets => html! { <Phrasesets /> },
    }
}
