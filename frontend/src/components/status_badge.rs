use yew::prelude::*;

use shared::phraseset::PhrasesetStatus;

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub status: PhrasesetStatus,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    let color = match props.status {
        PhrasesetStatus::WaitingCopies | PhrasesetStatus::WaitingCopy1 => {
            "bg-gray-100 text-gray-700 dark:bg-gray-700 dark:text-gray-200"
        }
        PhrasesetStatus::Active | PhrasesetStatus::Voting => {
            "bg-blue-100 text-blue-800 dark:bg-blue-900/40 dark:text-blue-200"
        }
        PhrasesetStatus::Closing => {
            "bg-amber-100 text-amber-800 dark:bg-amber-900/40 dark:text-amber-200"
        }
        PhrasesetStatus::Finalized => {
            "bg-green-100 text-green-800 dark:bg-green-900/40 dark:text-green-200"
        }
        PhrasesetStatus::Abandoned => {
            "bg-red-100 text-red-800 dark:bg-red-900/40 dark:text-red-200"
        }
    };

    html! {
        <span class={classes!("px-2", "py-0.5", "rounded-full", "text-xs", "font-semibold", color)}>
            { props.status.label() }
        </span>
    }
}
