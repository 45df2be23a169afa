use yew::prelude::*;

use shared::countdown::CountdownSnapshot;

pub fn format_remaining(seconds: i64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Properties, PartialEq)]
pub struct CountdownDisplayProps {
    pub countdown: CountdownSnapshot,
}

#[function_component(CountdownDisplay)]
pub fn countdown_display(props: &CountdownDisplayProps) -> Html {
    let countdown = props.countdown;
    if !countdown.active {
        return html! {};
    }

    let color = if countdown.is_expired {
        "text-gray-500 dark:text-gray-400"
    } else if countdown.is_urgent {
        "text-red-600 dark:text-red-400 animate-pulse"
    } else if countdown.is_warning {
        "text-amber-600 dark:text-amber-400"
    } else {
        "text-gray-700 dark:text-gray-200"
    };

    html! {
        <div class={classes!("text-lg", "font-mono", "font-semibold", color)}>
            {
                if countdown.is_expired {
                    "Time's up".to_string()
                } else {
                    format_remaining(countdown.remaining_secs)
                }
            }
        </div>
    }
}
