//! Event name and organiser search inputs.
//!
//! # Design
//! - Keep local input state for immediate typing feedback.
//! - Emit every change; the controller owns debouncing.

use crate::features::discovery::search::SearchQuery;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SearchBarProps {
    pub value: SearchQuery,
    #[prop_or_default]
    pub searching: bool,
    pub on_change: Callback<SearchQuery>,
}

#[function_component(SearchBar)]
pub(crate) fn search_bar(props: &SearchBarProps) -> Html {
    let local = use_state(|| props.value.clone());

    {
        let local = local.clone();
        use_effect_with_deps(
            move |incoming: &SearchQuery| {
                if *local != *incoming {
                    local.set(incoming.clone());
                }
                || ()
            },
            props.value.clone(),
        );
    }

    let on_event_name = {
        let local = local.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let next = SearchQuery {
                event_name: input.value(),
                organizer_name: local.organizer_name.clone(),
            };
            local.set(next.clone());
            on_change.emit(next);
        })
    };

    let on_organizer = {
        let local = local.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let next = SearchQuery {
                event_name: local.event_name.clone(),
                organizer_name: input.value(),
            };
            local.set(next.clone());
            on_change.emit(next);
        })
    };

    html! {
        <div class={classes!("search-bar", props.searching.then_some("searching"))}>
            <input
                type="search"
                placeholder="Search events"
                aria-label="Event name"
                value={local.event_name.clone()}
                oninput={on_event_name} />
            <input
                type="search"
                placeholder="Organizer"
                aria-label="Organizer name"
                value={local.organizer_name.clone()}
                oninput={on_organizer} />
        </div>
    }
}
