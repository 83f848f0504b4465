//! Event card with like toggle.

use crate::core::logic::{
    attendees_label, category_label, event_link, location_label, organizer_label, start_label,
};
use crate::features::discovery::state::ViewMode;
use eventora_api_models::{EventId, EventSummary};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct EventCardProps {
    pub event: EventSummary,
    pub mode: ViewMode,
    #[prop_or_default]
    pub pending: bool,
    #[prop_or_default]
    pub can_like: bool,
    pub on_toggle_like: Callback<(EventId, bool)>,
}

#[function_component(EventCard)]
pub(crate) fn event_card(props: &EventCardProps) -> Html {
    let event = &props.event;
    let link = event_link(event.id, props.mode);
    let status = event.event_status.as_str();
    let status_class = format!("status-{}", status.to_ascii_lowercase());

    let on_like = {
        let on_toggle_like = props.on_toggle_like.clone();
        let id = event.id;
        let next = !event.is_liked;
        Callback::from(move |_| on_toggle_like.emit((id, next)))
    };

    html! {
        <article class="event-card">
            <div class="event-card__chips">
                <span class="event-pill event-pill--category">{category_label(event)}</span>
                <span class={classes!("event-pill", "event-pill--status", status_class)}>{status}</span>
                {if props.can_like {
                    html! {
                        <button
                            class={classes!("like-toggle", event.is_liked.then_some("liked"))}
                            aria-pressed={event.is_liked.to_string()}
                            aria-busy={props.pending.to_string()}
                            onclick={on_like}>
                            {if event.is_liked { "♥" } else { "♡" }}
                        </button>
                    }
                } else {
                    html! {}
                }}
            </div>
            <a class="event-card__title" href={link.clone()}>{event.title.clone()}</a>
            <p class="event-card__meta">
                <span>{organizer_label(event).to_string()}</span>
                <span class="meta-dot" />
                <span>{location_label(event)}</span>
            </p>
            <div class="event-card__body">
                <div>
                    <p class="label">{"Starts"}</p>
                    <p class="value">{start_label(event)}</p>
                </div>
                <div>
                    <p class="label">{"Attendees"}</p>
                    <p class="value">{attendees_label(event)}</p>
                </div>
            </div>
            <div class="event-card__footer">
                <p class="event-card__hint">{"Secure your seat"}</p>
                <a class="event-card__cta" href={link}>{"View details"}</a>
            </div>
        </article>
    }
}
