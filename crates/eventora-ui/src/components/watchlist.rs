//! Watchlist panel for the signed-in user.

use crate::app::ShellCtx;
use crate::components::event_card::EventCard;
use crate::core::store::AppStore;
use crate::features::discovery::state::{ViewMode, WatchlistState};
use eventora_api_models::EventId;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(WatchlistPanel)]
pub(crate) fn watchlist_panel() -> Html {
    let Some(ctx) = use_context::<ShellCtx>() else {
        tracing::error!("watchlist panel rendered outside the shell context");
        return html! {};
    };
    let watchlist = use_selector(|store: &AppStore| store.discovery.watchlist().clone());
    let pending = use_selector(|store: &AppStore| {
        store
            .discovery
            .watchlist()
            .events
            .iter()
            .filter(|event| store.discovery.like_pending(event.id))
            .map(|event| event.id)
            .collect::<Vec<EventId>>()
    });

    {
        let ctx = ctx.clone();
        use_effect_with_deps(
            move |_| {
                ctx.dispatch(|store| store.discovery.load_watchlist());
                || ()
            },
            (),
        );
    }

    let on_toggle_like = {
        let ctx = ctx.clone();
        Callback::from(move |(id, liked): (EventId, bool)| {
            ctx.dispatch(move |store| store.discovery.toggle_like(id, liked));
        })
    };
    let on_retry = {
        let ctx = ctx.clone();
        Callback::from(move |_| ctx.dispatch(|store| store.discovery.load_watchlist()))
    };

    let WatchlistState {
        events,
        loading,
        error,
        loaded,
    } = &*watchlist;

    let body = if *loading && !*loaded {
        html! { <p class="muted">{"Loading your watchlist..."}</p> }
    } else if let Some(message) = error {
        html! {
            <div class="watchlist__error" role="alert">
                <p>{message.clone()}</p>
                <button class="ghost" onclick={on_retry}>{"Retry"}</button>
            </div>
        }
    } else if events.is_empty() {
        html! {
            <div class="empty-state">
                <h3>{"Your watchlist is empty"}</h3>
                <p class="muted">{"Tap the heart on any event to keep it here."}</p>
            </div>
        }
    } else {
        html! {
            <div class="event-grid">
                {for events.iter().map(|event| html! {
                    <EventCard
                        key={event.id.to_string()}
                        event={event.clone()}
                        mode={ViewMode::Watchlist}
                        pending={pending.contains(&event.id)}
                        can_like={true}
                        on_toggle_like={on_toggle_like.clone()} />
                })}
            </div>
        }
    };

    html! {
        <section class="watchlist">
            <header class="watchlist__header">
                <h2>{"Watchlist"}</h2>
                {if *loading && *loaded {
                    html! { <span class="muted">{"Refreshing..."}</span> }
                } else {
                    html! {}
                }}
            </header>
            {body}
        </section>
    }
}
