//! Discovery page view.
//!
//! # Design
//! - Read everything from the controller in the store; never hold list state locally.
//! - Every user action is a controller operation dispatched through the shell.
//! - The initial load (and `?view=my` restore) runs once on mount.

use crate::app::{ShellCtx, deep_link_view};
use crate::components::event_card::EventCard;
use crate::components::filters_panel::FiltersPanel;
use crate::components::quick_filters::QuickFilters;
use crate::components::search_bar::SearchBar;
use crate::components::watchlist::WatchlistPanel;
use crate::core::logic::group_thousands;
use crate::core::store::AppStore;
use crate::features::discovery::controller::DiscoveryController;
use crate::features::discovery::search::SearchQuery;
use crate::features::discovery::state::ViewMode;
use eventora_api_models::{EventCategory, EventId};
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(DiscoveryPage)]
pub(crate) fn discovery_page() -> Html {
    let Some(ctx) = use_context::<ShellCtx>() else {
        tracing::error!("discovery page rendered outside the shell context");
        return html! {};
    };
    let discovery = use_selector(|store: &AppStore| store.discovery.clone());
    let show_filters = use_state(|| false);

    {
        let ctx = ctx.clone();
        use_effect_with_deps(
            move |_| {
                let restore = deep_link_view();
                ctx.dispatch(move |store| store.discovery.initial_load(restore));
                || ()
            },
            (),
        );
    }

    let on_select_view = {
        let ctx = ctx.clone();
        Callback::from(move |mode: ViewMode| {
            ctx.dispatch(move |store| store.discovery.select_view(mode));
        })
    };
    let on_search = {
        let ctx = ctx.clone();
        Callback::from(move |query: SearchQuery| {
            ctx.dispatch(move |store| store.discovery.set_search(query));
        })
    };
    let on_quick_filter = {
        let ctx = ctx.clone();
        Callback::from(move |category: EventCategory| {
            ctx.dispatch(move |store| store.discovery.apply_quick_filter(category));
        })
    };
    let on_toggle_like = {
        let ctx = ctx.clone();
        Callback::from(move |(id, liked): (EventId, bool)| {
            ctx.dispatch(move |store| store.discovery.toggle_like(id, liked));
        })
    };
    let on_dismiss = {
        let ctx = ctx.clone();
        Callback::from(move |_| {
            ctx.dispatch(|store| {
                store.discovery.dismiss_notice();
                Vec::new()
            });
        })
    };
    let on_toggle_filters = {
        let show_filters = show_filters.clone();
        Callback::from(move |_| show_filters.set(!*show_filters))
    };

    let mode = discovery.mode();
    let highlights = discovery.highlights();

    html! {
        <section class="discovery-page">
            <div class="discovery-hero">
                <div>
                    <p class="eyebrow">{"Discover"}</p>
                    <h1>{"Find your next experience"}</h1>
                </div>
                <dl class="highlights">
                    <div>
                        <dt>{"Live experiences"}</dt>
                        <dd>{highlights.live_experiences.to_string()}</dd>
                    </div>
                    <div>
                        <dt>{"Attendees"}</dt>
                        <dd>{group_thousands(highlights.attendees)}</dd>
                    </div>
                    <div>
                        <dt>{"Cities"}</dt>
                        <dd>{highlights.cities.to_string()}</dd>
                    </div>
                </dl>
            </div>
            {render_tabs(&discovery, &on_select_view)}
            {discovery.notice().map(|notice| html! {
                <div class="notice" role="status">
                    <span>{notice.to_string()}</span>
                    <button class="ghost" aria-label="Dismiss" onclick={on_dismiss}>{"×"}</button>
                </div>
            }).unwrap_or_default()}
            {if mode == ViewMode::Watchlist {
                html! { <WatchlistPanel /> }
            } else {
                html! {
                    <>
                        <div class="discovery-toolbar">
                            <SearchBar
                                value={discovery.search_query()}
                                searching={discovery.searching()}
                                on_change={on_search} />
                            {if mode == ViewMode::All {
                                html! {
                                    <button class="ghost" onclick={on_toggle_filters}>
                                        {if *show_filters { "Hide filters" } else { "Filters" }}
                                    </button>
                                }
                            } else {
                                html! {}
                            }}
                        </div>
                        {if mode == ViewMode::All {
                            html! {
                                <>
                                    <QuickFilters
                                        active={discovery.quick_filter()}
                                        on_select={on_quick_filter} />
                                    {if *show_filters { html! { <FiltersPanel /> } } else { html! {} }}
                                </>
                            }
                        } else {
                            html! {}
                        }}
                        {render_list(&discovery, &on_toggle_like)}
                    </>
                }
            }}
        </section>
    }
}

fn render_tabs(discovery: &DiscoveryController, on_select: &Callback<ViewMode>) -> Html {
    html! {
        <nav class="view-tabs" role="tablist">
            {for ViewMode::ALL.iter().copied().map(|mode| {
                let active = discovery.mode() == mode;
                let locked = mode.requires_login() && !discovery.logged_in();
                let onclick = {
                    let on_select = on_select.clone();
                    Callback::from(move |_| on_select.emit(mode))
                };
                html! {
                    <button
                        role="tab"
                        class={classes!("view-tab", active.then_some("active"), locked.then_some("locked"))}
                        aria-selected={active.to_string()}
                        {onclick}>
                        {mode.label()}
                    </button>
                }
            })}
        </nav>
    }
}

fn render_list(discovery: &DiscoveryController, on_toggle_like: &Callback<(EventId, bool)>) -> Html {
    if let Some(error) = discovery.error() {
        return html! { <p class="discovery-error" role="alert">{error.to_string()}</p> };
    }
    if discovery.loading() && discovery.displayed().is_empty() {
        return html! { <p class="muted">{"Loading events..."}</p> };
    }
    if discovery.displayed().is_empty() {
        let message = if discovery.showing_search() {
            "No events match your search."
        } else {
            "No events to show yet."
        };
        return html! {
            <div class="empty-state">
                <h3>{message}</h3>
            </div>
        };
    }
    let mode = discovery.mode();
    let can_like = discovery.logged_in();
    html! {
        <div class={classes!("event-grid", discovery.loading().then_some("refreshing"))}>
            {for discovery.displayed().iter().map(|event| html! {
                <EventCard
                    key={event.id.to_string()}
                    event={event.clone()}
                    {mode}
                    pending={discovery.like_pending(event.id)}
                    {can_like}
                    on_toggle_like={on_toggle_like.clone()} />
            })}
        </div>
    }
}
