//! Advanced filter panel: price, place, category and proximity.
//!
//! # Design
//! - Inputs write straight into `AppStore::filters`; nothing is requested until Apply.
//! - The proximity toggle resolves the browser position asynchronously and reports
//!   back with the lookup ticket so a late fix after toggling off is ignored.
//! - Validation failures stay in the panel and never reach the controller.

use crate::app::ShellCtx;
use crate::core::config::DiscoveryConfig;
use crate::core::store::AppStore;
use crate::features::discovery::filters::FilterForm;
use crate::services::geo::current_position;
use eventora_api_models::EventCategory;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::use_selector;

type FieldSetter = fn(&mut FilterForm, String);

fn text_field(
    ctx: &ShellCtx,
    label: &'static str,
    value: &str,
    input_type: &'static str,
    set: FieldSetter,
) -> Html {
    let oninput = {
        let ctx = ctx.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            ctx.dispatch(move |store| {
                set(&mut store.filters, value);
                Vec::new()
            });
        })
    };
    html! {
        <label class="filter-field">
            <span>{label}</span>
            <input type={input_type} value={value.to_string()} {oninput} />
        </label>
    }
}

#[function_component(FiltersPanel)]
pub(crate) fn filters_panel() -> Html {
    let Some(ctx) = use_context::<ShellCtx>() else {
        tracing::error!("filters panel rendered outside the shell context");
        return html! {};
    };
    let form = use_selector(|store: &AppStore| store.filters.clone());
    let validation = use_state(|| None::<String>);

    let on_category = {
        let ctx = ctx.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let category = select.value().parse::<EventCategory>().ok();
            ctx.dispatch(move |store| {
                store.filters.category = category;
                Vec::new()
            });
        })
    };

    let on_nearby = {
        let ctx = ctx.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let enabled = input.checked();
            let mut lookup = None;
            ctx.dispatch(|store| {
                lookup = store.filters.set_nearby(enabled);
                Vec::new()
            });
            if let Some(request) = lookup {
                let ctx = ctx.clone();
                spawn_local(async move {
                    let result = current_position().await;
                    ctx.dispatch(move |store| {
                        store.filters.location_resolved(request, result);
                        Vec::new()
                    });
                });
            }
        })
    };

    let on_apply = {
        let ctx = ctx.clone();
        let form = form.clone();
        let validation = validation.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match form.build(DiscoveryConfig::default().default_radius_km) {
                Ok(request) => {
                    validation.set(None);
                    ctx.dispatch(move |store| store.discovery.apply_advanced_filters(request));
                }
                Err(err) => validation.set(Some(err.user_message())),
            }
        })
    };

    let on_clear = {
        let ctx = ctx.clone();
        let validation = validation.clone();
        Callback::from(move |_| {
            validation.set(None);
            ctx.dispatch(|store| {
                store.filters.clear();
                store.discovery.clear_filters()
            });
        })
    };

    let selected = form.category.map(EventCategory::as_str).unwrap_or_default();

    html! {
        <form class="filters-panel" onsubmit={on_apply}>
            <div class="filters-panel__grid">
                {text_field(&ctx, "Min price", &form.min_price, "number", |f, v| f.min_price = v)}
                {text_field(&ctx, "Max price", &form.max_price, "number", |f, v| f.max_price = v)}
                {text_field(&ctx, "City", &form.city, "text", |f, v| f.city = v)}
                {text_field(&ctx, "State", &form.state, "text", |f, v| f.state = v)}
                {text_field(&ctx, "Country", &form.country, "text", |f, v| f.country = v)}
                <label class="filter-field">
                    <span>{"Category"}</span>
                    <select onchange={on_category}>
                        <option value="" selected={selected.is_empty()}>{"Any category"}</option>
                        {for EventCategory::ALL.iter().map(|category| html! {
                            <option
                                value={category.as_str()}
                                selected={selected == category.as_str()}>
                                {category.label()}
                            </option>
                        })}
                    </select>
                </label>
            </div>
            <div class="filters-panel__nearby">
                <label class="toggle">
                    <input type="checkbox" checked={form.nearby()} onchange={on_nearby} />
                    <span>{"Near me"}</span>
                </label>
                {if form.nearby() {
                    text_field(&ctx, "Radius (km)", &form.radius_km, "number", |f, v| f.radius_km = v)
                } else {
                    html! {}
                }}
                {if form.locating() {
                    html! { <span class="muted">{"Locating..."}</span> }
                } else {
                    html! {}
                }}
                {form.location_error().map(|message| html! {
                    <p class="filters-panel__error" role="alert">{message.to_string()}</p>
                }).unwrap_or_default()}
            </div>
            {(*validation).as_ref().map(|message| html! {
                <p class="filters-panel__error" role="alert">{message.clone()}</p>
            }).unwrap_or_default()}
            <div class="filters-panel__actions">
                <button type="submit" class="primary">{"Apply filters"}</button>
                <button type="button" class="ghost" onclick={on_clear}>{"Clear"}</button>
            </div>
        </form>
    }
}
