//! Quick category chips.

use crate::features::discovery::quick_filter::QUICK_FILTER_CHIPS;
use eventora_api_models::EventCategory;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct QuickFiltersProps {
    pub active: Option<EventCategory>,
    pub on_select: Callback<EventCategory>,
}

#[function_component(QuickFilters)]
pub(crate) fn quick_filters(props: &QuickFiltersProps) -> Html {
    html! {
        <div class="quick-filters" role="group" aria-label="Quick filters">
            {for QUICK_FILTER_CHIPS.iter().map(|chip| {
                let category = chip.category;
                let active = props.active == Some(category);
                let onclick = {
                    let on_select = props.on_select.clone();
                    Callback::from(move |_| on_select.emit(category))
                };
                html! {
                    <button
                        key={category.as_str()}
                        class={classes!("quick-chip", active.then_some("active"))}
                        aria-pressed={active.to_string()}
                        {onclick}>
                        <span class="quick-chip__title">{chip.title}</span>
                        <span class="quick-chip__description">{chip.description}</span>
                    </button>
                }
            })}
        </div>
    }
}
