//! Header profile menu mirroring the auth session.

use crate::app::{Route, ShellCtx};
use crate::core::store::AppStore;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(ProfileMenu)]
pub(crate) fn profile_menu() -> Html {
    let Some(ctx) = use_context::<ShellCtx>() else {
        tracing::error!("profile menu rendered outside the shell context");
        return html! {};
    };
    let navigator = use_navigator();
    let session = use_selector(|store: &AppStore| store.session.clone());
    let open = use_state(|| false);

    if !session.logged_in() {
        return html! {
            <nav class="profile-menu">
                <a class="primary" href="/login">{"Log in"}</a>
            </nav>
        };
    }

    let toggle = {
        let open = open.clone();
        Callback::from(move |_| open.set(!*open))
    };
    let on_logout = {
        let open = open.clone();
        let navigator = navigator.clone();
        Callback::from(move |_| {
            open.set(false);
            ctx.logout();
            if let Some(navigator) = navigator.as_ref() {
                navigator.push(&Route::Home);
            }
        })
    };

    let profile = session.profile();
    let initial = profile.map_or('?', |info| info.initial());
    let name = profile
        .and_then(|info| info.display_name.clone())
        .unwrap_or_else(|| "Signed in".to_string());
    let email = profile.and_then(|info| info.email.clone());

    html! {
        <nav class="profile-menu">
            <button class="avatar" aria-haspopup="true" aria-expanded={(*open).to_string()} onclick={toggle}>
                {initial}
            </button>
            {if *open {
                html! {
                    <div class="profile-menu__dropdown">
                        <p class="profile-menu__name">{name}</p>
                        {email.map(|email| html! { <p class="muted">{email}</p> }).unwrap_or_default()}
                        <button class="ghost" onclick={on_logout}>{"Log out"}</button>
                    </div>
                }
            } else {
                html! {}
            }}
        </nav>
    }
}
