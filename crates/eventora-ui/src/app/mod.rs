//! Yew application shell.

use crate::components::profile_menu::ProfileMenu;
use crate::core::store::sync_session;
use crate::features::discovery::view::DiscoveryPage;
use gloo::events::EventListener;
use gloo::utils::window;
pub(crate) use routes::Route;
use wasm_bindgen::JsCast;
use web_sys::StorageEvent;
use yew::prelude::*;
use yew_router::prelude::*;

mod context;
mod effects;
mod preferences;
mod routes;
mod telemetry;

pub(crate) use context::ShellCtx;
pub(crate) use preferences::deep_link_view;

#[function_component(EventoraApp)]
fn eventora_app() -> Html {
    let ctx = use_memo(|_| ShellCtx::new(), ());

    {
        let ctx = (*ctx).clone();
        use_effect_with_deps(
            move |_| {
                let snapshot = ctx.hub.snapshot();
                ctx.dispatch(move |store| sync_session(store, snapshot));
                ctx.ensure_profile();

                let subscription = {
                    let ctx = ctx.clone();
                    ctx.hub.clone().subscribe(move |session| {
                        let snapshot = session.clone();
                        ctx.dispatch(move |store| sync_session(store, snapshot));
                        ctx.ensure_profile();
                    })
                };
                let hub = ctx.hub.clone();
                let listener = EventListener::new(&window(), "storage", move |event| {
                    let Some(event) = event.dyn_ref::<StorageEvent>() else {
                        return;
                    };
                    let key = event.key();
                    let new_value = event.new_value();
                    hub.update(|session| {
                        session.apply_storage_change(key.as_deref(), new_value.as_deref())
                    });
                });
                move || {
                    drop(listener);
                    drop(subscription);
                }
            },
            (),
        );
    }

    html! {
        <ContextProvider<ShellCtx> context={(*ctx).clone()}>
            <BrowserRouter>
                <header class="app-header">
                    <Link<Route> to={Route::Home} classes="brand">{"Eventora"}</Link<Route>>
                    <ProfileMenu />
                </header>
                <main class="app-main">
                    <Switch<Route> render={switch} />
                </main>
            </BrowserRouter>
        </ContextProvider<ShellCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Root => html! { <Redirect<Route> to={Route::Home} /> },
        Route::Home => html! { <DiscoveryPage /> },
        Route::NotFound => html! {
            <section class="not-found">
                <h1>{"Page not found"}</h1>
                <Link<Route> to={Route::Home}>{"Back to events"}</Link<Route>>
            </section>
        },
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    telemetry::init_logging(tracing::Level::INFO);
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<EventoraApp>::with_root(root).render();
    } else {
        yew::Renderer::<EventoraApp>::new().render();
    }
}
