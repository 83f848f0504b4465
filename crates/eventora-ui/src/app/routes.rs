//! Routing definitions for the Eventora client.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Root,
    #[at("/home")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}
