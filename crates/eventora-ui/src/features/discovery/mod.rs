//! Event discovery feature: view controller, search, filters, likes.
//!
//! # Design
//! - Everything outside `view` is DOM-free and unit-tested natively.
//! - The controller never performs I/O; it emits effects the shell executes.

pub mod api;
pub mod controller;
pub mod filters;
pub mod likes;
pub mod quick_filter;
pub mod search;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
