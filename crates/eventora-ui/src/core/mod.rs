//! Core, DOM-free primitives and helpers for the web client.
pub mod auth;
pub mod config;
pub mod error;
pub mod logic;
pub mod store;
