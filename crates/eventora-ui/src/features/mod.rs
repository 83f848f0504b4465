//! Feature slices (state, logic, view) for the UI.
pub mod discovery;
