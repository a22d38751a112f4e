//! Application state and actions

mod action;
mod form;
mod state;

pub use action::Action;
pub use form::{FilterForm, FormField};
pub use state::{AppState, UiState};
