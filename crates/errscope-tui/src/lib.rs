//! TUI components for errscope
//!
//! This crate provides the terminal user interface for errscope,
//! including state management, keybindings, event handling, and UI components.

pub mod app;
pub mod config;
pub mod tui;
pub mod ui;

pub use app::{Action, AppState, FilterForm, FormField, UiState};
pub use config::{KeyBinding, KeyBindings, KeyContext};
pub use tui::{Event, EventHandler, Tui};
pub use ui::components::{DetailPopup, FilterBar, HelpOverlay, LOG_VIEWER_HINTS, StatsBar, StatusBar};
pub use ui::screens::LogViewerScreen;
pub use ui::{Layout, Theme};
