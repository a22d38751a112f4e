mod detail_popup;
mod filter_bar;
mod help_overlay;
mod stats_bar;
mod status_bar;

pub use detail_popup::DetailPopup;
pub use filter_bar::FilterBar;
pub use help_overlay::HelpOverlay;
pub use stats_bar::StatsBar;
pub use status_bar::{LOG_VIEWER_HINTS, StatusBar};
