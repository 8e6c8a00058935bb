pub mod recency;
pub mod weekly_window;

pub use recency::{aggregate, RecencyAggregator, FALLBACK_EMOJIS, PLACEHOLDER_EMOJI};
pub use weekly_window::{build_windows, WeeklyWindowBuilder, WINDOW_DAYS};
