pub mod types;
pub mod config;
pub mod aggregators;
pub mod digest;
pub mod picker;
pub mod fetcher;
pub mod sources;
pub mod rss_utils;
pub mod utils;

pub use types::*;
pub use config::{FeedConfig, PickerConfig};
pub use aggregators::{aggregate, build_windows, RecencyAggregator, WeeklyWindowBuilder};
pub use digest::{DigestBuilder, EntryFormatter, WeeklyDigest};
pub use picker::EmojiPicker;
pub use fetcher::HttpDigestSource;
pub use sources::JsonFileEmojiSource;
pub use rss_utils::render_rss;
