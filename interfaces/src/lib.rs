pub mod baseline;
pub mod defs;
pub mod empty;

pub use baseline::{StaticDigestSource, StaticEmojiSource};
pub use defs::{DigestPayloadSource, DigestRecord, EmojiRecord, RankedEmojiSource};
pub use empty::EmptySource;
