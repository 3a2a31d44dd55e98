#![warn(clippy::uninlined_format_args)]

pub mod decoder;
pub mod document;
pub mod feed;
pub mod share_link;

pub use decoder::JsonSnapshotDecoder;
pub use feed::{FeedError, JsonLinesFeed};
pub use share_link::{ShareLink, ShareLinkError};
