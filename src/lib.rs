//! # Video Indexer SDK for Rust
//!
//! Rust client for the [Azure Video Indexer](https://api.videoindexer.ai)
//! video analysis API. Upload videos, poll for processing, and read the
//! extracted transcript -- all with idiomatic async Rust.
//!
//! ## Quick start
//!
//! ```no_run
//! use videoindexer::Client;
//!
//! #[tokio::main]
//! async fn main() -> videoindexer::Result<()> {
//!     let client = Client::new("subscription-key", "account-id", "eastasia");
//!
//!     // Upload and wait for the remote analysis to finish
//!     let index = client.index("meeting.mp4", "weekly meeting", None).await?;
//!
//!     if let Some(video) = index.videos.first() {
//!         println!("Duration: {}s", video.duration_in_seconds);
//!     }
//!     for line in index.transcript() {
//!         println!("{line}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Builder pattern
//!
//! Credentials can also come from the `VIDEO_INDEXER_API_KEY`,
//! `VIDEO_INDEXER_ACCOUNT_ID`, and `VIDEO_INDEXER_LOCATION` environment
//! variables:
//!
//! ```no_run
//! use videoindexer::ClientBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> videoindexer::Result<()> {
//! let client = ClientBuilder::new()
//!     .location("trial")
//!     .timeout(Duration::from_secs(120))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod client;
mod errors;
mod models;

pub use client::{Client, ClientBuilder};
pub use errors::{Result, VideoIndexerError};
pub use models::{
    IndexedVideo, Insights, PollOptions, TranscriptLine, UploadOptions, Video, VideoIndex,
};
