//! DWD warnings feed client.
//!
//! The DWD publishes its active warnings as a JSON document wrapped in a
//! single JavaScript callback (`warnWetter.loadWarnings({...});`). This crate
//! fetches that body over HTTP, strips the wrapper and parses the result into
//! a [`WarningFeed`].
//!
//! # Example
//!
//! ```no_run
//! use dwd_feed::{FeedClient, FeedConfig, DEFAULT_FEED_URL};
//!
//! # async fn example() -> Result<(), dwd_feed::FetchError> {
//! let client = FeedClient::new(FeedConfig::default())?;
//! let feed = client.fetch(DEFAULT_FEED_URL).await?;
//!
//! if let Some(entry) = feed.first_entry("112069000") {
//!     println!("level {:?} until {:?}", entry.level, entry.end);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod jsonp;
pub mod types;

pub use client::{FeedClient, FetchFeed};
pub use config::{FeedConfig, DEFAULT_FEED_URL};
pub use error::FetchError;
pub use jsonp::unwrap_callback;
pub use types::{WarningEntry, WarningFeed};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
