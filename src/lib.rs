//! Local SQLite store for the video and subtitle URLs of a media player.
//!
//! [`Repository`] implements [`UrlStore`]: list video URLs, look up the
//! subtitle tracks of a video, and insert-or-replace batches of either.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use catalog::Catalog;
pub use config::Config;
pub use db::{Repository, UrlStore};
pub use error::{Result, StoreError};
pub use models::{SubtitleUrl, VideoUrl};
