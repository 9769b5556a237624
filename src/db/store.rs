use async_trait::async_trait;

use crate::error::Result;
use crate::models::{SubtitleUrl, VideoUrl};

/// Read/write access to persisted video and subtitle URLs.
///
/// Inserts replace any existing row with the same id. Each batch is applied
/// atomically: either every record lands or none does.
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Every stored video URL in id order.
    async fn get_all_video_urls(&self) -> Result<Vec<String>>;

    /// Subtitle records whose `video_id` equals `video_id`.
    async fn get_subtitle_urls_for_video(&self, video_id: i64) -> Result<Vec<SubtitleUrl>>;

    /// Like [`get_subtitle_urls_for_video`](Self::get_subtitle_urls_for_video),
    /// returning only the URL strings.
    async fn get_subtitle_url_strings_for_video(&self, video_id: i64) -> Result<Vec<String>>;

    async fn insert_video_urls(&self, records: Vec<VideoUrl>) -> Result<()>;

    async fn insert_subtitle_urls(&self, records: Vec<SubtitleUrl>) -> Result<()>;
}
