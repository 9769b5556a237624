use serde::{Deserialize, Serialize};

/// One subtitle track of a video.
///
/// `video_id` points at a [`VideoUrl`](super::VideoUrl) id but nothing
/// enforces that the video exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubtitleUrl {
    pub id: i64,
    pub video_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub subtitle_url: String,
}

impl SubtitleUrl {
    pub fn new(id: i64, video_id: i64, subtitle_url: impl Into<String>) -> Self {
        Self {
            id,
            video_id,
            title: None,
            subtitle_url: subtitle_url.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
