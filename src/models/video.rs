use serde::{Deserialize, Serialize};

/// A playable media location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoUrl {
    pub id: i64,
    pub video_url: String,
    /// Resume position in seconds.
    #[serde(default)]
    pub watched_length: i64,
}

impl VideoUrl {
    pub fn new(id: i64, video_url: impl Into<String>) -> Self {
        Self {
            id,
            video_url: video_url.into(),
            watched_length: 0,
        }
    }
}
