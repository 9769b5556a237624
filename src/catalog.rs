//! Catalog files: TOML lists of videos and subtitles to load into a store.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::db::UrlStore;
use crate::error::Result;
use crate::models::{SubtitleUrl, VideoUrl};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default, rename = "video")]
    pub videos: Vec<VideoUrl>,
    #[serde(default, rename = "subtitle")]
    pub subtitles: Vec<SubtitleUrl>,
}

impl Catalog {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Two demo streams, the second one with subtitle tracks.
    pub fn sample() -> Self {
        Self {
            videos: vec![
                VideoUrl::new(
                    1,
                    "https://www.learningcontainer.com/wp-content/uploads/2020/05/sample-mp4-file.mp4",
                ),
                VideoUrl::new(
                    2,
                    "https://5b44cf20b0388.streamlock.net:8443/vod/smil:bbb.smil/playlist.m3u8",
                ),
            ],
            subtitles: vec![
                SubtitleUrl::new(
                    1,
                    2,
                    "https://durian.blender.org/wp-content/content/subtitles/sintel_en.srt",
                )
                .with_title("English"),
                SubtitleUrl::new(
                    2,
                    2,
                    "https://durian.blender.org/wp-content/content/subtitles/sintel_fr.srt",
                )
                .with_title("French"),
            ],
        }
    }

    /// Insert videos, then subtitles. Each list is its own batch.
    /// Returns the number of videos and subtitles written.
    pub async fn import_into<S>(self, store: &S) -> Result<(usize, usize)>
    where
        S: UrlStore + ?Sized,
    {
        let counts = (self.videos.len(), self.subtitles.len());
        store.insert_video_urls(self.videos).await?;
        store.insert_subtitle_urls(self.subtitles).await?;
        tracing::info!("Imported {} videos and {} subtitles", counts.0, counts.1);
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Repository;
    use crate::error::StoreError;

    const CATALOG: &str = r#"
[[video]]
id = 1
video_url = "https://example.com/a.mp4"

[[video]]
id = 2
video_url = "https://example.com/b.m3u8"
watched_length = 40

[[subtitle]]
id = 1
video_id = 2
title = "English"
subtitle_url = "https://example.com/b.en.srt"
"#;

    #[test]
    fn parses_videos_and_subtitles() {
        let catalog = Catalog::parse(CATALOG).unwrap();
        assert_eq!(catalog.videos.len(), 2);
        assert_eq!(catalog.videos[0].watched_length, 0);
        assert_eq!(catalog.videos[1].watched_length, 40);
        assert_eq!(
            catalog.subtitles,
            vec![SubtitleUrl::new(1, 2, "https://example.com/b.en.srt").with_title("English")]
        );
    }

    #[test]
    fn sections_are_optional() {
        let catalog = Catalog::parse("").unwrap();
        assert_eq!(catalog, Catalog::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Catalog::parse("[[video]]\nid = 1\nvideo_url = \"a\"\nduration = 3\n").unwrap_err();
        assert!(matches!(err, StoreError::TomlDe(_)));
    }

    #[test]
    fn sample_subtitles_point_at_sample_videos() {
        let sample = Catalog::sample();
        for subtitle in &sample.subtitles {
            assert!(sample.videos.iter().any(|v| v.id == subtitle.video_id));
        }
    }

    #[tokio::test]
    async fn import_writes_both_lists() {
        let repo = Repository::open_in_memory().await.unwrap();
        let counts = Catalog::parse(CATALOG)
            .unwrap()
            .import_into(&repo)
            .await
            .unwrap();

        assert_eq!(counts, (2, 1));
        assert_eq!(
            repo.get_all_video_urls().await.unwrap(),
            vec!["https://example.com/a.mp4", "https://example.com/b.m3u8"]
        );
        assert_eq!(
            repo.get_subtitle_url_strings_for_video(2).await.unwrap(),
            vec!["https://example.com/b.en.srt"]
        );
    }

    #[tokio::test]
    async fn import_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, CATALOG).unwrap();

        let repo = Repository::open_in_memory().await.unwrap();
        Catalog::from_path(&path)
            .unwrap()
            .import_into(&repo)
            .await
            .unwrap();
        assert_eq!(repo.count_videos().await.unwrap(), 2);
    }
}
