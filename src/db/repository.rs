use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, Row, Transaction};
use tokio_rusqlite::Connection;

use crate::config::{Config, DEFAULT_BUSY_TIMEOUT_MS};
use crate::error::{Result, StoreError};
use crate::models::{SubtitleUrl, VideoUrl};

use super::schema::{SCHEMA, WAL_PRAGMAS};
use super::store::UrlStore;

#[derive(Clone)]
pub struct Repository {
    conn: Connection,
}

impl Repository {
    /// Open (or create) a file database with WAL enabled.
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(db_path.as_ref().to_path_buf()).await?;
        Self::init(conn, true, DEFAULT_BUSY_TIMEOUT_MS).await
    }

    pub async fn open_with_config(config: &Config) -> Result<Self> {
        let conn = Connection::open(config.db_path.clone()).await?;
        Self::init(conn, config.wal, config.busy_timeout_ms).await
    }

    /// A private database that lives as long as this handle and its clones.
    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().await?;
        Self::init(conn, false, DEFAULT_BUSY_TIMEOUT_MS).await
    }

    async fn init(conn: Connection, wal: bool, busy_timeout_ms: u64) -> Result<Self> {
        conn.call(move |conn| {
            conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
            if wal {
                conn.execute_batch(WAL_PRAGMAS)?;
            }
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        tracing::info!("Media URL store opened (wal: {})", wal);
        Ok(Self { conn })
    }

    /// Close the background connection. Clones of this handle fail with
    /// [`StoreError::Unavailable`] afterwards.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        tracing::info!("Media URL store closed");
        Ok(())
    }

    // Video operations

    pub async fn get_all_videos(&self) -> Result<Vec<VideoUrl>> {
        let videos = self
            .conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare_cached("SELECT id, videoUrl, watchedLength FROM video ORDER BY id")?;
                let videos = stmt
                    .query_map([], video_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(videos)
            })
            .await?;
        Ok(videos)
    }

    pub async fn count_videos(&self) -> Result<i64> {
        let count = self
            .conn
            .call(|conn| {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM video", [], |row| row.get(0))?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }

    /// Store a resume position for every video row with this URL.
    /// Returns the number of rows changed.
    pub async fn update_watched_length(&self, video_url: &str, seconds: i64) -> Result<usize> {
        if seconds < 0 {
            tracing::warn!("Rejected negative watched length {} for {}", seconds, video_url);
            return Err(StoreError::InvalidArgument(format!(
                "watched length must not be negative, got {seconds}"
            )));
        }

        let video_url = video_url.to_string();
        let changed = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE video SET watchedLength = ?1 WHERE videoUrl = ?2",
                    params![seconds, video_url],
                )?;
                Ok(changed)
            })
            .await?;
        Ok(changed)
    }

    /// Insert both batches in one transaction, but only when no video is
    /// stored yet. Returns whether anything was inserted.
    pub async fn seed_if_empty(
        &self,
        videos: Vec<VideoUrl>,
        subtitles: Vec<SubtitleUrl>,
    ) -> Result<bool> {
        let seeded = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let count: i64 = tx.query_row("SELECT COUNT(*) FROM video", [], |row| row.get(0))?;
                if count > 0 {
                    return Ok(false);
                }
                insert_videos(&tx, &videos)?;
                insert_subtitles(&tx, &subtitles)?;
                tx.commit()?;
                Ok(true)
            })
            .await?;

        if seeded {
            tracing::info!("Seeded empty store");
        } else {
            tracing::debug!("Store already has videos, skipping seed");
        }
        Ok(seeded)
    }
}

#[async_trait]
impl UrlStore for Repository {
    async fn get_all_video_urls(&self) -> Result<Vec<String>> {
        let urls = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare_cached("SELECT videoUrl FROM video ORDER BY id")?;
                let urls = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<std::result::Result<Vec<String>, _>>()?;
                Ok(urls)
            })
            .await?;
        Ok(urls)
    }

    async fn get_subtitle_urls_for_video(&self, video_id: i64) -> Result<Vec<SubtitleUrl>> {
        let subtitles = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare_cached(
                    "SELECT id, videoId, title, subtitleUrl FROM subtitle WHERE videoId = ?1 ORDER BY id",
                )?;
                let subtitles = stmt
                    .query_map(params![video_id], subtitle_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(subtitles)
            })
            .await?;
        Ok(subtitles)
    }

    async fn get_subtitle_url_strings_for_video(&self, video_id: i64) -> Result<Vec<String>> {
        let urls = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare_cached(
                    "SELECT subtitleUrl FROM subtitle WHERE videoId = ?1 ORDER BY id",
                )?;
                let urls = stmt
                    .query_map(params![video_id], |row| row.get(0))?
                    .collect::<std::result::Result<Vec<String>, _>>()?;
                Ok(urls)
            })
            .await?;
        Ok(urls)
    }

    async fn insert_video_urls(&self, records: Vec<VideoUrl>) -> Result<()> {
        let count = records.len();
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                insert_videos(&tx, &records)?;
                tx.commit()?;
                Ok(())
            })
            .await?;
        tracing::debug!("Inserted {} video urls", count);
        Ok(())
    }

    async fn insert_subtitle_urls(&self, records: Vec<SubtitleUrl>) -> Result<()> {
        let count = records.len();
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                insert_subtitles(&tx, &records)?;
                tx.commit()?;
                Ok(())
            })
            .await?;
        tracing::debug!("Inserted {} subtitle urls", count);
        Ok(())
    }
}

fn insert_videos(tx: &Transaction, videos: &[VideoUrl]) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT OR REPLACE INTO video (id, videoUrl, watchedLength) VALUES (?1, ?2, ?3)",
    )?;
    for video in videos {
        stmt.execute(params![video.id, video.video_url, video.watched_length])?;
    }
    Ok(())
}

fn insert_subtitles(tx: &Transaction, subtitles: &[SubtitleUrl]) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT OR REPLACE INTO subtitle (id, videoId, title, subtitleUrl) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for subtitle in subtitles {
        stmt.execute(params![
            subtitle.id,
            subtitle.video_id,
            subtitle.title,
            subtitle.subtitle_url
        ])?;
    }
    Ok(())
}

fn video_from_row(row: &Row) -> rusqlite::Result<VideoUrl> {
    Ok(VideoUrl {
        id: row.get(0)?,
        video_url: row.get(1)?,
        watched_length: row.get(2)?,
    })
}

fn subtitle_from_row(row: &Row) -> rusqlite::Result<SubtitleUrl> {
    Ok(SubtitleUrl {
        id: row.get(0)?,
        video_id: row.get(1)?,
        title: row.get(2)?,
        subtitle_url: row.get(3)?,
    })
}
