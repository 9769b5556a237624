pub const SCHEMA: &str = r#"
-- video table
CREATE TABLE IF NOT EXISTS video (
    id INTEGER PRIMARY KEY,
    videoUrl TEXT NOT NULL,
    watchedLength INTEGER NOT NULL DEFAULT 0 CHECK (watchedLength >= 0)
);

CREATE INDEX IF NOT EXISTS idx_video_url ON video(videoUrl);

-- subtitle table, videoId is not enforced as a foreign key
CREATE TABLE IF NOT EXISTS subtitle (
    id INTEGER PRIMARY KEY,
    videoId INTEGER NOT NULL,
    title TEXT,
    subtitleUrl TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_subtitle_video_id ON subtitle(videoId);
"#;

/// Applied to file databases only; in-memory databases ignore WAL.
pub const WAL_PRAGMAS: &str = r#"
PRAGMA journal_mode=WAL;
PRAGMA synchronous=NORMAL;
"#;
