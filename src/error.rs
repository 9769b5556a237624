use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Store is unavailable: connection closed")]
    Unavailable,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<tokio_rusqlite::Error> for StoreError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        match err {
            tokio_rusqlite::Error::Rusqlite(e) => StoreError::Database(e),
            tokio_rusqlite::Error::ConnectionClosed => StoreError::Unavailable,
            other => StoreError::Connection(other.to_string()),
        }
    }
}

impl StoreError {
    /// True when SQLite rejected a write because of a table constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Database(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_connection_maps_to_unavailable() {
        let err: StoreError = tokio_rusqlite::Error::ConnectionClosed.into();
        assert!(matches!(err, StoreError::Unavailable));
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn rusqlite_errors_keep_their_source() {
        let err: StoreError =
            tokio_rusqlite::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows).into();
        assert!(matches!(
            err,
            StoreError::Database(rusqlite::Error::QueryReturnedNoRows)
        ));
    }

    #[test]
    fn constraint_failures_are_recognized() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (x TEXT NOT NULL);").unwrap();
        let err: StoreError = conn
            .execute("INSERT INTO t (x) VALUES (NULL)", [])
            .unwrap_err()
            .into();
        assert!(err.is_constraint_violation());
    }
}
