use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TabletError {
    #[error("journal io error at {path}: {source}")]
    JournalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("journal line {line} is not a recorded event: {source}")]
    JournalParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("unknown charge code: {0}")]
    UnknownCharge(String),

    #[error("unknown citizen id: {0}")]
    UnknownCitizen(String),
}

pub type Result<T> = std::result::Result<T, TabletError>;
