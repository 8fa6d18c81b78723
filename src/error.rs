use std::path::PathBuf;

use thiserror::Error;

use crate::utils::encoding::Encoding;

#[derive(Error, Debug)]
pub enum FrequencyError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to decode {} with any of [{}]", .path.display(), join_encodings(.attempted))]
    Decode {
        path: PathBuf,
        attempted: Vec<Encoding>,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid export data: {0}")]
    InvalidData(String),

    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CBOR error: {0}")]
    Cbor(#[from] serde_cbor::Error),
}

pub type Result<T> = std::result::Result<T, FrequencyError>;

fn join_encodings(encodings: &[Encoding]) -> String {
    encodings
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
