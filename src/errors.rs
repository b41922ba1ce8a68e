use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top level error for loading or converting gamepack artifacts. Every
/// variant carries the path of the artifact that failed so a caller working
/// through several matches can report which file was at fault.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

impl Error {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn decode(path: &Path, source: DecodeError) -> Self {
        Error::Decode {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// An artifact's structure did not match the expected shape: wrong record
/// arity, wrong field type, missing metadata key, or an unresolvable period
/// id.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed msgpack record: {0}")]
    Msgpack(#[from] rmp_serde::decode::Error),

    #[error("malformed metadata document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("metadata document contains no entries")]
    EmptyMetadata,

    #[error("period object has no single-digit key in '0'..='5'")]
    UnresolvedPeriodId,

    #[error("period key {0:?} is not an integer")]
    InvalidPeriodKey(String),
}
