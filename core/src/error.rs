use crate::DocId;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a snapshot into a document store. Fatal to startup.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A document id fell outside the bitmap sized for the corpus.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("document id {doc_id} exceeds bitmap capacity {capacity}")]
pub struct CapacityViolation {
    pub doc_id: DocId,
    pub capacity: usize,
}
