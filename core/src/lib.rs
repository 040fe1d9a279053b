//! In-memory keyword search over a movie snapshot: an analyzer, a document
//! store, an inverted index built once at startup, and bitmap-backed AND/OR
//! set algebra over its posting lists.

pub mod bitmap;
pub mod error;
pub mod index;
pub mod search;
pub mod store;
pub mod tokenizer;

pub use bitmap::Operator;
pub use error::{CapacityViolation, LoadError};
pub use index::{DocId, IndexEntry, InvertedIndex};
pub use search::SearchEngine;
pub use store::{Document, DocumentStore, MovieRecord};
pub use tokenizer::{Analyzer, AnalyzerConfig};
