use crate::{DocId, LoadError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;

/// One movie record as it appears in the snapshot's `results` array.
/// Absent fields default to zero, false or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieRecord {
    pub id: i64,
    pub adult: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub backdrop_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub genre_ids: Vec<i32>,
    pub original_language: String,
    pub original_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(deserialize_with = "null_as_default")]
    pub popularity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub poster_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub release_date: String,
    pub title: String,
    pub video: bool,
    pub vote_average: f64,
    pub vote_count: i64,
}

/// TMDB exports carry explicit `null` for missing paths; treat it like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct Snapshot {
    results: Vec<MovieRecord>,
}

/// A loaded record with its dense, load-order identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: DocId,
    #[serde(flatten)]
    pub movie: MovieRecord,
}

impl Document {
    /// Text that goes through the analyzer at index time.
    pub fn indexed_text(&self) -> String {
        format!("{} {}", self.movie.title, self.movie.overview)
    }
}

/// Append-only, immutable-after-load collection of documents addressed by `DocId`.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    docs: Vec<Document>,
}

impl DocumentStore {
    /// Read and parse a snapshot file. Either every record loads or nothing does.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)
            .map_err(|source| LoadError::Parse { origin: path.display().to_string(), source })?;
        let store = Self::from_records(snapshot.results);
        tracing::info!(path = %path.display(), num_docs = store.len(), "loaded snapshot");
        Ok(store)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let snapshot: Snapshot = serde_json::from_reader(reader)
            .map_err(|source| LoadError::Parse { origin: "<reader>".into(), source })?;
        Ok(Self::from_records(snapshot.results))
    }

    /// Assign identifiers by position: first record is 0, second is 1, and so on.
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let docs = records
            .into_iter()
            .enumerate()
            .map(|(i, movie)| Document { doc_id: i as DocId, movie })
            .collect();
        Self { docs }
    }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    /// Largest assigned identifier, `None` for an empty store.
    pub fn max_doc_id(&self) -> Option<DocId> {
        self.docs.len().checked_sub(1).map(|n| n as DocId)
    }

    pub fn get(&self, doc_id: DocId) -> Option<&Document> {
        self.docs.get(doc_id as usize)
    }

    /// Constant-time lookup.
    ///
    /// # Panics
    /// If `doc_id` is not in `[0, len)`. Ids handed out by the index are always in range.
    pub fn doc(&self, doc_id: DocId) -> &Document {
        &self.docs[doc_id as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }
}
