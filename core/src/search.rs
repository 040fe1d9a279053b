use crate::bitmap::{Operator, SetAlgebra};
use crate::index::InvertedIndex;
use crate::store::{Document, DocumentStore};
use crate::tokenizer::{Analyzer, AnalyzerConfig};
use crate::{CapacityViolation, LoadError};
use std::path::Path;

/// Query entry point: owns the analyzer, the document store and the index built from them.
/// Immutable once constructed, so it can be shared behind an `Arc` without locking.
#[derive(Debug)]
pub struct SearchEngine {
    analyzer: Analyzer,
    store: DocumentStore,
    index: InvertedIndex,
    algebra: SetAlgebra,
}

impl SearchEngine {
    /// Load a snapshot and build the index over it.
    pub fn open<P: AsRef<Path>>(path: P, config: AnalyzerConfig) -> Result<Self, LoadError> {
        let store = DocumentStore::load(path)?;
        Ok(Self::new(store, Analyzer::new(config)))
    }

    pub fn new(store: DocumentStore, analyzer: Analyzer) -> Self {
        let index = InvertedIndex::build(&store, &analyzer);
        // Every id the index can hand out is below store.len().
        let algebra = SetAlgebra::new(store.len());
        Self { analyzer, store, index, algebra }
    }

    /// Documents containing every known query term.
    pub fn intersection(&self, query: &str) -> Result<Vec<&Document>, CapacityViolation> {
        self.search(query, Operator::And)
    }

    /// Documents containing at least one query term.
    pub fn union(&self, query: &str) -> Result<Vec<&Document>, CapacityViolation> {
        self.search(query, Operator::Or)
    }

    pub fn search(&self, query: &str, op: Operator) -> Result<Vec<&Document>, CapacityViolation> {
        let ids = self.algebra.fold(self.analyzer.analyze(query).map(|t| self.index.postings(&t)), op)?;
        tracing::debug!(query, ?op, hits = ids.len(), "search");
        Ok(ids.into_iter().map(|id| self.store.doc(id)).collect())
    }

    /// Corpus-wide occurrence count of `word` after analysis. Words that analyze to nothing count 0.
    pub fn word_frequency(&self, word: &str) -> u32 {
        self.analyzer.analyze(word).next().map_or(0, |t| self.index.word_frequency(&t))
    }

    pub fn store(&self) -> &DocumentStore { &self.store }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn analyzer(&self) -> &Analyzer { &self.analyzer }
}
