use crate::store::DocumentStore;
use crate::tokenizer::Analyzer;
use std::collections::HashMap;
use std::time::Instant;

pub type DocId = u32;

/// Per-term record. `frequency` counts every occurrence across the corpus,
/// `postings` lists each containing document once, in increasing id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntry {
    pub frequency: u32,
    pub postings: Vec<DocId>,
}

/// Term -> entry map. Built once from a document store, read-only afterwards.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    entries: HashMap<String, IndexEntry>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Single pass over the store in id order. Terms of one document are
    /// processed contiguously, so checking the last posting is enough to
    /// keep the lists duplicate-free.
    pub fn build(store: &DocumentStore, analyzer: &Analyzer) -> Self {
        let start = Instant::now();
        let mut index = Self::new();
        for doc in store.iter() {
            let text = doc.indexed_text();
            for term in analyzer.analyze(&text) {
                index.add_occurrence(term, doc.doc_id);
            }
        }
        tracing::info!(
            num_docs = store.len(),
            num_terms = index.num_terms(),
            took_ms = start.elapsed().as_millis() as u64,
            "built inverted index"
        );
        index
    }

    fn add_occurrence(&mut self, term: String, doc_id: DocId) {
        let entry = self.entries.entry(term).or_default();
        entry.frequency += 1;
        if entry.postings.last() != Some(&doc_id) {
            entry.postings.push(doc_id);
        }
    }

    /// Total occurrences of an already-normalized term; 0 if never indexed.
    pub fn word_frequency(&self, term: &str) -> u32 {
        self.entries.get(term).map_or(0, |e| e.frequency)
    }

    pub fn postings(&self, term: &str) -> Option<&[DocId]> {
        self.entries.get(term).map(|e| e.postings.as_slice())
    }

    pub fn entry(&self, term: &str) -> Option<&IndexEntry> { self.entries.get(term) }

    pub fn num_terms(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Highest-frequency terms first; ties broken alphabetically.
    pub fn top_terms(&self, n: usize) -> Vec<(&str, u32)> {
        let mut terms: Vec<(&str, u32)> = self.entries.iter().map(|(t, e)| (t.as_str(), e.frequency)).collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(n);
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MovieRecord;
    use crate::tokenizer::AnalyzerConfig;

    fn movie(title: &str, overview: &str) -> MovieRecord {
        MovieRecord { title: title.into(), overview: overview.into(), ..Default::default() }
    }

    fn plain() -> Analyzer {
        Analyzer::new(AnalyzerConfig { remove_stopwords: false, stem: false, min_token_len: 1 })
    }

    #[test]
    fn repeated_term_counts_frequency_but_posts_once() {
        let store = DocumentStore::from_records(vec![
            movie("Kong", "kong kong everywhere"),
            movie("Other", "nothing here"),
            movie("Return of Kong", ""),
        ]);
        let index = InvertedIndex::build(&store, &plain());
        assert_eq!(index.postings("kong"), Some(&[0, 2][..]));
        assert_eq!(index.word_frequency("kong"), 4);
        assert_eq!(index.word_frequency("everywhere"), 1);
    }

    #[test]
    fn unknown_term_has_zero_frequency() {
        let store = DocumentStore::from_records(vec![movie("Dune", "desert planet")]);
        let index = InvertedIndex::build(&store, &plain());
        assert_eq!(index.word_frequency("godzilla"), 0);
        assert!(index.postings("godzilla").is_none());
    }

    #[test]
    fn postings_are_strictly_increasing() {
        let store = DocumentStore::from_records(
            (0..50).map(|i| movie(if i % 3 == 0 { "alpha beta" } else { "beta" }, "beta gamma beta")).collect(),
        );
        let index = InvertedIndex::build(&store, &plain());
        for term in ["alpha", "beta", "gamma"] {
            let p = index.postings(term).unwrap();
            assert!(p.windows(2).all(|w| w[0] < w[1]), "{term} not increasing");
        }
        assert_eq!(index.postings("beta").unwrap().len(), 50);
        assert_eq!(index.postings("alpha").unwrap().len(), 17);
    }

    #[test]
    fn title_and_overview_do_not_fuse() {
        let store = DocumentStore::from_records(vec![movie("Dune", "Paul")]);
        let index = InvertedIndex::build(&store, &plain());
        assert!(index.postings("dunepaul").is_none());
        assert!(index.postings("dune").is_some());
        assert!(index.postings("paul").is_some());
    }

    #[test]
    fn top_terms_orders_by_frequency_then_term() {
        let store = DocumentStore::from_records(vec![movie("b a", "a c b a")]);
        let index = InvertedIndex::build(&store, &plain());
        assert_eq!(index.top_terms(2), vec![("a", 3), ("b", 2)]);
        assert_eq!(index.top_terms(10).len(), 3);
    }
}
