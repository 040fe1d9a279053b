use lazy_static::lazy_static;
use regex::{Matches, Regex};
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{M}\p{N}_']*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Knobs for the analyzer. Corpus and queries must go through the same configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub remove_stopwords: bool,
    pub stem: bool,
    /// Tokens shorter than this (in chars, after normalization) are dropped.
    pub min_token_len: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { remove_stopwords: true, stem: true, min_token_len: 1 }
    }
}

/// Turns free text into index terms: NFKC normalization, lowercase, optional stopword removal and stemming.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self { Self { config } }

    pub fn config(&self) -> &AnalyzerConfig { &self.config }

    /// Lazily yields the terms of `text`. Calling this again on the same text restarts the sequence.
    pub fn analyze<'a>(&'a self, text: &'a str) -> Terms<'a> {
        let re: &'static Regex = &RE;
        Terms { matches: re.find_iter(text), analyzer: self }
    }

    fn normalize(&self, raw: &str) -> Option<String> {
        let token = raw.nfkc().collect::<String>().to_lowercase();
        if token.chars().count() < self.config.min_token_len { return None; }
        if self.config.remove_stopwords && is_stopword(&token) { return None; }
        let term = if self.config.stem { STEMMER.stem(&token).into_owned() } else { token };
        if term.is_empty() { None } else { Some(term) }
    }
}

/// Iterator returned by [`Analyzer::analyze`].
pub struct Terms<'a> {
    matches: Matches<'static, 'a>,
    analyzer: &'a Analyzer,
}

impl Iterator for Terms<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let analyzer = self.analyzer;
        self.matches.by_ref().find_map(|m| analyzer.normalize(m.as_str()))
    }
}

/// Tokenize text with the default analyzer.
pub fn tokenize(text: &str) -> Vec<String> {
    Analyzer::default().analyze(text).collect()
}
