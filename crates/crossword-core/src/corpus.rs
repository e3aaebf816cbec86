//! Clue corpus: the pool words are sampled from and the source of clue text

use crate::error::CorpusError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Corpus bundled with the crate
const EMBEDDED_CORPUS: &str = include_str!("../data/words.json");

/// A single word with its clue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueEntry {
    pub word: String,
    pub clue: String,
}

impl ClueEntry {
    pub fn new(word: &str, clue: &str) -> Self {
        Self {
            word: word.to_string(),
            clue: clue.to_string(),
        }
    }
}

/// Ordered list of clue entries, indexed by lower-cased word
#[derive(Debug, Clone)]
pub struct ClueCorpus {
    entries: Vec<ClueEntry>,
    index: HashMap<String, usize>,
}

impl ClueCorpus {
    /// Build a corpus, skipping unusable entries.
    ///
    /// Words are lower-cased; empty or non-alphabetic words are dropped and
    /// later duplicates of a word are ignored.
    pub fn new(entries: Vec<ClueEntry>) -> Result<Self, CorpusError> {
        let mut kept = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for entry in entries {
            let word = entry.word.trim().to_lowercase();
            if word.is_empty() || !word.chars().all(char::is_alphabetic) {
                warn!(word = %entry.word, "skipping corpus entry that is not a plain word");
                continue;
            }
            if index.contains_key(&word) {
                warn!(%word, "skipping duplicate corpus entry");
                continue;
            }
            index.insert(word.clone(), kept.len());
            kept.push(ClueEntry {
                word,
                clue: entry.clue,
            });
        }

        if kept.is_empty() {
            return Err(CorpusError::Empty);
        }

        Ok(Self {
            entries: kept,
            index,
        })
    }

    /// The corpus compiled into the crate
    pub fn embedded() -> Result<Self, CorpusError> {
        Self::from_json(EMBEDDED_CORPUS)
    }

    /// Parse a `[{"word": ..., "clue": ...}]` document
    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let entries: Vec<ClueEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CorpusError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ClueEntry] {
        &self.entries
    }

    /// Pick `count` distinct words uniformly at random, in random order.
    /// A corpus smaller than `count` yields every word.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<String> {
        let mut words: Vec<String> = self
            .entries
            .choose_multiple(rng, count)
            .map(|entry| entry.word.clone())
            .collect();
        words.shuffle(rng);
        words
    }

    /// Case-insensitive clue lookup
    pub fn clue_for(&self, answer: &str) -> Option<&str> {
        self.index
            .get(&answer.to_lowercase())
            .map(|&i| self.entries[i].clue.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn small_corpus() -> ClueCorpus {
        ClueCorpus::new(vec![
            ClueEntry::new("Cat", "Feline pet"),
            ClueEntry::new("dog", "Canine pet"),
            ClueEntry::new("owl", "Night bird"),
            ClueEntry::new("cat", "Duplicate entry"),
            ClueEntry::new("x-ray", "Not a plain word"),
            ClueEntry::new("", "Empty"),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_filters_and_lowercases() {
        let corpus = small_corpus();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.entries()[0].word, "cat");
        assert_eq!(corpus.clue_for("cat"), Some("Feline pet"));
    }

    #[test]
    fn test_clue_lookup_is_case_insensitive() {
        let corpus = small_corpus();
        assert_eq!(corpus.clue_for("DOG"), Some("Canine pet"));
        assert_eq!(corpus.clue_for("bat"), None);
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let result = ClueCorpus::new(vec![ClueEntry::new("12", "digits")]);
        assert!(matches!(result, Err(CorpusError::Empty)));
    }

    #[test]
    fn test_sample_without_replacement() {
        let corpus = ClueCorpus::embedded().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let words = corpus.sample(15, &mut rng);
        assert_eq!(words.len(), 15);
        let unique: HashSet<_> = words.iter().collect();
        assert_eq!(unique.len(), 15);
        assert!(words.iter().all(|w| corpus.clue_for(w).is_some()));
    }

    #[test]
    fn test_sample_more_than_available() {
        let corpus = small_corpus();
        let mut rng = StdRng::seed_from_u64(1);
        let mut words = corpus.sample(10, &mut rng);
        words.sort();
        assert_eq!(words, vec!["cat", "dog", "owl"]);
    }

    #[test]
    fn test_sample_is_reproducible_with_seed() {
        let corpus = ClueCorpus::embedded().unwrap();
        let a = corpus.sample(5, &mut StdRng::seed_from_u64(99));
        let b = corpus.sample(5, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            ClueCorpus::from_json("{not json"),
            Err(CorpusError::Json(_))
        ));
    }
}
