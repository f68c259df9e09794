// corpus.rs - Sequence occurrence counting and threshold filtering

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::data::SampleReads;

/// A distinct sequence together with the number of times it was observed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceCount {
    pub sequence: String,
    pub count: u64,
}

impl SequenceCount {
    pub fn new(sequence: impl Into<String>, count: u64) -> Self {
        Self {
            sequence: sequence.into(),
            count,
        }
    }

    /// Ordering used everywhere a list of counts is emitted: highest count
    /// first, ties by ascending sequence.
    pub fn by_abundance(a: &SequenceCount, b: &SequenceCount) -> Ordering {
        b.count
            .cmp(&a.count)
            .then_with(|| a.sequence.cmp(&b.sequence))
    }
}

/// Sequence -> occurrence count over a set of raw records.
///
/// `total_records` always equals the sum of all counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    counts: HashMap<String, u64>,
    total_records: u64,
}

/// Corpus restricted to sequences that reach the occurrence threshold
pub type EligibleSet = Corpus;

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every record; duplicates are accumulated
    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut corpus = Self::new();
        for record in records {
            corpus.add(record.as_ref());
        }
        corpus
    }

    /// Build a corpus from already aggregated `(sequence, count)` pairs.
    /// Zero counts are dropped and repeated sequences are summed.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut corpus = Self::new();
        for (sequence, count) in counts {
            corpus.add_count(sequence, count);
        }
        corpus
    }

    pub fn add(&mut self, sequence: &str) {
        if let Some(count) = self.counts.get_mut(sequence) {
            *count += 1;
        } else {
            self.counts.insert(sequence.to_string(), 1);
        }
        self.total_records += 1;
    }

    pub fn add_count(&mut self, sequence: impl Into<String>, count: u64) {
        if count == 0 {
            return;
        }
        *self.counts.entry(sequence.into()).or_insert(0) += count;
        self.total_records += count;
    }

    /// Fold another corpus into this one
    pub fn merge(&mut self, other: &Corpus) {
        for (sequence, &count) in &other.counts {
            self.add_count(sequence.clone(), count);
        }
    }

    /// Keep only sequences with `count >= min_occurrence`
    pub fn filter_min_occurrence(&self, min_occurrence: u64) -> EligibleSet {
        let counts: HashMap<String, u64> = self
            .counts
            .iter()
            .filter(|(_, count)| **count >= min_occurrence)
            .map(|(sequence, &count)| (sequence.clone(), count))
            .collect();
        let total_records = counts.values().sum();
        Self {
            counts,
            total_records,
        }
    }

    pub fn count(&self, sequence: &str) -> Option<u64> {
        self.counts.get(sequence).copied()
    }

    pub fn contains(&self, sequence: &str) -> bool {
        self.counts.contains_key(sequence)
    }

    /// Number of distinct sequences
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(s, &c)| (s.as_str(), c))
    }

    pub fn longest_sequence_len(&self) -> usize {
        self.counts.keys().map(|s| s.len()).max().unwrap_or(0)
    }

    /// All entries, most abundant first
    pub fn sorted_entries(&self) -> Vec<SequenceCount> {
        let mut entries: Vec<SequenceCount> = self
            .counts
            .iter()
            .map(|(s, &c)| SequenceCount::new(s.clone(), c))
            .collect();
        entries.sort_unstable_by(SequenceCount::by_abundance);
        entries
    }

    pub(crate) fn as_map(&self) -> &HashMap<String, u64> {
        &self.counts
    }
}

/// Per-sample corpora together with their combined corpus
#[derive(Debug, Clone, Default)]
pub struct SourceCorpora {
    pub per_source: Vec<(String, Corpus)>,
    pub combined: Corpus,
}

impl SourceCorpora {
    /// Aggregate every sample independently (in parallel), then merge them
    pub fn aggregate(samples: &[SampleReads]) -> Self {
        let per_source: Vec<(String, Corpus)> = samples
            .par_iter()
            .map(|sample| (sample.name.clone(), Corpus::from_records(&sample.sequences)))
            .collect();

        let mut combined = Corpus::new();
        for (_, corpus) in &per_source {
            combined.merge(corpus);
        }

        Self {
            per_source,
            combined,
        }
    }

    pub fn source(&self, name: &str) -> Option<&Corpus> {
        self.per_source
            .iter()
            .find(|(source, _)| source == name)
            .map(|(_, corpus)| corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample(name: &str, sequences: &[&str]) -> SampleReads {
        SampleReads {
            name: name.to_string(),
            path: PathBuf::from(format!("{}.fas", name)),
            sequences: sequences.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_from_records_counts_duplicates() {
        let corpus = Corpus::from_records(["ACGT", "ACGT", "TTTT", "ACGT"]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.count("ACGT"), Some(3));
        assert_eq!(corpus.count("TTTT"), Some(1));
        assert_eq!(corpus.count("GGGG"), None);
        assert_eq!(corpus.total_records(), 4);
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let a = Corpus::from_records(["A", "B", "A", "C"]);
        let b = Corpus::from_records(["C", "A", "B", "A"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_filter_is_inclusive() {
        let corpus = Corpus::from_counts([("AAAA", 5), ("AAAT", 3), ("TTTT", 2)]);
        let eligible = corpus.filter_min_occurrence(3);
        assert_eq!(eligible.len(), 2);
        assert!(eligible.contains("AAAA"));
        assert!(eligible.contains("AAAT"));
        assert!(!eligible.contains("TTTT"));
        assert_eq!(eligible.total_records(), 8);
    }

    #[test]
    fn test_filter_can_empty_the_set() {
        let corpus = Corpus::from_records(["A", "C"]);
        let eligible = corpus.filter_min_occurrence(1000);
        assert!(eligible.is_empty());
        assert_eq!(eligible.total_records(), 0);
    }

    #[test]
    fn test_from_counts_drops_zero_and_sums() {
        let corpus = Corpus::from_counts([("A", 2), ("B", 0), ("A", 3)]);
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.count("A"), Some(5));
        assert_eq!(corpus.total_records(), 5);
    }

    #[test]
    fn test_sorted_entries_breaks_ties_lexicographically() {
        let corpus = Corpus::from_counts([("TT", 2), ("AA", 2), ("CC", 7)]);
        let entries = corpus.sorted_entries();
        let order: Vec<&str> = entries.iter().map(|e| e.sequence.as_str()).collect();
        assert_eq!(order, vec!["CC", "AA", "TT"]);
    }

    #[test]
    fn test_source_corpora_combined_matches_concatenation() {
        let samples = vec![
            sample("R00", &["ACGT", "ACGT", "TTTT"]),
            sample("R01", &["ACGT", "GGGG"]),
        ];
        let sources = SourceCorpora::aggregate(&samples);

        assert_eq!(sources.per_source.len(), 2);
        assert_eq!(sources.per_source[0].0, "R00");
        assert_eq!(sources.source("R01").and_then(|c| c.count("GGGG")), Some(1));

        let flat = Corpus::from_records(["ACGT", "ACGT", "TTTT", "ACGT", "GGGG"]);
        assert_eq!(sources.combined, flat);
        assert_eq!(sources.combined.total_records(), 5);
    }
}
