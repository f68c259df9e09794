// diversity.rs - Family sizes, member frequencies and Shannon entropy

use serde::Serialize;

use crate::core::{Family, FamilySet};
use crate::data::SequenceCount;

/// Distinct and total (read-weighted) size of a family
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilySize {
    pub id: usize,
    pub distinct: usize,
    pub total: u64,
}

/// Relative abundance of one member inside its family
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceFrequency {
    pub sequence: String,
    pub count: u64,
    pub frequency: f64,
}

pub fn family_sizes(families: &FamilySet) -> Vec<FamilySize> {
    families
        .iter()
        .map(|f| FamilySize {
            id: f.id,
            distinct: f.distinct_len(),
            total: f.expanded_len(),
        })
        .collect()
}

/// Member frequencies relative to the family's read total, most frequent first
pub fn sequence_frequencies(family: &Family) -> Vec<SequenceFrequency> {
    let total = family.expanded_len();
    let mut members: Vec<&SequenceCount> = family.members.iter().collect();
    members.sort_unstable_by(|a, b| SequenceCount::by_abundance(a, b));

    members
        .into_iter()
        .map(|m| SequenceFrequency {
            sequence: m.sequence.clone(),
            count: m.count,
            frequency: if total == 0 {
                0.0
            } else {
                m.count as f64 / total as f64
            },
        })
        .collect()
}

/// Shannon entropy of the member distribution, normalised to [0, 1].
///
/// The logarithm base is the number of distinct members, so a family whose
/// reads are spread evenly over its members scores 1. Single-member families
/// score 0.
pub fn shannon_entropy(family: &Family) -> f64 {
    let distinct = family.distinct_len();
    let total = family.expanded_len();
    if distinct < 2 || total == 0 {
        return 0.0;
    }

    let log_base = (distinct as f64).ln();
    family
        .members
        .iter()
        .filter(|m| m.count > 0)
        .map(|m| {
            let p = m.count as f64 / total as f64;
            -p * p.ln() / log_base
        })
        .sum()
}
