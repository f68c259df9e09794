// profile.rs - Length distribution and per-position symbol profiles

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::{Family, FamilySet};
use crate::data::{Corpus, SequenceCount, SourceCorpora};

/// Alphabet size used for positional entropy (nucleotides)
const NUCLEOTIDE_BASE: f64 = 4.0;

/// Read-weighted length histogram of a family: length -> number of reads
pub fn length_distribution(family: &Family) -> BTreeMap<usize, u64> {
    weighted_lengths(family, |member| member.count)
}

fn weighted_lengths<W>(family: &Family, weight: W) -> BTreeMap<usize, u64>
where
    W: Fn(&SequenceCount) -> u64,
{
    let mut lengths = BTreeMap::new();
    for member in &family.members {
        let reads = weight(member);
        if reads > 0 {
            *lengths.entry(member.sequence.len()).or_insert(0) += reads;
        }
    }
    lengths
}

/// Most frequent length; ties go to the shorter length
pub fn dominant_length(lengths: &BTreeMap<usize, u64>) -> Option<usize> {
    lengths
        .iter()
        .max_by(|(len_a, count_a), (len_b, count_b)| {
            count_a.cmp(count_b).then_with(|| len_b.cmp(len_a))
        })
        .map(|(&len, _)| len)
}

/// Symbol counts at every position of the family's dominant-length reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionalProfile {
    pub family: usize,
    /// Sample whose reads were profiled; `None` for all samples together
    pub sample: Option<String>,
    pub length: usize,
    /// Label of the first position
    pub offset: usize,
    /// Number of reads profiled
    pub sequences: u64,
    pub counts: Vec<BTreeMap<u8, u64>>,
}

impl PositionalProfile {
    /// Profile built from the reads (weighted by count) whose length equals
    /// the family's dominant length. `None` for an empty family.
    pub fn from_family(family: &Family, offset: usize) -> Option<Self> {
        Self::weighted(family, None, offset, |member| member.count)
    }

    /// Same as `from_family`, but members are weighted by their counts in one
    /// sample, and the dominant length is taken over that sample's reads.
    /// `None` when the sample holds no read of the family.
    pub fn from_family_in_sample(
        family: &Family,
        sample: &str,
        corpus: &Corpus,
        offset: usize,
    ) -> Option<Self> {
        Self::weighted(family, Some(sample.to_string()), offset, |member| {
            corpus.count(&member.sequence).unwrap_or(0)
        })
    }

    fn weighted<W>(
        family: &Family,
        sample: Option<String>,
        offset: usize,
        weight: W,
    ) -> Option<Self>
    where
        W: Fn(&SequenceCount) -> u64,
    {
        let length = dominant_length(&weighted_lengths(family, &weight))?;
        let mut counts = vec![BTreeMap::new(); length];
        let mut sequences = 0;

        for member in family.members.iter().filter(|m| m.sequence.len() == length) {
            let reads = weight(member);
            if reads == 0 {
                continue;
            }
            for (position, &symbol) in member.sequence.as_bytes().iter().enumerate() {
                *counts[position].entry(symbol).or_insert(0) += reads;
            }
            sequences += reads;
        }

        Some(Self {
            family: family.id,
            sample,
            length,
            offset,
            sequences,
            counts,
        })
    }

    /// `(position label, symbol, count)` rows, positions ascending and symbols
    /// in byte order
    pub fn rows(&self) -> impl Iterator<Item = (usize, char, u64)> + '_ {
        self.counts.iter().enumerate().flat_map(move |(i, symbols)| {
            symbols
                .iter()
                .map(move |(&symbol, &count)| (i + self.offset, symbol as char, count))
        })
    }

    /// Expected number of differing positions between two reads drawn
    /// without replacement. `None` with fewer than two reads.
    pub fn mean_pairwise_difference(&self) -> Option<f64> {
        let n = self.sequences;
        if n < 2 {
            return None;
        }

        let pairs = (n * (n - 1)) as f64;
        let identical: f64 = self
            .counts
            .iter()
            .flat_map(|symbols| symbols.values())
            .map(|&c| (c * c.saturating_sub(1)) as f64 / pairs)
            .sum();

        Some(self.length as f64 - identical)
    }

    /// Shannon entropy (base 4) of the symbol distribution at each position,
    /// as `(position label, entropy)`
    pub fn position_entropy(&self) -> Vec<(usize, f64)> {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, symbols)| {
                let total: u64 = symbols.values().sum();
                let entropy = if total == 0 {
                    0.0
                } else {
                    symbols
                        .values()
                        .filter(|&&c| c > 0)
                        .map(|&c| {
                            let p = c as f64 / total as f64;
                            -p * p.log(NUCLEOTIDE_BASE)
                        })
                        .sum()
                };
                (i + self.offset, entropy)
            })
            .collect()
    }
}

/// Per-sample profiles of every family, ordered by family id then sample
/// (input order). Samples without reads of a family are skipped.
pub fn sample_profiles(
    families: &FamilySet,
    sources: &SourceCorpora,
    offset: usize,
) -> Vec<PositionalProfile> {
    families
        .iter()
        .flat_map(|family| {
            sources.per_source.iter().filter_map(move |(sample, corpus)| {
                PositionalProfile::from_family_in_sample(family, sample, corpus, offset)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::build_families;
    use crate::data::SampleReads;
    use std::path::PathBuf;

    fn family(members: &[(&str, u64)]) -> Family {
        let members: Vec<SequenceCount> = members
            .iter()
            .map(|(s, c)| SequenceCount::new(*s, *c))
            .collect();
        Family {
            id: 7,
            reference: members[0].clone(),
            members,
        }
    }

    #[test]
    fn test_length_distribution_is_read_weighted() {
        let fam = family(&[("ACGT", 5), ("ACG", 2), ("ACGA", 1)]);
        let lengths = length_distribution(&fam);
        assert_eq!(lengths.get(&4), Some(&6));
        assert_eq!(lengths.get(&3), Some(&2));
        assert_eq!(dominant_length(&lengths), Some(4));
    }

    #[test]
    fn test_dominant_length_tie_prefers_shorter() {
        let fam = family(&[("ACGT", 2), ("ACG", 2)]);
        assert_eq!(dominant_length(&length_distribution(&fam)), Some(3));
    }

    #[test]
    fn test_profile_counts_and_rows() {
        let fam = family(&[("AC", 3), ("AG", 1), ("A", 1)]);
        let profile = PositionalProfile::from_family(&fam, 24).unwrap();

        assert_eq!(profile.family, 7);
        assert_eq!(profile.length, 2);
        assert_eq!(profile.sequences, 4);

        let rows: Vec<(usize, char, u64)> = profile.rows().collect();
        assert_eq!(rows, vec![(24, 'A', 4), (25, 'C', 3), (25, 'G', 1)]);
    }

    #[test]
    fn test_mean_pairwise_difference() {
        // Identical reads never differ
        let same = PositionalProfile::from_family(&family(&[("ACGT", 10)]), 1).unwrap();
        assert!(same.mean_pairwise_difference().unwrap().abs() < 1e-12);

        // Two reads differing at one position
        let pair = PositionalProfile::from_family(&family(&[("ACGT", 1), ("ACGA", 1)]), 1).unwrap();
        assert!((pair.mean_pairwise_difference().unwrap() - 1.0).abs() < 1e-12);

        let single = PositionalProfile::from_family(&family(&[("ACGT", 1)]), 1).unwrap();
        assert_eq!(single.mean_pairwise_difference(), None);
    }

    #[test]
    fn test_position_entropy() {
        let fam = family(&[("AA", 1), ("AC", 1), ("AG", 1), ("AT", 1)]);
        let profile = PositionalProfile::from_family(&fam, 1).unwrap();
        let entropy = profile.position_entropy();

        assert_eq!(entropy[0].0, 1);
        assert!(entropy[0].1.abs() < 1e-12);
        assert!((entropy[1].1 - 1.0).abs() < 1e-12);
    }

    fn sources() -> SourceCorpora {
        let sample = |name: &str, reads: &[&str]| SampleReads {
            name: name.to_string(),
            path: PathBuf::from(format!("{}.fas", name)),
            sequences: reads.iter().map(|s| s.to_string()).collect(),
        };
        SourceCorpora::aggregate(&[
            sample("R00", &["ACGT", "ACGT", "ACGT", "ACGA"]),
            sample("R01", &["ACGA", "ACGA", "ACG", "ACG", "ACG", "TTTT"]),
        ])
    }

    #[test]
    fn test_sample_profile_uses_sample_counts() {
        let sources = sources();
        let families = build_families(&sources.combined, 1, 1).unwrap();
        let family = &families.families[0];
        let r00 = sources.source("R00").unwrap();

        let profile = PositionalProfile::from_family_in_sample(family, "R00", r00, 1).unwrap();
        assert_eq!(profile.sample.as_deref(), Some("R00"));
        assert_eq!(profile.length, 4);
        assert_eq!(profile.sequences, 4);
        let last: Vec<(usize, char, u64)> = profile.rows().filter(|r| r.0 == 4).collect();
        assert_eq!(last, vec![(4, 'A', 1), (4, 'T', 3)]);
        // 3 T and 1 A at the last position: 1 - (3*2)/(4*3)
        assert!((profile.mean_pairwise_difference().unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sample_dominant_length_is_per_sample() {
        let sources = sources();
        let families = build_families(&sources.combined, 1, 1).unwrap();
        let family = &families.families[0];

        // Across all samples length 4 dominates, R01 alone is mostly length 3
        assert_eq!(PositionalProfile::from_family(family, 1).unwrap().length, 4);
        let r01 = sources.source("R01").unwrap();
        let profile = PositionalProfile::from_family_in_sample(family, "R01", r01, 1).unwrap();
        assert_eq!(profile.length, 3);
        assert_eq!(profile.sequences, 3);
        assert!(profile.mean_pairwise_difference().unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_sample_profiles_skip_absent_samples() {
        let sources = sources();
        let families = build_families(&sources.combined, 2, 1).unwrap();

        let profiles = sample_profiles(&families, &sources, 1);
        let keys: Vec<(usize, &str)> = profiles
            .iter()
            .map(|p| (p.family, p.sample.as_deref().unwrap_or("")))
            .collect();
        // Family 2 is TTTT, only seen in R01
        assert_eq!(keys, vec![(1, "R00"), (1, "R01"), (2, "R01")]);
    }
}
