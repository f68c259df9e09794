// occupancy.rs - How many reads of each sample fall into each family

use serde::Serialize;

use crate::core::FamilySet;
use crate::data::SourceCorpora;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occupancy {
    pub sample: String,
    pub family: usize,
    /// Reads of the sample whose sequence is a member of the family
    pub reads: u64,
    /// `reads` relative to all reads of the sample
    pub fraction: f64,
}

/// Occupancy of every family in every sample, ordered by sample (input
/// order) then family id. Families absent from a sample get a zero row.
pub fn family_occupancy(families: &FamilySet, sources: &SourceCorpora) -> Vec<Occupancy> {
    let mut rows = Vec::with_capacity(sources.per_source.len() * families.len());

    for (sample, corpus) in &sources.per_source {
        let total = corpus.total_records();
        for family in families.iter() {
            let reads: u64 = family
                .member_sequences()
                .filter_map(|sequence| corpus.count(sequence))
                .sum();
            rows.push(Occupancy {
                sample: sample.clone(),
                family: family.id,
                reads,
                fraction: if total == 0 {
                    0.0
                } else {
                    reads as f64 / total as f64
                },
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::build_families;
    use crate::data::SampleReads;
    use std::path::PathBuf;

    fn sample(name: &str, sequences: &[&str]) -> SampleReads {
        SampleReads {
            name: name.to_string(),
            path: PathBuf::from(name),
            sequences: sequences.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_occupancy_per_sample() {
        let samples = vec![
            sample("R00", &["AAAA", "AAAA", "AAAT", "TTTT"]),
            sample("R01", &["AAAA", "GGGG"]),
        ];
        let sources = SourceCorpora::aggregate(&samples);
        let eligible = sources.combined.filter_min_occurrence(1);
        let families = build_families(&eligible, 2, 1).unwrap();

        // Family 1 = {AAAA, AAAT}; family 2 is seeded by GGGG or TTTT (1 read each)
        let rows = family_occupancy(&families, &sources);
        assert_eq!(rows.len(), 4);

        assert_eq!(rows[0].sample, "R00");
        assert_eq!(rows[0].family, 1);
        assert_eq!(rows[0].reads, 3);
        assert!((rows[0].fraction - 0.75).abs() < 1e-12);

        assert_eq!(rows[2].sample, "R01");
        assert_eq!(rows[2].reads, 1);
        assert!((rows[2].fraction - 0.5).abs() < 1e-12);

        // Family 2 reference is GGGG (tie with TTTT broken lexicographically)
        assert_eq!(rows[1].reads, 0);
        assert_eq!(rows[3].reads, 1);
    }
}
