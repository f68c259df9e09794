// summary.rs - JSON summary of one clustering run

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::{FamilyParams, FamilySet};
use crate::data::SequenceCount;

#[derive(Debug, Clone, Serialize)]
pub struct FamilySummary {
    pub id: usize,
    pub reference: SequenceCount,
    pub distinct_members: usize,
    pub total_reads: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleSummary {
    pub name: String,
    pub path: String,
    pub reads: u64,
    pub distinct_sequences: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub version: String,
    pub generated: String,
    pub command: String,
    pub params: FamilyParams,
    pub min_occurrence: u64,
    pub samples: Vec<SampleSummary>,
    pub total_reads: u64,
    pub distinct_sequences: usize,
    pub eligible_sequences: usize,
    pub eligible_reads: u64,
    pub families: Vec<FamilySummary>,
    pub unassigned_sequences: usize,
    pub cancelled: bool,
    pub elapsed_seconds: f64,
}

impl RunSummary {
    pub fn family_summaries(families: &FamilySet) -> Vec<FamilySummary> {
        families
            .iter()
            .map(|f| FamilySummary {
                id: f.id,
                reference: f.reference.clone(),
                distinct_members: f.distinct_len(),
                total_reads: f.expanded_len(),
            })
            .collect()
    }
}

pub fn write_summary(file_path: &Path, summary: &RunSummary) -> Result<(), String> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            format!("Failed to create parent directory '{}': {}", parent.display(), e)
        })?;
    }

    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| format!("Failed to serialize run summary: {}", e))?;
    fs::write(file_path, json)
        .map_err(|e| format!("Failed to write summary '{}': {}", file_path.display(), e))?;

    println!("💾 Run summary saved to: {}", file_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::build_families;
    use crate::data::Corpus;

    #[test]
    fn test_summary_round_trips_as_json() {
        let eligible = Corpus::from_counts([("AAAA", 5), ("AAAT", 3), ("TTTT", 2)]);
        let families = build_families(&eligible, 2, 1).unwrap();

        let summary = RunSummary {
            version: crate::VERSION.to_string(),
            generated: chrono::Utc::now().to_rfc3339(),
            command: "seqfam R00.fas".to_string(),
            params: FamilyParams::new(2, 1).unwrap(),
            min_occurrence: 1,
            samples: vec![],
            total_reads: 10,
            distinct_sequences: 3,
            eligible_sequences: 3,
            eligible_reads: 10,
            families: RunSummary::family_summaries(&families),
            unassigned_sequences: families.unassigned,
            cancelled: false,
            elapsed_seconds: 0.1,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_summary(&path, &summary).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["params"]["max_distance"], 1);
        assert_eq!(value["families"][0]["reference"]["sequence"], "AAAA");
        assert_eq!(value["families"][0]["total_reads"], 8);
        assert_eq!(value["families"][1]["distinct_members"], 1);
    }
}
