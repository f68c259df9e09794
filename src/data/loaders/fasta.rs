// fasta.rs - FASTA loader for per-sample sequencing reads

use bio::io::fasta;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// File extensions accepted as FASTA input
pub const FASTA_EXTENSIONS: &[&str] = &["fas", "fasta", "fa", "fna"];

/// All reads of one sample (one input file), in file order
#[derive(Debug, Clone)]
pub struct SampleReads {
    pub name: String,
    pub path: PathBuf,
    pub sequences: Vec<String>,
}

impl SampleReads {
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Read every record of a FASTA file
    pub fn from_fasta(path: &Path, name_pattern: Option<&Regex>) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open FASTA file {}: {}", path.display(), e))?;

        let reader = fasta::Reader::new(BufReader::new(file));
        let mut sequences = Vec::new();

        for record_result in reader.records() {
            let record = record_result
                .map_err(|e| format!("Invalid FASTA record in {}: {}", path.display(), e))?;

            let sequence = String::from_utf8_lossy(record.seq()).trim().to_string();
            if !sequence.is_empty() {
                sequences.push(sequence);
            }
        }

        Ok(Self {
            name: sample_name(path, name_pattern),
            path: path.to_path_buf(),
            sequences,
        })
    }
}

/// Derive a sample name from a file path.
///
/// With a pattern, capture group 1 of the first match against the file name is
/// used; otherwise (or when the pattern does not match) the file stem.
pub fn sample_name(path: &Path, name_pattern: Option<&Regex>) -> String {
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    if let Some(pattern) = name_pattern {
        if let Some(name) = pattern
            .captures(&file_name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|name| !name.is_empty())
        {
            return name;
        }
    }

    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or(file_name)
}

/// Check the extension of a candidate input file
pub fn has_fasta_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| FASTA_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Load several FASTA files in parallel; results keep the input order
pub fn load_samples(
    paths: &[PathBuf],
    name_pattern: Option<&Regex>,
    show_progress: bool,
) -> Result<Vec<SampleReads>, String> {
    println!("🧬 Loading {} FASTA file(s)", paths.len());

    let pb = if show_progress {
        ProgressBar::new(paths.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} files {msg}",
        )
        .map_err(|e| format!("Invalid progress template: {}", e))?,
    );

    let samples = paths
        .par_iter()
        .map(|path| {
            let sample = SampleReads::from_fasta(path, name_pattern);
            pb.inc(1);
            sample
        })
        .collect::<Result<Vec<_>, String>>()?;

    check_unique_names(&samples)?;

    let total_reads: usize = samples.iter().map(|s| s.len()).sum();
    pb.finish_with_message(format!("✅ {} reads loaded", total_reads));

    for sample in &samples {
        println!("  📄 {}: {} reads ({})", sample.name, sample.len(), sample.path.display());
    }

    Ok(samples)
}

/// Per-sample outputs are keyed by name, so two inputs may not share one
fn check_unique_names(samples: &[SampleReads]) -> Result<(), String> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for sample in samples {
        if let Some(previous) = seen.insert(sample.name.as_str(), sample.path.as_path()) {
            return Err(format!(
                "Sample name '{}' resolved for both {} and {}",
                sample.name,
                previous.display(),
                sample.path.display()
            ));
        }
    }
    Ok(())
}
