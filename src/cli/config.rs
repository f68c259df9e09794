// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub inputs: Option<Vec<String>>,
    pub output_dir: Option<String>,
    pub summary: Option<String>,

    // Clustering
    pub max_distance: Option<i64>,
    pub families: Option<i64>,
    pub min_occurrence: Option<u64>,

    // Samples
    pub sample_pattern: Option<String>,

    // Performance
    pub threads: Option<usize>,

    // Statistics
    pub stats: Option<bool>,
    pub profile_offset: Option<usize>,

    // Flags
    pub no_expanded: Option<bool>,
    pub quiet: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config = Self::from_toml_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# seqfam.toml - Configuration file for seqfam
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# FASTA files, one per sample (used when none are given on the command line)
inputs = ["R00.fastq_result.fas", "R01.fastq_result.fas"]

# Directory receiving all output tables
output_dir = "families"

# JSON run summary
# summary = "families/summary.json"

# =============================================================================
# CLUSTERING
# =============================================================================

# Maximum Levenshtein distance between a member and its family reference
max_distance = 1

# Number of families to build
families = 10

# Minimum number of occurrences across all samples
min_occurrence = 1000

# =============================================================================
# SAMPLES
# =============================================================================

# Regex whose first capture group names the sample from the file name
sample_pattern = "^(R[0-9]+)"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# STATISTICS
# =============================================================================

# Write per-family statistics
stats = true

# Label of the first position in positional profiles
profile_offset = 1

# =============================================================================
# FLAGS
# =============================================================================

# Skip the expanded (one line per read) membership files
no_expanded = false

# Hide progress bars
quiet = false

# Validate inputs without clustering
dry_run = false
"#
        .to_string()
    }
}
