// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.inputs.is_empty() {
            if let Some(inputs) = config.inputs {
                self.inputs = inputs;
            }
        }
        if self.output_dir == "." {
            if let Some(output_dir) = config.output_dir {
                self.output_dir = output_dir;
            }
        }
        if self.summary.is_none() {
            self.summary = config.summary;
        }

        // Clustering (only override defaults, not explicit CLI values)
        if self.max_distance == 1 {
            if let Some(max_distance) = config.max_distance {
                self.max_distance = max_distance;
            }
        }
        if self.families == 10 {
            if let Some(families) = config.families {
                self.families = families;
            }
        }
        if self.min_occurrence == 1000 {
            if let Some(min_occurrence) = config.min_occurrence {
                self.min_occurrence = min_occurrence;
            }
        }

        // Samples
        if self.sample_pattern.is_none() {
            self.sample_pattern = config.sample_pattern;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Statistics
        if !self.stats && config.stats.unwrap_or(false) {
            self.stats = true;
        }
        if self.profile_offset == 1 {
            if let Some(profile_offset) = config.profile_offset {
                self.profile_offset = profile_offset;
            }
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.no_expanded && config.no_expanded.unwrap_or(false) {
            self.no_expanded = true;
        }
        if !self.quiet && config.quiet.unwrap_or(false) {
            self.quiet = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
