// lib.rs - seqfam library root

//! # seqfam - Edit-distance families of high-frequency sequences
//!
//! This library groups the most abundant sequences of a sequencing experiment
//! into families: each family is anchored on the most frequent sequence still
//! unassigned and collects every remaining sequence within a Levenshtein
//! distance bound of it.
//!
//! ## Features
//!
//! - **Greedy clustering**: deterministic max-frequency references, first match wins
//! - **Parallel scanning**: distances to the reference computed with rayon
//! - **Bounded Levenshtein**: banded computation that stops past the threshold
//! - **Per-sample tables**: kept sequences and family occupancy for every input file
//! - **Statistics**: Shannon entropy, length distributions, positional profiles
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use seqfam::prelude::*;
//! use std::path::PathBuf;
//!
//! let inputs = vec![PathBuf::from("R00.fas"), PathBuf::from("R01.fas")];
//! let samples = load_samples(&inputs, None, false)?;
//! let sources = SourceCorpora::aggregate(&samples);
//! let eligible = sources.combined.filter_min_occurrence(1000);
//!
//! let families = build_families(&eligible, 10, 1).map_err(|e| e.to_string())?;
//! for family in families.iter() {
//!     println!("{} {} {}", family.id, family.reference.sequence, family.distinct_len());
//! }
//! # Ok::<(), String>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod output;
pub mod stats;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{build_families, CancellationToken, FamilyBuilder};
    pub use crate::core::{Family, FamilyError, FamilyParams, FamilySet};
    pub use crate::core::{bounded_levenshtein, levenshtein};
    pub use crate::data::{load_samples, Corpus, EligibleSet, SampleReads};
    pub use crate::data::{SequenceCount, SourceCorpora};
    pub use crate::output::{write_families, OutputLayout};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{build_families, Family, FamilyBuilder, FamilyError, FamilyParams, FamilySet};
pub use data::{Corpus, EligibleSet, SequenceCount, SourceCorpora};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "seqfam v{} - Edit-distance families of high-frequency sequences",
        VERSION
    )
}
