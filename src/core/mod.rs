// mod.rs - Core logic module

pub mod cancel;
pub mod distance;
pub mod family;

// Re-export main types for convenience
pub use cancel::CancellationToken;
pub use distance::{bounded_levenshtein, levenshtein, within_distance};
pub use family::{build_families, Family, FamilyBuilder, FamilyError, FamilyParams, FamilySet};
