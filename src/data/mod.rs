// mod.rs - Data structures module

pub mod corpus;
pub mod loaders;

// Re-export main types for convenience
pub use corpus::{Corpus, EligibleSet, SequenceCount, SourceCorpora};
pub use loaders::{load_samples, SampleReads};
