// mod.rs - Input loaders

pub mod fasta;

pub use fasta::{has_fasta_extension, load_samples, sample_name, SampleReads, FASTA_EXTENSIONS};
