// mod.rs - Per-family statistics computed from a finished partition

pub mod diversity;
pub mod occupancy;
pub mod profile;

pub use diversity::{
    family_sizes, sequence_frequencies, shannon_entropy, FamilySize, SequenceFrequency,
};
pub use occupancy::{family_occupancy, Occupancy};
pub use profile::{dominant_length, length_distribution, sample_profiles, PositionalProfile};
