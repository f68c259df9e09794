// mod.rs - Plain-text writers for families, tables and statistics
//
// Every file holds one record per line with whitespace-separated fields and
// no header, so the outputs can be read back with a simple line split.

pub mod summary;

use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::{Family, FamilySet};
use crate::data::SequenceCount;
use crate::stats::{FamilySize, Occupancy, PositionalProfile, SequenceFrequency};

pub use summary::{write_summary, RunSummary};

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<(), String> {
    if let Some(parent) = file_path.parent() {
        create_dir_all(parent).map_err(|e| {
            format!("Failed to create parent directory '{}': {}", parent.display(), e)
        })?;
    }
    Ok(())
}

fn create_writer(file_path: &Path) -> Result<BufWriter<File>, String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| {
        format!("Failed to create output file '{}': {}", file_path.display(), e)
    })?;
    Ok(BufWriter::new(file))
}

/// Write one line per item, then flush
fn write_lines<I, F>(file_path: &Path, items: I, mut format_line: F) -> Result<(), String>
where
    I: IntoIterator,
    F: FnMut(&mut BufWriter<File>, I::Item) -> std::io::Result<()>,
{
    let mut writer = create_writer(file_path)?;
    for item in items {
        format_line(&mut writer, item)
            .map_err(|e| format!("Write error in '{}': {}", file_path.display(), e))?;
    }
    writer
        .flush()
        .map_err(|e| format!("Flush error in '{}': {}", file_path.display(), e))
}

/// Output file names, all relative to one directory
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub dir: PathBuf,
}

impl OutputLayout {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn reference_table(&self) -> PathBuf {
        self.dir.join("reference_sequences.txt")
    }

    pub fn family_distinct(&self, id: usize) -> PathBuf {
        self.dir.join(format!("family_{}_diff_seq.txt", id))
    }

    pub fn family_expanded(&self, id: usize) -> PathBuf {
        self.dir.join(format!("family_{}_all_seq.txt", id))
    }

    pub fn kept_sequences(&self) -> PathBuf {
        self.dir.join("kept_sequences.txt")
    }

    pub fn sample_kept(&self, sample: &str) -> PathBuf {
        self.dir.join(format!("{}_kept_data.txt", sample))
    }

    pub fn family_sizes(&self) -> PathBuf {
        self.dir.join("family_sizes.txt")
    }

    pub fn entropy(&self) -> PathBuf {
        self.dir.join("shannon_entropy.txt")
    }

    pub fn family_frequencies(&self, id: usize) -> PathBuf {
        self.dir.join(format!("family_{}_frequencies.txt", id))
    }

    pub fn family_lengths(&self, id: usize) -> PathBuf {
        self.dir.join(format!("family_{}_lengths.txt", id))
    }

    pub fn family_profile(&self, id: usize) -> PathBuf {
        self.dir.join(format!("family_{}_profile.txt", id))
    }

    pub fn family_position_entropy(&self, id: usize) -> PathBuf {
        self.dir.join(format!("family_{}_position_entropy.txt", id))
    }

    pub fn mean_difference(&self) -> PathBuf {
        self.dir.join("mean_difference.txt")
    }

    pub fn family_sample_profile(&self, id: usize, sample: &str) -> PathBuf {
        self.dir.join(format!("family_{}_{}_profile.txt", id, sample))
    }

    pub fn family_sample_position_entropy(&self, id: usize, sample: &str) -> PathBuf {
        self.dir.join(format!("family_{}_{}_position_entropy.txt", id, sample))
    }

    pub fn sample_mean_difference(&self) -> PathBuf {
        self.dir.join("mean_difference_by_sample.txt")
    }

    pub fn occupancy(&self) -> PathBuf {
        self.dir.join("occupancy.txt")
    }
}

/// `id sequence count` per family
pub fn write_reference_table(file_path: &Path, families: &FamilySet) -> Result<(), String> {
    write_lines(file_path, families.reference_table(), |w, (id, reference)| {
        writeln!(w, "{} {} {}", id, reference.sequence, reference.count)
    })?;
    println!("✅ Reference table written to: {}", file_path.display());
    Ok(())
}

/// `sequence count` per entry, in the given order
pub fn write_sequence_counts(file_path: &Path, entries: &[SequenceCount]) -> Result<(), String> {
    write_lines(file_path, entries, |w, entry| {
        writeln!(w, "{} {}", entry.sequence, entry.count)
    })
}

/// Distinct members (one per line) and, unless disabled, the expanded
/// members (each sequence repeated by its count)
pub fn write_family_members(
    layout: &OutputLayout,
    family: &Family,
    include_expanded: bool,
) -> Result<(), String> {
    write_lines(&layout.family_distinct(family.id), family.member_sequences(), |w, s| {
        writeln!(w, "{}", s)
    })?;

    if include_expanded {
        write_lines(&layout.family_expanded(family.id), family.expanded_members(), |w, s| {
            writeln!(w, "{}", s)
        })?;
    }
    Ok(())
}

pub fn write_families(
    layout: &OutputLayout,
    families: &FamilySet,
    include_expanded: bool,
) -> Result<(), String> {
    write_reference_table(&layout.reference_table(), families)?;
    for family in families.iter() {
        write_family_members(layout, family, include_expanded)?;
    }
    println!(
        "✅ Membership files for {} families written to: {}",
        families.len(),
        layout.dir.display()
    );
    Ok(())
}

/// `id distinct total`
pub fn write_family_sizes(file_path: &Path, sizes: &[FamilySize]) -> Result<(), String> {
    write_lines(file_path, sizes, |w, size| {
        writeln!(w, "{} {} {}", size.id, size.distinct, size.total)
    })
}

/// `key value` pairs, e.g. `id entropy`
pub fn write_scalar_table<K, V>(file_path: &Path, rows: &[(K, V)]) -> Result<(), String>
where
    K: std::fmt::Display,
    V: std::fmt::Display,
{
    write_lines(file_path, rows, |w, (key, value)| writeln!(w, "{} {}", key, value))
}

/// `sequence frequency`
pub fn write_frequencies(
    file_path: &Path,
    frequencies: &[SequenceFrequency],
) -> Result<(), String> {
    write_lines(file_path, frequencies, |w, f| {
        writeln!(w, "{} {}", f.sequence, f.frequency)
    })
}

/// `length count`, ascending length
pub fn write_length_distribution(
    file_path: &Path,
    lengths: &BTreeMap<usize, u64>,
) -> Result<(), String> {
    write_lines(file_path, lengths, |w, (length, count)| {
        writeln!(w, "{} {}", length, count)
    })
}

/// `position symbol count`
pub fn write_profile(file_path: &Path, profile: &PositionalProfile) -> Result<(), String> {
    write_lines(file_path, profile.rows(), |w, (position, symbol, count)| {
        writeln!(w, "{} {} {}", position, symbol, count)
    })
}

/// Per-sample profile, its position entropy, and the `sample family value`
/// mean-difference rows for every profile with at least two reads
pub fn write_sample_profiles(
    layout: &OutputLayout,
    profiles: &[PositionalProfile],
) -> Result<(), String> {
    let mut differences = Vec::new();
    for profile in profiles {
        let sample = profile.sample.as_deref().unwrap_or("all");
        write_profile(&layout.family_sample_profile(profile.family, sample), profile)?;
        write_scalar_table(
            &layout.family_sample_position_entropy(profile.family, sample),
            &profile.position_entropy(),
        )?;
        if let Some(difference) = profile.mean_pairwise_difference() {
            differences.push((sample, profile.family, difference));
        }
    }

    write_lines(&layout.sample_mean_difference(), differences, |w, (sample, id, value)| {
        writeln!(w, "{} {} {}", sample, id, value)
    })
}

/// `sample family reads fraction`, space-delimited
pub fn write_occupancy(file_path: &Path, rows: &[Occupancy]) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_path(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path.display(), e))?;

    for row in rows {
        writer
            .write_record([
                row.sample.clone(),
                row.family.to_string(),
                row.reads.to_string(),
                row.fraction.to_string(),
            ])
            .map_err(|e| format!("Write error in '{}': {}", file_path.display(), e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Flush error in '{}': {}", file_path.display(), e))
}
