// family.rs - Greedy max-frequency clustering of sequences into families

use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::core::cancel::CancellationToken;
use crate::core::distance::bounded_levenshtein;
use crate::data::{EligibleSet, SequenceCount};

/// Errors raised before any clustering work starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyError {
    InvalidParameter(String),
}

impl fmt::Display for FamilyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FamilyError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for FamilyError {}

/// Validated clustering parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FamilyParams {
    pub target_families: usize,
    pub max_distance: usize,
}

impl FamilyParams {
    /// Accepts signed values so that out-of-range input from users is
    /// rejected here rather than wrapped.
    pub fn new(target_families: i64, max_distance: i64) -> Result<Self, FamilyError> {
        if target_families <= 0 {
            return Err(FamilyError::InvalidParameter(format!(
                "target family count must be positive (got {})",
                target_families
            )));
        }
        if max_distance < 0 {
            return Err(FamilyError::InvalidParameter(format!(
                "maximum edit distance must be non-negative (got {})",
                max_distance
            )));
        }

        let target_families = usize::try_from(target_families).map_err(|_| {
            FamilyError::InvalidParameter(format!(
                "target family count too large: {}",
                target_families
            ))
        })?;
        let max_distance = usize::try_from(max_distance).map_err(|_| {
            FamilyError::InvalidParameter(format!(
                "maximum edit distance too large: {}",
                max_distance
            ))
        })?;

        Ok(Self {
            target_families,
            max_distance,
        })
    }
}

/// A family of sequences within `max_distance` edits of its reference.
///
/// `members[0]` is always the reference; the other members follow in
/// descending count order, ties by ascending sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Family {
    /// 1-based ordinal in creation order
    pub id: usize,
    pub reference: SequenceCount,
    pub members: Vec<SequenceCount>,
}

impl Family {
    /// Number of distinct member sequences (reference included)
    pub fn distinct_len(&self) -> usize {
        self.members.len()
    }

    /// Number of reads in the family, i.e. the sum of member counts
    pub fn expanded_len(&self) -> u64 {
        self.members.iter().map(|m| m.count).sum()
    }

    pub fn member_sequences(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.sequence.as_str())
    }

    /// Every member sequence repeated by its original occurrence count
    pub fn expanded_members(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .flat_map(|m| std::iter::repeat(m.sequence.as_str()).take(m.count as usize))
    }

    pub fn contains(&self, sequence: &str) -> bool {
        self.members.iter().any(|m| m.sequence == sequence)
    }
}

/// Outcome of one clustering run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FamilySet {
    pub families: Vec<Family>,
    /// Distinct eligible sequences left in the working set at termination
    pub unassigned: usize,
    /// Run stopped through the cancellation token
    pub cancelled: bool,
}

impl FamilySet {
    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Family> {
        self.families.iter()
    }

    /// Family id -> (reference sequence, reference count)
    pub fn reference_table(&self) -> Vec<(usize, SequenceCount)> {
        self.families
            .iter()
            .map(|f| (f.id, f.reference.clone()))
            .collect()
    }

    /// Sequence -> id of the family it belongs to
    pub fn assignment(&self) -> HashMap<&str, usize> {
        self.families
            .iter()
            .flat_map(|f| f.member_sequences().map(move |s| (s, f.id)))
            .collect()
    }

    pub fn family(&self, id: usize) -> Option<&Family> {
        self.families.iter().find(|f| f.id == id)
    }
}

/// Greedy family builder.
///
/// Owns a private working copy of the eligible set. Each pass picks the most
/// abundant remaining sequence as reference (ties: lexicographically smallest),
/// scans an immutable snapshot of the working set for sequences within
/// `max_distance` of it, and only then removes the reference and its members.
pub struct FamilyBuilder {
    working: HashMap<String, u64>,
    params: FamilyParams,
    families: Vec<Family>,
    cancellation: Option<CancellationToken>,
    cancelled: bool,
    progress: ProgressBar,
}

impl FamilyBuilder {
    pub fn new(eligible: &EligibleSet, params: FamilyParams) -> Self {
        Self {
            working: eligible.as_map().clone(),
            params,
            families: Vec::new(),
            cancellation: None,
            cancelled: false,
            progress: ProgressBar::hidden(),
        }
    }

    /// Check `token` between passes and stop early once it is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Report one tick per completed family on `progress`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn params(&self) -> FamilyParams {
        self.params
    }

    /// Distinct sequences not yet assigned to a family
    pub fn remaining(&self) -> usize {
        self.working.len()
    }

    /// Families completed so far
    pub fn families(&self) -> &[Family] {
        &self.families
    }

    /// Form the next family.
    ///
    /// Returns `None` once the target is reached, the working set is empty or
    /// the cancellation token is set. The token is only consulted here, before
    /// a pass starts.
    pub fn step(&mut self) -> Option<&Family> {
        if self.families.len() >= self.params.target_families {
            return None;
        }
        if self.is_cancelled() {
            self.cancelled = true;
            return None;
        }

        let family = self.form_family()?;
        self.progress.inc(1);
        self.progress.set_message(format!(
            "family {}: {} distinct, {} remaining",
            family.id,
            family.distinct_len(),
            self.working.len()
        ));
        self.families.push(family);
        self.families.last()
    }

    /// Step until done; families already formed through `step` are kept
    pub fn run(mut self) -> FamilySet {
        while self.step().is_some() {}

        self.progress
            .finish_with_message(format!("✅ {} families built", self.families.len()));

        FamilySet {
            families: self.families,
            unassigned: self.working.len(),
            cancelled: self.cancelled,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .map(|token| token.is_cancelled())
            .unwrap_or(false)
    }

    /// Select, scan and commit one family. `None` once the working set is empty.
    fn form_family(&mut self) -> Option<Family> {
        let reference = self.select_reference()?;
        let mut members = self.scan(&reference);
        self.commit(&reference, &members);

        members.sort_unstable_by(SequenceCount::by_abundance);
        members.insert(0, reference.clone());

        let id = self.families.len() + 1;

        Some(Family {
            id,
            reference,
            members,
        })
    }

    fn select_reference(&self) -> Option<SequenceCount> {
        self.working
            .iter()
            .max_by(|(seq_a, count_a), (seq_b, count_b)| {
                count_a.cmp(count_b).then_with(|| seq_b.cmp(seq_a))
            })
            .map(|(sequence, &count)| SequenceCount::new(sequence.clone(), count))
    }

    /// Distances are computed in parallel over a read-only snapshot; the
    /// working set is borrowed immutably for the whole scan.
    fn scan(&self, reference: &SequenceCount) -> Vec<SequenceCount> {
        let max_distance = self.params.max_distance;
        let target = reference.sequence.as_bytes();

        let snapshot: Vec<(&String, &u64)> = self
            .working
            .iter()
            .filter(|(sequence, _)| **sequence != reference.sequence)
            .collect();

        snapshot
            .par_iter()
            .filter_map(|&(sequence, &count)| {
                bounded_levenshtein(target, sequence.as_bytes(), max_distance)
                    .map(|_| SequenceCount::new(sequence.as_str(), count))
            })
            .collect()
    }

    fn commit(&mut self, reference: &SequenceCount, members: &[SequenceCount]) {
        self.working.remove(&reference.sequence);
        for member in members {
            self.working.remove(&member.sequence);
        }
    }
}

/// Validate parameters and run the builder on a fresh copy of `eligible`
pub fn build_families(
    eligible: &EligibleSet,
    target_families: i64,
    max_distance: i64,
) -> Result<FamilySet, FamilyError> {
    let params = FamilyParams::new(target_families, max_distance)?;
    Ok(FamilyBuilder::new(eligible, params).run())
}
