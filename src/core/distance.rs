// distance.rs - Bounded Levenshtein distance between sequences

/// Sentinel for cells outside the band. Kept well below `usize::MAX` so that
/// adding an edit cost can never overflow.
const OUT_OF_BAND: usize = usize::MAX / 2;

/// Levenshtein distance (unit-cost insertion, deletion, substitution) between
/// two byte strings.
///
/// Sequences are treated as opaque symbol strings: no alphabet is assumed and
/// comparison is case-sensitive.
pub fn levenshtein(a: &[u8], b: &[u8]) -> usize {
    let bound = a.len().max(b.len());
    // The distance never exceeds the longer length, so the bounded variant
    // always yields a value here.
    bounded_levenshtein(a, b, bound).unwrap_or(bound)
}

/// Levenshtein distance bounded by `max_distance`.
///
/// Returns `Some(d)` when `d <= max_distance` and `None` otherwise. Only a band
/// of `2 * max_distance + 1` diagonals is evaluated and the computation stops
/// as soon as every cell of a row exceeds the bound, so the cost is
/// `O(max_distance * min(len))` rather than `O(len^2)`.
pub fn bounded_levenshtein(a: &[u8], b: &[u8], max_distance: usize) -> Option<usize> {
    // Work with `a` as the shorter string
    let (a, b) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if b.len() - a.len() > max_distance {
        return None;
    }

    // Shared prefix and suffix never contribute to the distance
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);

    let (n, m) = (a.len(), b.len());
    if n == 0 {
        // Only insertions remain; m <= max_distance was checked above
        return Some(m);
    }

    let k = max_distance;
    let mut prev = vec![OUT_OF_BAND; m + 1];
    let mut curr = vec![OUT_OF_BAND; m + 1];

    for (j, cell) in prev.iter_mut().enumerate().take(k.min(m) + 1) {
        *cell = j;
    }

    for i in 1..=n {
        let lo = i.saturating_sub(k);
        let hi = m.min(i.saturating_add(k));

        let mut row_min = OUT_OF_BAND;
        if lo == 0 {
            curr[0] = i;
            row_min = i;
        } else {
            curr[lo - 1] = OUT_OF_BAND;
        }

        let symbol = a[i - 1];
        for j in lo.max(1)..=hi {
            let substitution = prev[j - 1] + usize::from(symbol != b[j - 1]);
            let deletion = prev[j] + 1;
            let insertion = curr[j - 1] + 1;
            let value = substitution.min(deletion).min(insertion);
            curr[j] = value;
            row_min = row_min.min(value);
        }

        if hi < m {
            curr[hi + 1] = OUT_OF_BAND;
        }

        if row_min > k {
            return None;
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    let distance = prev[m];
    (distance <= k).then_some(distance)
}

/// Check whether two sequences are within `max_distance` edits of each other
pub fn within_distance(a: &str, b: &str, max_distance: usize) -> bool {
    bounded_levenshtein(a.as_bytes(), b.as_bytes(), max_distance).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bio::alignment::distance::levenshtein as reference_levenshtein;
    use proptest::prelude::*;

    #[test]
    fn test_levenshtein_basic() {
        assert_eq!(levenshtein(b"", b""), 0);
        assert_eq!(levenshtein(b"ACGT", b""), 4);
        assert_eq!(levenshtein(b"", b"ACG"), 3);
        assert_eq!(levenshtein(b"ACGT", b"ACGT"), 0);
        assert_eq!(levenshtein(b"AAAA", b"AAAT"), 1);
        assert_eq!(levenshtein(b"AAAA", b"TTTT"), 4);
        assert_eq!(levenshtein(b"kitten", b"sitting"), 3);
        assert_eq!(levenshtein(b"ACGTACGT", b"CGTACGTA"), 2);
    }

    #[test]
    fn test_bounded_levenshtein_cutoff() {
        assert_eq!(bounded_levenshtein(b"AAAA", b"AAAT", 1), Some(1));
        assert_eq!(bounded_levenshtein(b"AAAA", b"AAAT", 0), None);
        assert_eq!(bounded_levenshtein(b"AAAA", b"TTTT", 3), None);
        assert_eq!(bounded_levenshtein(b"AAAA", b"TTTT", 4), Some(4));
        // Length difference alone exceeds the bound
        assert_eq!(bounded_levenshtein(b"A", b"AAAAAA", 2), None);
        assert_eq!(bounded_levenshtein(b"", b"AC", 2), Some(2));
    }

    #[test]
    fn test_bounded_levenshtein_symmetric() {
        assert_eq!(
            bounded_levenshtein(b"GATTACA", b"GCATGCU", 5),
            bounded_levenshtein(b"GCATGCU", b"GATTACA", 5)
        );
    }

    #[test]
    fn test_non_nucleotide_symbols() {
        assert_eq!(levenshtein(b"AC-GN", b"ACNGN"), 1);
        assert!(within_distance("acgt", "ACGT", 4));
        assert!(!within_distance("acgt", "ACGT", 3));
    }

    #[test]
    fn test_huge_bound_does_not_overflow() {
        assert_eq!(bounded_levenshtein(b"ACGT", b"TGCA", usize::MAX), Some(4));
    }

    proptest! {
        #[test]
        fn prop_matches_reference(
            a in "[ACGTN]{0,24}",
            b in "[ACGTN]{0,24}",
            k in 0usize..8,
        ) {
            let expected = reference_levenshtein(a.as_bytes(), b.as_bytes()) as usize;
            prop_assert_eq!(levenshtein(a.as_bytes(), b.as_bytes()), expected);

            let bounded = bounded_levenshtein(a.as_bytes(), b.as_bytes(), k);
            if expected <= k {
                prop_assert_eq!(bounded, Some(expected));
            } else {
                prop_assert_eq!(bounded, None);
            }
        }
    }
}
