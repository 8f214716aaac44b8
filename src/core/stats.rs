// stats.rs - Pairwise identity and coverage statistics

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::gaps::{strip_pair, GapProfile, RowGaps};
use super::hamming::hamming_distance;
use crate::data::SequenceMap;

/// Identity and coverage of one sequence pair after pair-local gap stripping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairStats {
    pub identity: f64,
    pub coverage: f64,
    /// Set when stripping failed or left nothing; the values are then 0.0
    pub indeterminate: bool,
}

impl PairStats {
    pub const INDETERMINATE: PairStats = PairStats {
        identity: 0.0,
        coverage: 0.0,
        indeterminate: true,
    };

    pub fn new(identity: f64, coverage: f64) -> Self {
        Self {
            identity,
            coverage,
            indeterminate: false,
        }
    }
}

/// gene1 -> gene2 -> stats, filled for gene1 <= gene2 (lexicographic)
pub type PairwiseStatsMatrix = BTreeMap<String, BTreeMap<String, PairStats>>;

/// Statistics for every pair (i, j) with i <= j, self-pairs included
pub fn pairwise_alignment_stats(alignment: &SequenceMap, gap_char: u8) -> PairwiseStatsMatrix {
    pairwise_stats_from_profile(&GapProfile::new(alignment, gap_char))
}

/// Same as [`pairwise_alignment_stats`], reusing precomputed gap columns
pub fn pairwise_stats_from_profile(profile: &GapProfile<'_>) -> PairwiseStatsMatrix {
    let rows = profile.rows();
    let mut stats = PairwiseStatsMatrix::new();

    for (i, first) in rows.iter().enumerate() {
        let row_stats = stats.entry(first.gene_id.to_string()).or_default();
        for second in &rows[i..] {
            row_stats.insert(second.gene_id.to_string(), pair_stats(first, second));
        }
    }

    stats
}

fn pair_stats(first: &RowGaps<'_>, second: &RowGaps<'_>) -> PairStats {
    let Ok((a, b)) = strip_pair(first, second) else {
        return PairStats::INDETERMINATE;
    };

    let stripped_len = a.len();
    if stripped_len == 0 {
        return PairStats::INDETERMINATE;
    }

    match hamming_distance(&a, &b) {
        Ok(mismatches) => PairStats::new(
            (stripped_len - mismatches) as f64 / stripped_len as f64,
            stripped_len as f64 / first.sequence.len() as f64,
        ),
        Err(_) => PairStats::INDETERMINATE,
    }
}
