// gaps.rs - Gap column detection and removal

use std::collections::BTreeMap;

use super::error::AlignmentError;
use crate::data::SequenceMap;

/// Set of alignment columns holding a gap, one flag per column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapColumns {
    mask: Vec<bool>,
}

impl GapColumns {
    /// Gap columns of a single row
    pub fn from_row(row: &[u8], gap_char: u8) -> Self {
        Self {
            mask: row.iter().map(|&c| c == gap_char).collect(),
        }
    }

    /// Column count covered by this set (the alignment length)
    pub fn width(&self) -> usize {
        self.mask.len()
    }

    /// Number of gap columns
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&g| g).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.mask.iter().any(|&g| g)
    }

    pub fn contains(&self, column: usize) -> bool {
        self.mask.get(column).copied().unwrap_or(false)
    }

    /// Zero-based indices of the gap columns, ascending
    pub fn indices(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(i, &g)| if g { Some(i) } else { None })
            .collect()
    }

    /// Merge another row's gap columns into this set. Both must have the same width.
    fn union_with(&mut self, other: &GapColumns) {
        for (g, &o) in self.mask.iter_mut().zip(other.mask.iter()) {
            *g |= o;
        }
    }

    /// Keep every character whose column is not a gap column
    pub fn filter(&self, row: &[u8]) -> Vec<u8> {
        row.iter()
            .zip(self.mask.iter())
            .filter(|(_, gap)| !**gap)
            .map(|(&c, _)| c)
            .collect()
    }

    /// Number of columns left after filtering
    pub fn retained(&self) -> usize {
        self.width() - self.count()
    }
}

/// One alignment row together with its own gap columns
#[derive(Debug, Clone)]
pub struct RowGaps<'a> {
    pub gene_id: &'a str,
    pub sequence: &'a [u8],
    pub gaps: GapColumns,
}

/// Per-row gap columns of an alignment, computed once and shared between
/// the whole-alignment strip and every pair-local strip.
#[derive(Debug, Clone)]
pub struct GapProfile<'a> {
    rows: Vec<RowGaps<'a>>,
}

impl<'a> GapProfile<'a> {
    pub fn new(alignment: &'a SequenceMap, gap_char: u8) -> Self {
        let rows = alignment
            .iter()
            .map(|(gene_id, sequence)| RowGaps {
                gene_id: gene_id.as_str(),
                sequence: sequence.as_slice(),
                gaps: GapColumns::from_row(sequence, gap_char),
            })
            .collect();
        Self { rows }
    }

    /// Rows in lexicographic gene order
    pub fn rows(&self) -> &[RowGaps<'a>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Union of the gap columns over all rows. The first row fixes the
    /// alignment length; any row of a different length is rejected.
    pub fn gap_columns(&self) -> Result<GapColumns, AlignmentError> {
        let (reference, rest) = self.rows.split_first().ok_or(AlignmentError::EmptyAlignment)?;
        let mut union = reference.gaps.clone();

        for row in rest {
            check_row_length(reference, row)?;
            union.union_with(&row.gaps);
        }

        Ok(union)
    }

    /// Remove every gap column from every row
    pub fn strip(&self) -> Result<SequenceMap, AlignmentError> {
        let columns = self.gap_columns()?;
        Ok(self
            .rows
            .iter()
            .map(|row| (row.gene_id.to_string(), columns.filter(row.sequence)))
            .collect::<BTreeMap<_, _>>())
    }
}

fn check_row_length(reference: &RowGaps<'_>, row: &RowGaps<'_>) -> Result<(), AlignmentError> {
    if row.sequence.len() != reference.sequence.len() {
        return Err(AlignmentError::UnequalRowLength {
            gene_id: row.gene_id.to_string(),
            expected: reference.sequence.len(),
            found: row.sequence.len(),
        });
    }
    Ok(())
}

/// Strip a two-row sub-alignment, `first` being the reference row
pub fn strip_pair(
    first: &RowGaps<'_>,
    second: &RowGaps<'_>,
) -> Result<(Vec<u8>, Vec<u8>), AlignmentError> {
    check_row_length(first, second)?;
    let mut columns = first.gaps.clone();
    columns.union_with(&second.gaps);
    Ok((columns.filter(first.sequence), columns.filter(second.sequence)))
}

/// Remove all columns with a gap in any sequence
pub fn strip_gaps(alignment: &SequenceMap, gap_char: u8) -> Result<SequenceMap, AlignmentError> {
    GapProfile::new(alignment, gap_char).strip()
}

/// Columns holding a gap in at least one sequence
pub fn find_gap_columns(alignment: &SequenceMap, gap_char: u8) -> Result<GapColumns, AlignmentError> {
    GapProfile::new(alignment, gap_char).gap_columns()
}
