// backtranslate.rs - Protein alignment to codon alignment

use std::collections::BTreeSet;

use super::config::TruncatedCodonPolicy;
use super::error::{AlignmentError, Diagnostic};
use crate::data::{uniform_length, SequenceMap};

/// Nucleotide alignment built from a protein alignment
#[derive(Debug, Clone, PartialEq)]
pub struct BackTranslation {
    pub alignment: SequenceMap,
    /// Genes dropped along the way
    pub diagnostics: Vec<Diagnostic>,
}

/// Replace every aligned residue by its source codon and every gap by a
/// gap codon.
///
/// All protein rows must share one length L, otherwise nothing is produced.
/// Genes without a nucleotide sequence are skipped with a diagnostic; the
/// remaining rows are 3L long (unless `Propagate` keeps a short final codon).
pub fn back_translate(
    protein_msa: &SequenceMap,
    nucleotides: &SequenceMap,
    gap_char: u8,
    policy: TruncatedCodonPolicy,
) -> Result<BackTranslation, AlignmentError> {
    if protein_msa.is_empty() {
        return Err(AlignmentError::EmptyAlignment);
    }

    if uniform_length(protein_msa).is_none() {
        let lengths: BTreeSet<usize> = protein_msa.values().map(|s| s.len()).collect();
        return Err(AlignmentError::AlignmentLengthMismatch {
            lengths: lengths.into_iter().collect(),
        });
    }

    let mut alignment = SequenceMap::new();
    let mut diagnostics = Vec::new();

    for (gene_id, protein) in protein_msa {
        let Some(nucleotide) = nucleotides.get(gene_id) else {
            log::warn!("Gene {} not found in nucleotide sequences", gene_id);
            diagnostics.push(Diagnostic::missing_sequence(gene_id.as_str()));
            continue;
        };

        let (row, truncated) = codon_row(protein, nucleotide, gap_char);
        if truncated {
            match policy {
                TruncatedCodonPolicy::Skip => {
                    log::warn!("Gene {} has fewer nucleotides than aligned residues, skipped", gene_id);
                    diagnostics.push(Diagnostic::truncated_sequence(gene_id.as_str()));
                    continue;
                }
                TruncatedCodonPolicy::Propagate => {
                    log::debug!("Gene {} keeps a truncated final codon", gene_id);
                }
            }
        }

        alignment.insert(gene_id.clone(), row);
    }

    Ok(BackTranslation {
        alignment,
        diagnostics,
    })
}

/// Walk one aligned protein, reading codons from the nucleotide sequence.
/// The flag is set when a residue found fewer than three nucleotides left.
fn codon_row(protein: &[u8], nucleotide: &[u8], gap_char: u8) -> (Vec<u8>, bool) {
    let mut row = Vec::with_capacity(protein.len() * 3);
    let mut cursor = 0;
    let mut truncated = false;

    for &residue in protein {
        if residue == gap_char {
            row.extend_from_slice(&[gap_char; 3]);
        } else {
            let end = (cursor + 3).min(nucleotide.len());
            let codon = nucleotide.get(cursor..end).unwrap_or(&[]);
            if codon.len() < 3 {
                truncated = true;
            }
            row.extend_from_slice(codon);
            cursor += 3;
        }
    }

    (row, truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sequence_map;
    use crate::core::DiagnosticKind;

    #[test]
    fn test_back_translate_example() {
        let protein = sequence_map(&[("g1", "M-K"), ("g2", "MAK")]);
        let nucleotides = sequence_map(&[("g1", "ATGAAA"), ("g2", "ATGGCAAAA")]);

        let result = back_translate(&protein, &nucleotides, b'-', TruncatedCodonPolicy::Skip).unwrap();
        assert_eq!(result.alignment["g1"], b"ATG---AAA");
        assert_eq!(result.alignment["g2"], b"ATGGCAAAA");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_rows_are_three_times_protein_length() {
        let protein = sequence_map(&[("a", "--MK-"), ("b", "MQKL-"), ("c", "M-K-L")]);
        let nucleotides = sequence_map(&[
            ("a", "ATGAAA"),
            ("b", "ATGCAAAAACTT"),
            ("c", "ATGAAACTTGGG"),
        ]);

        let result = back_translate(&protein, &nucleotides, b'-', TruncatedCodonPolicy::Skip).unwrap();
        for row in result.alignment.values() {
            assert_eq!(row.len(), 15);
        }
        // Protein gap at column 1 of "c" becomes a gap codon at 3..6
        assert_eq!(&result.alignment["c"][3..6], b"---");
        assert_eq!(&result.alignment["a"][0..6], b"------");
    }

    #[test]
    fn test_missing_sequence_is_skipped() {
        let protein = sequence_map(&[("g1", "MK"), ("g2", "MK"), ("g3", "M-")]);
        let nucleotides = sequence_map(&[("g1", "ATGAAA"), ("g3", "ATG"), ("extra", "CCC")]);

        let result = back_translate(&protein, &nucleotides, b'-', TruncatedCodonPolicy::Skip).unwrap();
        assert_eq!(result.alignment.len(), 2);
        assert!(!result.alignment.contains_key("g2"));
        assert!(!result.alignment.contains_key("extra"));
        assert_eq!(result.diagnostics, vec![Diagnostic::missing_sequence("g2")]);
    }

    #[test]
    fn test_length_mismatch_aborts() {
        let protein = sequence_map(&[("g1", "MK"), ("g2", "MKL")]);
        let nucleotides = sequence_map(&[("g1", "ATGAAA"), ("g2", "ATGAAACTT")]);

        let err = back_translate(&protein, &nucleotides, b'-', TruncatedCodonPolicy::Skip).unwrap_err();
        assert_eq!(err, AlignmentError::AlignmentLengthMismatch { lengths: vec![2, 3] });
    }

    #[test]
    fn test_empty_protein_alignment() {
        let err = back_translate(&SequenceMap::new(), &SequenceMap::new(), b'-', TruncatedCodonPolicy::Skip)
            .unwrap_err();
        assert_eq!(err, AlignmentError::EmptyAlignment);
    }

    #[test]
    fn test_truncated_codon_skip() {
        let protein = sequence_map(&[("g1", "MK"), ("g2", "MK")]);
        let nucleotides = sequence_map(&[("g1", "ATGAA"), ("g2", "ATGAAA")]);

        let result = back_translate(&protein, &nucleotides, b'-', TruncatedCodonPolicy::Skip).unwrap();
        assert_eq!(result.alignment.len(), 1);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::TruncatedSequence);
        assert_eq!(result.diagnostics[0].gene_id, "g1");
    }

    #[test]
    fn test_truncated_codon_propagate() {
        let protein = sequence_map(&[("g1", "MKL"), ("g2", "MKL")]);
        let nucleotides = sequence_map(&[("g1", "ATGAA"), ("g2", "ATGAAACTT")]);

        let result = back_translate(&protein, &nucleotides, b'-', TruncatedCodonPolicy::Propagate).unwrap();
        assert_eq!(result.alignment["g1"], b"ATGAA");
        assert_eq!(result.alignment["g2"], b"ATGAAACTT");
        assert!(result.diagnostics.is_empty());
    }
}
