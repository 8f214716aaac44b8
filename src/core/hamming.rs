// hamming.rs - Hamming distance between aligned sequences

use super::error::AlignmentError;

/// Count positions where two equal-length sequences differ.
/// Unlike a padded comparison, unequal lengths are an error.
pub fn hamming_distance(seq1: &[u8], seq2: &[u8]) -> Result<usize, AlignmentError> {
    if seq1.len() != seq2.len() {
        return Err(AlignmentError::LengthMismatch {
            left: seq1.len(),
            right: seq2.len(),
        });
    }

    Ok(seq1.iter().zip(seq2.iter()).filter(|(a, b)| a != b).count())
}
