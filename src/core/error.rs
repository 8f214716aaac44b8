// error.rs - Error and diagnostic types for the alignment core

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the alignment core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("Hamming distance undefined for sequences of unequal length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("Protein alignment rows do not share one length (observed lengths: {lengths:?})")]
    AlignmentLengthMismatch { lengths: Vec<usize> },

    #[error("Unequal row length in alignment at gene '{gene_id}': expected {expected}, found {found}")]
    UnequalRowLength {
        gene_id: String,
        expected: usize,
        found: usize,
    },

    #[error("Alignment is empty")]
    EmptyAlignment,

    #[error("Alignment file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("I/O error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

/// Kind of a non-fatal, per-gene problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Gene present in the protein alignment but not in the nucleotide sequences
    MissingSequence,
    /// Nucleotide sequence ran out before the last aligned residue
    TruncatedSequence,
}

impl DiagnosticKind {
    pub fn description(&self) -> &str {
        match self {
            DiagnosticKind::MissingSequence => "missing nucleotide sequence",
            DiagnosticKind::TruncatedSequence => "nucleotide sequence shorter than aligned protein",
        }
    }
}

/// A per-gene problem that was skipped while processing continued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub gene_id: String,
}

impl Diagnostic {
    pub fn missing_sequence<S: Into<String>>(gene_id: S) -> Self {
        Self {
            kind: DiagnosticKind::MissingSequence,
            gene_id: gene_id.into(),
        }
    }

    pub fn truncated_sequence<S: Into<String>>(gene_id: S) -> Self {
        Self {
            kind: DiagnosticKind::TruncatedSequence,
            gene_id: gene_id.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.gene_id, self.kind.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_gene() {
        let err = AlignmentError::UnequalRowLength {
            gene_id: "g7".to_string(),
            expected: 9,
            found: 6,
        };
        let message = err.to_string();
        assert!(message.contains("g7"));
        assert!(message.contains("expected 9"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::missing_sequence("AT1G01010");
        assert_eq!(diag.kind, DiagnosticKind::MissingSequence);
        assert_eq!(diag.to_string(), "AT1G01010: missing nucleotide sequence");
    }
}
