// config.rs - Pipeline configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default minimum alignment length after gap stripping
pub const DEFAULT_MIN_LENGTH: usize = 100;

/// Default gap character
pub const DEFAULT_GAP_CHAR: u8 = b'-';

/// What to do when a nucleotide sequence ends inside an aligned codon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruncatedCodonPolicy {
    /// Drop the gene and record a diagnostic; kept rows are always 3L long
    #[default]
    Skip,
    /// Append the short trailing fragment as-is
    Propagate,
}

impl FromStr for TruncatedCodonPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(TruncatedCodonPolicy::Skip),
            "propagate" => Ok(TruncatedCodonPolicy::Propagate),
            _ => Err(format!("Invalid truncated codon policy: {}. Use: skip, propagate", s)),
        }
    }
}

impl TruncatedCodonPolicy {
    pub fn description(&self) -> &str {
        match self {
            TruncatedCodonPolicy::Skip => "skip genes with truncated codons",
            TruncatedCodonPolicy::Propagate => "keep truncated trailing codons",
        }
    }
}

/// Settings shared by every family run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub min_length: usize,
    pub gap_char: u8,
    pub truncated_codons: TruncatedCodonPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            gap_char: DEFAULT_GAP_CHAR,
            truncated_codons: TruncatedCodonPolicy::Skip,
        }
    }
}

impl PipelineConfig {
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_gap_char(mut self, gap_char: u8) -> Self {
        self.gap_char = gap_char;
        self
    }

    pub fn with_truncated_codons(mut self, policy: TruncatedCodonPolicy) -> Self {
        self.truncated_codons = policy;
        self
    }
}
