// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub msa_dir: Option<String>,
    pub msa_extension: Option<String>,
    pub nucleotides: Option<Vec<String>>,
    pub output_dir: Option<String>,
    pub summary: Option<String>,
    pub stats: Option<String>,

    // Core settings
    pub min_length: Option<usize>,
    pub gap_char: Option<String>,
    pub truncated_codons: Option<String>,
    pub aligner: Option<String>,

    // Performance
    pub threads: Option<usize>,

    // Family filtering
    pub include_families: Option<String>,
    pub exclude_families: Option<String>,

    // Flags
    pub dry_run: Option<bool>,
    pub verbose: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config = Self::from_toml(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# nucmsa.toml - Configuration file for nucmsa
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Directory with one protein alignment (FASTA) per gene family
msa_dir = "/path/to/msa"

# File extension of the protein alignments
msa_extension = "msa"

# Unaligned nucleotide (CDS) FASTA files
nucleotides = ["/path/to/cds.fasta"]

# Directory for nucleotide alignments (omit to write <family>.msa.nuc next to each input)
# output_dir = "nuc_msa"

# Per-family summary table
summary = "families.tsv"

# Pairwise statistics of accepted families (.tsv or .json)
stats = "pairwise_stats.tsv"

# =============================================================================
# CORE SETTINGS
# =============================================================================

# Minimum alignment length after gap stripping
min_length = 100

# Gap character used in the alignments
gap_char = "-"

# Nucleotide sequences ending inside an aligned codon: skip, propagate
truncated_codons = "skip"

# Program that produced the protein alignments (recorded in the summary)
aligner = "muscle"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
threads = 8

# =============================================================================
# FAMILY FILTERING
# =============================================================================

# Include only families matching regex pattern
# include_families = "GF_.*"

# Exclude families matching regex pattern
# exclude_families = "TE_.*"

# =============================================================================
# FLAGS
# =============================================================================

# Validate inputs without computation (dry run)
dry_run = false

# Log per-family progress
verbose = false
"#
        .to_string()
    }
}
