// validation.rs - Input validation utilities

use std::path::Path;
use std::str::FromStr;

use regex::Regex;

use crate::cli::args::Args;
use crate::core::{PipelineConfig, TruncatedCodonPolicy};

#[derive(Debug)]
pub struct ValidationResult {
    pub pipeline_config: PipelineConfig,
    pub family_include_regex: Option<Regex>,
    pub family_exclude_regex: Option<Regex>,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let msa_dir = args.msa_dir.as_ref().ok_or("--msa-dir is required")?;
    if !Path::new(msa_dir).is_dir() {
        return Err(format!("Alignment directory does not exist: {}", msa_dir));
    }

    if args.nucleotides.is_empty() {
        return Err("At least one --nucleotides FASTA file is required".to_string());
    }
    for path in &args.nucleotides {
        if !Path::new(path).is_file() {
            return Err(format!("Nucleotide FASTA file not found: {}", path));
        }
    }

    if args.msa_extension.is_empty() || args.msa_extension.starts_with('.') {
        return Err(format!(
            "Invalid alignment extension '{}': give it without the leading dot",
            args.msa_extension
        ));
    }

    let gap_char = parse_gap_char(&args.gap_char)?;
    let truncated_codons = TruncatedCodonPolicy::from_str(&args.truncated_codons)?;

    if args.threads == Some(0) {
        return Err("Thread count must be at least 1".to_string());
    }

    let family_include_regex = if let Some(pattern) = &args.include_families {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid include_families regex: {}", e))?)
    } else {
        None
    };

    let family_exclude_regex = if let Some(pattern) = &args.exclude_families {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid exclude_families regex: {}", e))?)
    } else {
        None
    };

    Ok(ValidationResult {
        pipeline_config: PipelineConfig::default()
            .with_min_length(args.min_length)
            .with_gap_char(gap_char)
            .with_truncated_codons(truncated_codons),
        family_include_regex,
        family_exclude_regex,
    })
}

/// The gap marker must be a single ASCII character
fn parse_gap_char(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [c] if c.is_ascii() && !c.is_ascii_whitespace() => Ok(*c),
        _ => Err(format!("Gap character must be a single ASCII character, got '{}'", value)),
    }
}
