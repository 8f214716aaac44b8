// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.msa_dir.is_none() {
            self.msa_dir = config.msa_dir;
        }
        if self.msa_extension == "msa" {
            if let Some(extension) = config.msa_extension {
                self.msa_extension = extension;
            }
        }
        if self.nucleotides.is_empty() {
            self.nucleotides = config.nucleotides.unwrap_or_default();
        }
        if self.output_dir.is_none() {
            self.output_dir = config.output_dir;
        }
        if self.summary.is_none() {
            self.summary = config.summary;
        }
        if self.stats.is_none() {
            self.stats = config.stats;
        }

        // Core settings (only override defaults, not explicit CLI values)
        if self.min_length == 100 {
            if let Some(min_length) = config.min_length {
                self.min_length = min_length;
            }
        }
        if self.gap_char == "-" {
            if let Some(gap_char) = config.gap_char {
                self.gap_char = gap_char;
            }
        }
        if self.truncated_codons == "skip" {
            if let Some(policy) = config.truncated_codons {
                self.truncated_codons = policy;
            }
        }
        if self.aligner == "muscle" {
            if let Some(aligner) = config.aligner {
                self.aligner = aligner;
            }
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Family filtering
        if self.include_families.is_none() {
            self.include_families = config.include_families;
        }
        if self.exclude_families.is_none() {
            self.exclude_families = config.exclude_families;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }
        if !self.verbose && config.verbose.unwrap_or(false) {
            self.verbose = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
