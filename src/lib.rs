// lib.rs - nucmsa library root

//! # nucmsa - Codon alignments and alignment quality control for gene families
//!
//! Given a protein multiple sequence alignment of a gene family and the
//! unaligned coding sequences of its genes, this library rebuilds the
//! codon-level nucleotide alignment, computes pairwise identity/coverage
//! statistics, strips gap columns and decides whether the family is long
//! enough to be kept for downstream analysis.
//!
//! ## Features
//!
//! - **Back-translation**: every aligned residue becomes its source codon, every gap a gap codon
//! - **Gap stripping**: removal of every column holding a gap in any sequence
//! - **Pairwise statistics**: identity and coverage for all pairs after pair-local stripping
//! - **Explicit outcomes**: accepted families carry their statistics, rejected ones a reason
//! - **Batch mode**: parallel processing of a directory of family alignments
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use nucmsa::prelude::*;
//!
//! let protein = read_fasta(std::path::Path::new("GF_0001.msa"))?;
//! let nucleotides = read_fasta(std::path::Path::new("cds.fasta"))?;
//!
//! let pipeline = AlignmentPipeline::new(PipelineConfig::default().with_min_length(100));
//! let evaluation = pipeline.evaluate(&protein, &nucleotides);
//! match evaluation.outcome {
//!     Ok(family) => println!("kept {} of {} columns", family.stripped_length, family.raw_length),
//!     Err(rejection) => println!("rejected: {}", rejection),
//! }
//! # Ok::<(), nucmsa::core::AlignmentError>(())
//! ```

pub mod batch;
pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::batch::{load_nucleotides, run_families, BatchOutcome};
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{back_translate, hamming_distance, pairwise_alignment_stats, strip_gaps};
    pub use crate::core::{AlignmentError, Diagnostic, DiagnosticKind, Rejection};
    pub use crate::core::{AlignmentPipeline, FamilyReport, PipelineConfig, PipelineState, ProteinSource};
    pub use crate::core::{PairStats, PairwiseStatsMatrix, TruncatedCodonPolicy};
    pub use crate::data::{discover_families, read_fasta, FamilyFile, SequenceMap};
    pub use crate::output::{write_nucleotide_msa, write_stats, write_summary};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{AlignmentError, AlignmentPipeline, PipelineConfig, PipelineState, Rejection};
pub use data::SequenceMap;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "nucmsa v{} - Codon alignments and quality control for gene families",
        VERSION
    )
}
