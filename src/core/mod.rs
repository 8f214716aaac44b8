// mod.rs - Core logic module

pub mod backtranslate;
pub mod config;
pub mod error;
pub mod gaps;
pub mod hamming;
pub mod pipeline;
pub mod stats;

// Re-export main types for convenience
pub use backtranslate::{back_translate, BackTranslation};
pub use config::{PipelineConfig, TruncatedCodonPolicy, DEFAULT_GAP_CHAR, DEFAULT_MIN_LENGTH};
pub use error::{AlignmentError, Diagnostic, DiagnosticKind};
pub use gaps::{find_gap_columns, strip_gaps, GapColumns, GapProfile};
pub use hamming::hamming_distance;
pub use pipeline::{
    default_output_path, AlignmentPipeline, EvaluatedFamily, FamilyEvaluation, FamilyReport,
    PipelineResult, PipelineState, ProteinSource, Rejection,
};
pub use stats::{pairwise_alignment_stats, PairStats, PairwiseStatsMatrix};
