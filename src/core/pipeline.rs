// pipeline.rs - Per-family accept/reject pipeline

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::backtranslate::back_translate;
use super::config::PipelineConfig;
use super::error::{AlignmentError, Diagnostic};
use super::gaps::GapProfile;
use super::stats::{pairwise_stats_from_profile, PairwiseStatsMatrix};
use crate::data::{read_fasta, SequenceMap};
use crate::output::write_nucleotide_msa;

/// States a family passes through. The last four are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Start,
    Loaded,
    BackTranslated,
    StatsComputed,
    Stripped,
    Accepted,
    RejectedShort,
    RejectedMismatch,
    RejectedMissingInput,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineState::Accepted
                | PipelineState::RejectedShort
                | PipelineState::RejectedMismatch
                | PipelineState::RejectedMissingInput
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            PipelineState::Start => "start",
            PipelineState::Loaded => "loaded",
            PipelineState::BackTranslated => "backtranslated",
            PipelineState::StatsComputed => "stats_computed",
            PipelineState::Stripped => "stripped",
            PipelineState::Accepted => "accepted",
            PipelineState::RejectedShort => "rejected_short",
            PipelineState::RejectedMismatch => "rejected_mismatch",
            PipelineState::RejectedMissingInput => "rejected_missing_input",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a family was not accepted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("missing input: {0}")]
    MissingInput(AlignmentError),

    #[error("alignment mismatch: {0}")]
    Mismatch(AlignmentError),

    #[error("alignment too short after gap stripping: {stripped_length} < {min_length}")]
    TooShort {
        raw_length: usize,
        stripped_length: usize,
        min_length: usize,
    },
}

impl Rejection {
    /// Terminal state matching this rejection
    pub fn state(&self) -> PipelineState {
        match self {
            Rejection::MissingInput(_) => PipelineState::RejectedMissingInput,
            Rejection::Mismatch(_) => PipelineState::RejectedMismatch,
            Rejection::TooShort { .. } => PipelineState::RejectedShort,
        }
    }
}

/// Where the protein alignment of a family comes from
#[derive(Debug, Clone)]
pub enum ProteinSource {
    File(PathBuf),
    InMemory(SequenceMap),
}

/// Stripped alignment and its statistics, before anything is written
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedFamily {
    pub alignment: SequenceMap,
    pub raw_length: usize,
    pub stripped_length: usize,
    pub stats: PairwiseStatsMatrix,
}

/// Outcome of the in-memory part of the pipeline
#[derive(Debug, Clone)]
pub struct FamilyEvaluation {
    pub state: PipelineState,
    pub diagnostics: Vec<Diagnostic>,
    pub outcome: Result<EvaluatedFamily, Rejection>,
}

/// Result record of an accepted family
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub output: PathBuf,
    pub raw_length: usize,
    pub stripped_length: usize,
    pub sequences: usize,
    pub stats: PairwiseStatsMatrix,
}

/// Everything a caller learns about one family run
#[derive(Debug, Clone)]
pub struct FamilyReport {
    pub state: PipelineState,
    pub diagnostics: Vec<Diagnostic>,
    pub outcome: Result<PipelineResult, Rejection>,
}

impl FamilyReport {
    fn rejected(diagnostics: Vec<Diagnostic>, rejection: Rejection) -> Self {
        Self {
            state: rejection.state(),
            diagnostics,
            outcome: Err(rejection),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn result(&self) -> Option<&PipelineResult> {
        self.outcome.as_ref().ok()
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        self.outcome.as_ref().err()
    }
}

/// Output path used for an alignment file: the same path with `.nuc` appended
pub fn default_output_path(msa_path: &Path) -> PathBuf {
    let mut name: OsString = msa_path.as_os_str().to_owned();
    name.push(".nuc");
    PathBuf::from(name)
}

/// Back-translation, statistics, gap stripping and length filter for one family
#[derive(Debug, Clone, Default)]
pub struct AlignmentPipeline {
    config: PipelineConfig,
}

impl AlignmentPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the protein alignment. A missing or unreadable source rejects the family.
    pub fn load(&self, source: &ProteinSource) -> Result<SequenceMap, Rejection> {
        match source {
            ProteinSource::InMemory(msa) => Ok(msa.clone()),
            ProteinSource::File(path) => {
                if !path.is_file() {
                    log::warn!("MSA file {} not found", path.display());
                    return Err(Rejection::MissingInput(AlignmentError::InputNotFound {
                        path: path.clone(),
                    }));
                }
                read_fasta(path).map_err(Rejection::MissingInput)
            }
        }
    }

    /// Run every in-memory step on a loaded protein alignment
    pub fn evaluate(&self, protein_msa: &SequenceMap, nucleotides: &SequenceMap) -> FamilyEvaluation {
        let gap_char = self.config.gap_char;
        log::debug!("{} -> {}", PipelineState::Start, PipelineState::Loaded);

        let translation = match back_translate(
            protein_msa,
            nucleotides,
            gap_char,
            self.config.truncated_codons,
        ) {
            Ok(translation) => translation,
            Err(e) => {
                let rejection = Rejection::Mismatch(e);
                log::info!("Family rejected: {}", rejection);
                return FamilyEvaluation {
                    state: rejection.state(),
                    diagnostics: Vec::new(),
                    outcome: Err(rejection),
                };
            }
        };
        let diagnostics = translation.diagnostics;
        let alignment = translation.alignment;
        log::debug!("{} -> {}", PipelineState::Loaded, PipelineState::BackTranslated);

        let profile = GapProfile::new(&alignment, gap_char);
        let stats = pairwise_stats_from_profile(&profile);
        let raw_length = alignment.values().next().map(|s| s.len()).unwrap_or(0);
        log::debug!(
            "{} -> {} (raw length {})",
            PipelineState::BackTranslated,
            PipelineState::StatsComputed,
            raw_length
        );

        let stripped = match profile.strip() {
            Ok(stripped) => stripped,
            Err(e) => {
                let rejection = Rejection::Mismatch(e);
                log::info!("Family rejected: {}", rejection);
                return FamilyEvaluation {
                    state: rejection.state(),
                    diagnostics,
                    outcome: Err(rejection),
                };
            }
        };
        let stripped_length = stripped.values().next().map(|s| s.len()).unwrap_or(0);
        log::debug!(
            "{} -> {} (stripped length {})",
            PipelineState::StatsComputed,
            PipelineState::Stripped,
            stripped_length
        );

        if stripped_length < self.config.min_length {
            let rejection = Rejection::TooShort {
                raw_length,
                stripped_length,
                min_length: self.config.min_length,
            };
            log::info!("Family rejected: {}", rejection);
            return FamilyEvaluation {
                state: rejection.state(),
                diagnostics,
                outcome: Err(rejection),
            };
        }

        FamilyEvaluation {
            state: PipelineState::Accepted,
            diagnostics,
            outcome: Ok(EvaluatedFamily {
                alignment: stripped,
                raw_length,
                stripped_length,
                stats,
            }),
        }
    }

    /// Full run: load, evaluate and, if accepted, write the stripped alignment
    /// to `output_path`. Only a failed write is returned as an error.
    pub fn run(
        &self,
        source: &ProteinSource,
        nucleotides: &SequenceMap,
        output_path: &Path,
    ) -> Result<FamilyReport, AlignmentError> {
        let protein_msa = match self.load(source) {
            Ok(msa) => msa,
            Err(rejection) => return Ok(FamilyReport::rejected(Vec::new(), rejection)),
        };

        let evaluation = self.evaluate(&protein_msa, nucleotides);
        let family = match evaluation.outcome {
            Ok(family) => family,
            Err(rejection) => return Ok(FamilyReport::rejected(evaluation.diagnostics, rejection)),
        };

        write_nucleotide_msa(output_path, &family.alignment)?;

        Ok(FamilyReport {
            state: PipelineState::Accepted,
            diagnostics: evaluation.diagnostics,
            outcome: Ok(PipelineResult {
                output: output_path.to_path_buf(),
                raw_length: family.raw_length,
                stripped_length: family.stripped_length,
                sequences: family.alignment.len(),
                stats: family.stats,
            }),
        })
    }

    /// Run on an alignment file, writing next to it with a `.nuc` suffix
    pub fn run_file(&self, msa_path: &Path, nucleotides: &SequenceMap) -> Result<FamilyReport, AlignmentError> {
        self.run(
            &ProteinSource::File(msa_path.to_path_buf()),
            nucleotides,
            &default_output_path(msa_path),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sequence_map;

    fn example_inputs() -> (SequenceMap, SequenceMap) {
        (
            sequence_map(&[("g1", "M-K"), ("g2", "MAK")]),
            sequence_map(&[("g1", "ATGAAA"), ("g2", "ATGGCAAAA")]),
        )
    }

    #[test]
    fn test_evaluate_accepts_example() {
        let (protein, nucleotides) = example_inputs();
        let pipeline = AlignmentPipeline::new(PipelineConfig::default().with_min_length(1));

        let evaluation = pipeline.evaluate(&protein, &nucleotides);
        assert_eq!(evaluation.state, PipelineState::Accepted);

        let family = evaluation.outcome.unwrap();
        assert_eq!(family.raw_length, 9);
        assert_eq!(family.stripped_length, 6);
        assert_eq!(family.alignment, sequence_map(&[("g1", "ATGAAA"), ("g2", "ATGAAA")]));
        assert_eq!(family.stats["g1"]["g2"].identity, 1.0);
        assert!((family.stats["g1"]["g2"].coverage - 6.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_rejects_short() {
        let (protein, nucleotides) = example_inputs();
        let pipeline = AlignmentPipeline::default();

        let evaluation = pipeline.evaluate(&protein, &nucleotides);
        assert_eq!(evaluation.state, PipelineState::RejectedShort);
        assert_eq!(
            evaluation.outcome.unwrap_err(),
            Rejection::TooShort {
                raw_length: 9,
                stripped_length: 6,
                min_length: 100
            }
        );
    }

    #[test]
    fn test_min_length_is_inclusive() {
        let (protein, nucleotides) = example_inputs();
        let pipeline = AlignmentPipeline::new(PipelineConfig::default().with_min_length(6));
        assert_eq!(pipeline.evaluate(&protein, &nucleotides).state, PipelineState::Accepted);
    }

    #[test]
    fn test_evaluate_rejects_protein_mismatch() {
        let protein = sequence_map(&[("g1", "M-K"), ("g2", "MA")]);
        let (_, nucleotides) = example_inputs();
        let pipeline = AlignmentPipeline::new(PipelineConfig::default().with_min_length(1));

        let evaluation = pipeline.evaluate(&protein, &nucleotides);
        assert_eq!(evaluation.state, PipelineState::RejectedMismatch);
        assert!(matches!(
            evaluation.outcome,
            Err(Rejection::Mismatch(AlignmentError::AlignmentLengthMismatch { .. }))
        ));
    }

    #[test]
    fn test_missing_sequence_is_reported_not_fatal() {
        let protein = sequence_map(&[("g1", "M-K"), ("g2", "MAK"), ("g3", "MAK")]);
        let (_, nucleotides) = example_inputs();
        let pipeline = AlignmentPipeline::new(PipelineConfig::default().with_min_length(1));

        let evaluation = pipeline.evaluate(&protein, &nucleotides);
        assert_eq!(evaluation.state, PipelineState::Accepted);
        assert_eq!(evaluation.diagnostics, vec![Diagnostic::missing_sequence("g3")]);
        assert_eq!(evaluation.outcome.unwrap().alignment.len(), 2);
    }

    #[test]
    fn test_all_sequences_missing_is_mismatch() {
        let (protein, _) = example_inputs();
        let pipeline = AlignmentPipeline::new(PipelineConfig::default().with_min_length(1));

        let evaluation = pipeline.evaluate(&protein, &SequenceMap::new());
        assert_eq!(evaluation.state, PipelineState::RejectedMismatch);
        assert_eq!(evaluation.diagnostics.len(), 2);
        assert_eq!(
            evaluation.outcome.unwrap_err(),
            Rejection::Mismatch(AlignmentError::EmptyAlignment)
        );
    }

    #[test]
    fn test_propagated_truncation_is_mismatch() {
        let protein = sequence_map(&[("g1", "MK"), ("g2", "MK")]);
        let nucleotides = sequence_map(&[("g1", "ATGAAA"), ("g2", "ATGAA")]);
        let config = PipelineConfig::default()
            .with_min_length(1)
            .with_truncated_codons(crate::core::TruncatedCodonPolicy::Propagate);

        let evaluation = AlignmentPipeline::new(config).evaluate(&protein, &nucleotides);
        assert_eq!(evaluation.state, PipelineState::RejectedMismatch);
        assert!(matches!(
            evaluation.outcome,
            Err(Rejection::Mismatch(AlignmentError::UnequalRowLength { .. }))
        ));
    }

    #[test]
    fn test_run_missing_file() {
        let (_, nucleotides) = example_inputs();
        let pipeline = AlignmentPipeline::default();

        let report = pipeline
            .run_file(Path::new("/nonexistent/GF_0001.msa"), &nucleotides)
            .unwrap();
        assert_eq!(report.state, PipelineState::RejectedMissingInput);
        assert!(report.result().is_none());
        assert!(matches!(
            report.rejection(),
            Some(Rejection::MissingInput(AlignmentError::InputNotFound { .. }))
        ));
    }

    #[test]
    fn test_run_in_memory_writes_output() {
        let (protein, nucleotides) = example_inputs();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("family.nuc");
        let pipeline = AlignmentPipeline::new(PipelineConfig::default().with_min_length(1));

        let report = pipeline
            .run(&ProteinSource::InMemory(protein), &nucleotides, &output)
            .unwrap();
        assert!(report.is_accepted());

        let result = report.result().unwrap();
        assert_eq!(result.output, output);
        assert_eq!(result.sequences, 2);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "\t2\t6\ng1\nATGAAA\ng2\nATGAAA\n"
        );
    }

    #[test]
    fn test_rejected_run_writes_nothing() {
        let (protein, nucleotides) = example_inputs();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("family.nuc");

        let report = AlignmentPipeline::default()
            .run(&ProteinSource::InMemory(protein), &nucleotides, &output)
            .unwrap();
        assert_eq!(report.state, PipelineState::RejectedShort);
        assert!(!output.exists());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/tmp/GF_0001.msa")),
            PathBuf::from("/tmp/GF_0001.msa.nuc")
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(PipelineState::Accepted.is_terminal());
        assert!(PipelineState::RejectedMissingInput.is_terminal());
        assert!(!PipelineState::Stripped.is_terminal());
    }
}
