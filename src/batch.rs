// batch.rs - Running the pipeline over many gene families

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::core::{
    default_output_path, AlignmentError, AlignmentPipeline, FamilyReport, PipelineState, ProteinSource,
};
use crate::data::{load_fasta_into, FamilyFile, SequenceMap};

/// Reports of all families, in family order, plus families whose output could not be written
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub reports: Vec<(String, FamilyReport)>,
    pub failures: Vec<(String, AlignmentError)>,
}

impl BatchOutcome {
    /// Number of families per terminal state
    pub fn state_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for (_, report) in &self.reports {
            let key = match report.state {
                PipelineState::Accepted => "accepted",
                PipelineState::RejectedShort => "rejected_short",
                PipelineState::RejectedMismatch => "rejected_mismatch",
                PipelineState::RejectedMissingInput => "rejected_missing_input",
                _ => "incomplete",
            };
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }

    pub fn accepted(&self) -> usize {
        self.reports.iter().filter(|(_, r)| r.is_accepted()).count()
    }

    /// Total number of genes skipped with a diagnostic
    pub fn skipped_genes(&self) -> usize {
        self.reports.iter().map(|(_, r)| r.diagnostics.len()).sum()
    }
}

/// Load and merge nucleotide FASTA files into one map
pub fn load_nucleotides(paths: &[String]) -> Result<SequenceMap, String> {
    let mut sequences = SequenceMap::new();
    for path in paths {
        let count = load_fasta_into(&mut sequences, Path::new(path)).map_err(|e| e.to_string())?;
        println!("  📄 {}: {} sequences loaded", path, count);
    }
    Ok(sequences)
}

/// Output file for a family: inside `output_dir` as `<family>.<ext>.nuc`, or next to the input
pub fn output_path_for(family: &FamilyFile, output_dir: Option<&Path>) -> PathBuf {
    let default = default_output_path(&family.path);
    match (output_dir, default.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => default,
    }
}

/// Run the pipeline for every family in parallel. Families never share state,
/// so a failure in one leaves the others untouched.
pub fn run_families(
    families: &[FamilyFile],
    nucleotides: &SequenceMap,
    pipeline: &AlignmentPipeline,
    output_dir: Option<&Path>,
    show_progress: bool,
) -> BatchOutcome {
    let start = Instant::now();
    let pb = if show_progress {
        let pb = ProgressBar::new(families.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} families ({percent}%) ETA: {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let processed = AtomicUsize::new(0);
    let results: Vec<_> = families
        .par_iter()
        .map(|family| {
            let output = output_path_for(family, output_dir);
            let result = pipeline.run(&ProteinSource::File(family.path.clone()), nucleotides, &output);

            match &result {
                Ok(report) => log::info!("{}: {}", family.name, report.state),
                Err(e) => log::error!("{}: {}", family.name, e),
            }

            let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
            pb.set_position(count as u64);
            (family.name.clone(), result)
        })
        .collect();

    pb.finish_with_message("✅ All families processed!");

    let mut outcome = BatchOutcome::default();
    for (name, result) in results {
        match result {
            Ok(report) => outcome.reports.push((name, report)),
            Err(e) => outcome.failures.push((name, e)),
        }
    }

    log::info!(
        "Processed {} families in {:.2}s",
        families.len(),
        start.elapsed().as_secs_f64()
    );
    outcome
}
