use std::fs;
use std::path::Path;

use nucmsa::batch::{load_nucleotides, run_families};
use nucmsa::prelude::*;

fn write(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

/// Three families: one accepted, one too short, one with ragged protein rows
fn setup(dir: &Path) -> (Vec<FamilyFile>, SequenceMap) {
    let msa_dir = dir.join("msa");
    fs::create_dir_all(&msa_dir).unwrap();

    write(&msa_dir.join("GF_0001.msa"), ">g1 first gene\nM-K\n>g2\nMAK\n>g9\nMAK\n");
    write(&msa_dir.join("GF_0002.msa"), ">g3\nM\n>g4\nM\n");
    write(&msa_dir.join("GF_0003.msa"), ">g1\nMK\n>g2\nMAK\n");

    let cds = dir.join("cds.fasta");
    write(
        &cds,
        ">g1\nATGAAA\n>g2\nATGGCAAAA\n>g3\nATG\n>g4\nATG\n",
    );

    let families = discover_families(&msa_dir, "msa", None, None).unwrap();
    let nucleotides = load_nucleotides(&[cds.display().to_string()]).unwrap();
    (families, nucleotides)
}

#[test]
fn test_batch_accepts_and_rejects_per_family() {
    let dir = tempfile::tempdir().unwrap();
    let (families, nucleotides) = setup(dir.path());
    assert_eq!(families.len(), 3);

    let pipeline = AlignmentPipeline::new(PipelineConfig::default().with_min_length(6));
    let outcome = run_families(&families, &nucleotides, &pipeline, None, false);

    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.accepted(), 1);

    let states: Vec<PipelineState> = outcome.reports.iter().map(|(_, r)| r.state).collect();
    assert_eq!(
        states,
        vec![
            PipelineState::Accepted,
            PipelineState::RejectedShort,
            PipelineState::RejectedMismatch
        ]
    );

    // g9 has no nucleotide sequence and is dropped with a diagnostic
    let (_, accepted) = &outcome.reports[0];
    assert_eq!(accepted.diagnostics, vec![Diagnostic::missing_sequence("g9")]);

    let result = accepted.result().unwrap();
    assert_eq!(result.raw_length, 9);
    assert_eq!(result.stripped_length, 6);
    assert_eq!(
        fs::read_to_string(&result.output).unwrap(),
        "\t2\t6\ng1\nATGAAA\ng2\nATGAAA\n"
    );

    // Rejected families leave no output behind
    assert!(!dir.path().join("msa/GF_0002.msa.nuc").exists());
    assert!(!dir.path().join("msa/GF_0003.msa.nuc").exists());
}

#[test]
fn test_batch_output_dir_and_tables() {
    let dir = tempfile::tempdir().unwrap();
    let (families, nucleotides) = setup(dir.path());
    let out_dir = dir.path().join("nuc");
    fs::create_dir_all(&out_dir).unwrap();

    let pipeline = AlignmentPipeline::new(PipelineConfig::default().with_min_length(1));
    let outcome = run_families(&families, &nucleotides, &pipeline, Some(&out_dir), false);
    assert_eq!(outcome.accepted(), 2);
    assert!(out_dir.join("GF_0001.msa.nuc").exists());
    assert_eq!(
        fs::read_to_string(out_dir.join("GF_0002.msa.nuc")).unwrap(),
        "\t2\t3\ng3\nATG\ng4\nATG\n"
    );

    let summary = dir.path().join("families.tsv");
    write_summary(&summary, &outcome.reports, "nucmsa", "prank").unwrap();
    let content = fs::read_to_string(&summary).unwrap();
    assert!(content.contains("GF_0003\trejected_mismatch\t"));

    let stats = dir.path().join("stats.json");
    write_stats(&stats, &outcome.reports).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&stats).unwrap()).unwrap();
    assert_eq!(value["GF_0002"]["g3"]["g4"][0], 1.0);
    assert!(value.get("GF_0003").is_none());

    let counts = outcome.state_counts();
    assert_eq!(counts.get("accepted"), Some(&2));
    assert_eq!(counts.get("rejected_mismatch"), Some(&1));
}

#[test]
fn test_missing_alignment_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, nucleotides) = setup(dir.path());
    let families = vec![FamilyFile {
        name: "GF_9999".to_string(),
        path: dir.path().join("msa/GF_9999.msa"),
    }];

    let outcome = run_families(&families, &nucleotides, &AlignmentPipeline::default(), None, false);
    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(outcome.reports[0].1.state, PipelineState::RejectedMissingInput);
}
