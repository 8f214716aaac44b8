// mod.rs - Output writers: nucleotide alignments, family summary, pairwise statistics

use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::{AlignmentError, FamilyReport, Rejection};
use crate::data::SequenceMap;

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<(), String> {
    if let Some(parent) = file_path.parent() {
        create_dir_all(parent)
            .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
    }
    Ok(())
}

/// Serialize an alignment: a `\t{count}\t{length}` header line, then one
/// identifier line and one sequence line per gene.
pub fn format_nucleotide_msa<W: Write>(writer: &mut W, alignment: &SequenceMap) -> std::io::Result<()> {
    let length = alignment.values().next().map(|s| s.len()).unwrap_or(0);
    writeln!(writer, "\t{}\t{}", alignment.len(), length)?;
    for (gene_id, sequence) in alignment {
        writer.write_all(gene_id.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.write_all(sequence)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Write a serialized alignment to a file
pub fn write_nucleotide_msa(file_path: &Path, alignment: &SequenceMap) -> Result<(), AlignmentError> {
    let io_error = |message: String| AlignmentError::Io {
        path: file_path.to_path_buf(),
        message,
    };

    ensure_parent_dir(file_path).map_err(io_error)?;
    let file = File::create(file_path).map_err(|e| io_error(format!("Failed to create output file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    format_nucleotide_msa(&mut writer, alignment).map_err(|e| io_error(format!("Write error: {}", e)))?;
    writer.flush().map_err(|e| io_error(format!("Flush error: {}", e)))?;
    Ok(())
}

/// Write the per-family summary table (TSV with a commented header)
pub fn write_summary(
    file_path: &Path,
    families: &[(String, FamilyReport)],
    command_line: &str,
    aligner: &str,
) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path.display(), e))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Command: {}", command_line).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# nucmsa v{}", env!("CARGO_PKG_VERSION")).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# Aligner: {}", aligner).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "family\tstatus\treason\traw_length\tstripped_length\tsequences\tskipped\toutput")
        .map_err(|e| format!("Write error: {}", e))?;

    for (family, report) in families {
        let (reason, raw_length, stripped_length, sequences, output) = match &report.outcome {
            Ok(result) => (
                "-".to_string(),
                result.raw_length.to_string(),
                result.stripped_length.to_string(),
                result.sequences.to_string(),
                result.output.display().to_string(),
            ),
            Err(rejection) => {
                let (raw, stripped) = match rejection {
                    Rejection::TooShort {
                        raw_length,
                        stripped_length,
                        ..
                    } => (raw_length.to_string(), stripped_length.to_string()),
                    _ => ("NA".to_string(), "NA".to_string()),
                };
                (
                    rejection.to_string().replace('\t', " "),
                    raw,
                    stripped,
                    "NA".to_string(),
                    "-".to_string(),
                )
            }
        };

        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            family,
            report.state,
            reason,
            raw_length,
            stripped_length,
            sequences,
            report.diagnostics.len(),
            output
        )
        .map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Family summary written to: {}", file_path.display());
    Ok(())
}

/// Write pairwise statistics of accepted families as TSV rows
pub fn write_stats_tsv(file_path: &Path, families: &[(String, FamilyReport)]) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path.display(), e))?;

    writer
        .write_record(["family", "gene1", "gene2", "identity", "coverage", "indeterminate"])
        .map_err(|e| format!("Write error: {}", e))?;

    for (family, report) in families {
        let Some(result) = report.result() else {
            continue;
        };
        for (gene1, row) in &result.stats {
            for (gene2, pair) in row {
                let identity = format!("{:.6}", pair.identity);
                let coverage = format!("{:.6}", pair.coverage);
                writer
                    .write_record([
                        family.as_str(),
                        gene1.as_str(),
                        gene2.as_str(),
                        identity.as_str(),
                        coverage.as_str(),
                        if pair.indeterminate { "true" } else { "false" },
                    ])
                    .map_err(|e| format!("Write error: {}", e))?;
            }
        }
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Pairwise statistics written to: {}", file_path.display());
    Ok(())
}

/// Write pairwise statistics as JSON: family -> gene1 -> gene2 -> [identity, coverage]
pub fn write_stats_json(file_path: &Path, families: &[(String, FamilyReport)]) -> Result<(), String> {
    ensure_parent_dir(file_path)?;

    let mut nested: BTreeMap<&str, BTreeMap<&str, BTreeMap<&str, [f64; 2]>>> = BTreeMap::new();
    for (family, report) in families {
        let Some(result) = report.result() else {
            continue;
        };
        let family_stats = nested.entry(family.as_str()).or_default();
        for (gene1, row) in &result.stats {
            let gene_stats = family_stats.entry(gene1.as_str()).or_default();
            for (gene2, pair) in row {
                gene_stats.insert(gene2.as_str(), [pair.identity, pair.coverage]);
            }
        }
    }

    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path.display(), e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &nested).map_err(|e| format!("Failed to serialize statistics: {}", e))?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;

    println!("✅ Pairwise statistics written to: {} (JSON format)", file_path.display());
    Ok(())
}

/// Write pairwise statistics, choosing the format from the file extension
pub fn write_stats(file_path: &Path, families: &[(String, FamilyReport)]) -> Result<(), String> {
    match file_path.extension().and_then(|s| s.to_str()).map(|s| s.to_lowercase()).as_deref() {
        Some("json") => write_stats_json(file_path, families),
        _ => write_stats_tsv(file_path, families),
    }
}
