// sequence.rs - Sequence maps and FASTA loading

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use bio::io::fasta;

use crate::core::AlignmentError;

/// Gene identifier to sequence. Iteration is in lexicographic identifier
/// order; an alignment is a map whose values share one length.
pub type SequenceMap = BTreeMap<String, Vec<u8>>;

/// Build a map from string pairs
pub fn sequence_map(entries: &[(&str, &str)]) -> SequenceMap {
    entries
        .iter()
        .map(|(id, seq)| (id.to_string(), seq.as_bytes().to_vec()))
        .collect()
}

/// Length shared by all rows, or `None` if the map is empty or the rows differ
pub fn uniform_length(sequences: &SequenceMap) -> Option<usize> {
    let mut lengths = sequences.values().map(|s| s.len());
    let first = lengths.next()?;
    if lengths.all(|l| l == first) {
        Some(first)
    } else {
        None
    }
}

/// Read a FASTA file; identifiers are headers up to the first whitespace
pub fn read_fasta(path: &Path) -> Result<SequenceMap, AlignmentError> {
    let mut sequences = SequenceMap::new();
    load_fasta_into(&mut sequences, path)?;
    Ok(sequences)
}

/// Add the records of a FASTA file to an existing map.
/// Returns the number of records read.
pub fn load_fasta_into(sequences: &mut SequenceMap, path: &Path) -> Result<usize, AlignmentError> {
    let io_error = |message: String| AlignmentError::Io {
        path: path.to_path_buf(),
        message,
    };

    let file = File::open(path).map_err(|e| io_error(format!("Failed to open FASTA file: {}", e)))?;
    let reader = fasta::Reader::new(BufReader::new(file));
    let mut records = 0;

    for record_result in reader.records() {
        let record = record_result.map_err(|e| io_error(format!("Invalid FASTA record: {}", e)))?;
        let id = record.id().to_string();
        let sequence = record.seq().to_vec();

        if let Some(existing) = sequences.get(&id) {
            if *existing != sequence {
                return Err(io_error(format!(
                    "Duplicate identifier '{}' with a different sequence",
                    id
                )));
            }
        }

        sequences.insert(id, sequence);
        records += 1;
    }

    Ok(records)
}
