// mod.rs - Data structures and readers

pub mod families;
pub mod sequence;

// Re-export main types for convenience
pub use families::{discover_families, FamilyFile};
pub use sequence::{load_fasta_into, read_fasta, sequence_map, uniform_length, SequenceMap};
