// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// nucmsa - Codon alignments from protein alignments, with gap stripping and pairwise statistics
pub struct Args {
    /// directory holding one protein alignment (FASTA) per gene family
    #[argh(option)]
    pub msa_dir: Option<String>,

    /// file extension of the protein alignments (default: msa)
    #[argh(option, default = "String::from(\"msa\")")]
    pub msa_extension: String,

    /// unaligned nucleotide FASTA file (repeatable)
    #[argh(option)]
    pub nucleotides: Vec<String>,

    /// directory for the nucleotide alignments (default: next to each protein alignment)
    #[argh(option)]
    pub output_dir: Option<String>,

    /// per-family summary table (TSV)
    #[argh(option)]
    pub summary: Option<String>,

    /// pairwise statistics of accepted families (.tsv or .json)
    #[argh(option)]
    pub stats: Option<String>,

    /// minimum alignment length after gap stripping (default: 100)
    #[argh(option, default = "100")]
    pub min_length: usize,

    /// gap character (default: -)
    #[argh(option, default = "String::from(\"-\")")]
    pub gap_char: String,

    /// truncated final codons: skip, propagate (default: skip)
    #[argh(option, default = "String::from(\"skip\")")]
    pub truncated_codons: String,

    /// program that produced the protein alignments, recorded in the summary (default: muscle)
    #[argh(option, default = "String::from(\"muscle\")")]
    pub aligner: String,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// include only families matching regex pattern
    #[argh(option)]
    pub include_families: Option<String>,

    /// exclude families matching regex pattern
    #[argh(option)]
    pub exclude_families: Option<String>,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// log per-family progress
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
