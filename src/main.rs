// main.rs - CLI entry point

use std::path::Path;
use std::time::Instant;

use nucmsa::cli::Config;
use nucmsa::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    init_logging(args.verbose);

    println!("🚀 nucmsa v{}", env!("CARGO_PKG_VERSION"));

    let validation_result = validate_args(&args)?;
    let pipeline_config = validation_result.pipeline_config.clone();

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let total_start = Instant::now();

    // msa_dir is checked by validate_args
    let msa_dir = Path::new(args.msa_dir.as_deref().unwrap_or_default());
    let families = discover_families(
        msa_dir,
        &args.msa_extension,
        validation_result.family_include_regex.as_ref(),
        validation_result.family_exclude_regex.as_ref(),
    )?;
    println!("🧬 Gene families: {} (*.{} in {})", families.len(), args.msa_extension, msa_dir.display());

    println!("🧬 Loading nucleotide sequences...");
    let nucleotides = load_nucleotides(&args.nucleotides)?;
    println!("✅ Nucleotide sequences loaded: {}", nucleotides.len());

    println!("📏 Minimum stripped length: {}", pipeline_config.min_length);
    println!("✂️  Gap character: '{}'", pipeline_config.gap_char as char);
    println!("🧩 Truncated codons: {}", pipeline_config.truncated_codons.description());
    println!("🔧 Aligner: {}", args.aligner);

    if args.dry_run {
        println!("✅ Dry run completed successfully");
        return Ok(());
    }

    if families.is_empty() {
        return Err(format!("No *.{} files found in {}", args.msa_extension, msa_dir.display()));
    }

    let output_dir = args.output_dir.as_deref().map(Path::new);
    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create output directory '{}': {}", dir.display(), e))?;
    }

    println!("\n🔄 Building codon alignments...");
    let pipeline = AlignmentPipeline::new(pipeline_config);
    let outcome = run_families(&families, &nucleotides, &pipeline, output_dir, true);

    print_outcome(&outcome);

    if let Some(summary_path) = &args.summary {
        write_summary(Path::new(summary_path), &outcome.reports, &command_line, &args.aligner)?;
    }
    if let Some(stats_path) = &args.stats {
        write_stats(Path::new(stats_path), &outcome.reports)?;
    }

    println!("\n⏱️  Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    if !outcome.failures.is_empty() {
        return Err(format!("{} families could not be written", outcome.failures.len()));
    }
    Ok(())
}

/// Warnings by default, info with --verbose; RUST_LOG overrides both
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn print_outcome(outcome: &BatchOutcome) {
    println!("\n📊 === FAMILY SUMMARY ===");
    for (state, count) in outcome.state_counts() {
        println!("  • {}: {}", state, count);
    }
    if outcome.skipped_genes() > 0 {
        println!("  ⚠️  Genes skipped (missing or truncated nucleotide sequence): {}", outcome.skipped_genes());
    }
    for (family, error) in &outcome.failures {
        eprintln!("  ❌ {}: {}", family, error);
    }
    println!("✅ Accepted families: {}/{}", outcome.accepted(), outcome.reports.len() + outcome.failures.len());
}
