// main.rs - CLI entry point

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

use seqfam::cli::Config;
use seqfam::output::{self, OutputLayout, RunSummary};
use seqfam::output::summary::SampleSummary;
use seqfam::prelude::*;
use seqfam::stats;

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

    let validation = validate_args(&args)?;

    println!("🚀 seqfam v{}", seqfam::VERSION);
    println!(
        "⚙️  Families: {} | max distance: {} | min occurrence: {}",
        validation.params.target_families, validation.params.max_distance, args.min_occurrence
    );

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
    let layout = OutputLayout::new(&args.output_dir);

    // Load and aggregate reads
    let load_start = Instant::now();
    let samples = load_samples(
        &validation.inputs,
        validation.sample_pattern.as_ref(),
        !args.quiet,
    )?;
    let sources = SourceCorpora::aggregate(&samples);
    let eligible = sources.combined.filter_min_occurrence(args.min_occurrence);
    let load_time = load_start.elapsed();

    println!(
        "📊 {} reads, {} distinct sequences, {} with at least {} occurrences ({} reads)",
        sources.combined.total_records(),
        sources.combined.len(),
        eligible.len(),
        args.min_occurrence,
        eligible.total_records()
    );

    // Kept tables: aggregate and per sample
    output::write_sequence_counts(&layout.kept_sequences(), &eligible.sorted_entries())?;
    for (sample, corpus) in &sources.per_source {
        let kept = corpus.filter_min_occurrence(args.min_occurrence);
        output::write_sequence_counts(&layout.sample_kept(sample), &kept.sorted_entries())?;
        println!("  📄 {}: {} sequences kept", sample, kept.len());
    }

    if args.dry_run {
        println!("✅ Dry run completed successfully");
        return Ok(());
    }

    if eligible.is_empty() {
        println!("⚠️  No sequence reaches the occurrence threshold, no family will be built");
    }

    // Clustering
    let cluster_start = Instant::now();
    println!(
        "🧬 Building up to {} families from {} sequences...",
        validation.params.target_families,
        eligible.len()
    );

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(validation.params.target_families as u64)
    };
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} families {msg}",
        )
        .map_err(|e| format!("Invalid progress template: {}", e))?,
    );

    let families = FamilyBuilder::new(&eligible, validation.params)
        .with_progress(pb)
        .run();
    let cluster_time = cluster_start.elapsed();

    if families.len() < validation.params.target_families {
        println!(
            "⚠️  Only {} of {} families could be built ({} sequences left unassigned)",
            families.len(),
            validation.params.target_families,
            families.unassigned
        );
    }

    for family in families.iter() {
        println!(
            "  🧬 Family {}: {} ({} reads) | {} distinct, {} reads",
            family.id,
            family.reference.sequence,
            family.reference.count,
            family.distinct_len(),
            family.expanded_len()
        );
    }

    // Outputs
    let output_start = Instant::now();
    output::write_families(&layout, &families, !args.no_expanded)?;
    output::write_family_sizes(&layout.family_sizes(), &stats::family_sizes(&families))?;

    if args.stats {
        write_statistics(&layout, &families, &sources, args.profile_offset)?;
    }

    if let Some(summary_path) = &args.summary {
        let summary = RunSummary {
            version: seqfam::VERSION.to_string(),
            generated: chrono::Local::now().to_rfc3339(),
            command: command_line,
            params: validation.params,
            min_occurrence: args.min_occurrence,
            samples: samples
                .iter()
                .map(|sample| SampleSummary {
                    name: sample.name.clone(),
                    path: sample.path.display().to_string(),
                    reads: sample.len() as u64,
                    distinct_sequences: sources.source(&sample.name).map_or(0, |c| c.len()),
                })
                .collect(),
            total_reads: sources.combined.total_records(),
            distinct_sequences: sources.combined.len(),
            eligible_sequences: eligible.len(),
            eligible_reads: eligible.total_records(),
            families: RunSummary::family_summaries(&families),
            unassigned_sequences: families.unassigned,
            cancelled: families.cancelled,
            elapsed_seconds: total_start.elapsed().as_secs_f64(),
        };
        output::write_summary(std::path::Path::new(summary_path), &summary)?;
    }
    let output_time = output_start.elapsed();

    let total_time = total_start.elapsed();
    println!("\n⏱️  Timing:");
    println!("  • Loading:    {:.2}s", load_time.as_secs_f64());
    println!("  • Clustering: {:.2}s", cluster_time.as_secs_f64());
    println!("  • Output:     {:.2}s", output_time.as_secs_f64());
    println!("  • Total:      {:.2}s", total_time.as_secs_f64());
    println!("✅ {} families written to: {}", families.len(), layout.dir.display());

    Ok(())
}

fn write_statistics(
    layout: &OutputLayout,
    families: &FamilySet,
    sources: &SourceCorpora,
    profile_offset: usize,
) -> Result<(), String> {
    println!("\n📈 === FAMILY STATISTICS ===");

    let entropies: Vec<(usize, f64)> = families
        .iter()
        .map(|family| (family.id, stats::shannon_entropy(family)))
        .collect();
    output::write_scalar_table(&layout.entropy(), &entropies)?;

    let mut mean_differences = Vec::new();
    for family in families.iter() {
        output::write_frequencies(
            &layout.family_frequencies(family.id),
            &stats::sequence_frequencies(family),
        )?;
        output::write_length_distribution(
            &layout.family_lengths(family.id),
            &stats::length_distribution(family),
        )?;

        if let Some(profile) = stats::PositionalProfile::from_family(family, profile_offset) {
            output::write_profile(&layout.family_profile(family.id), &profile)?;
            output::write_scalar_table(
                &layout.family_position_entropy(family.id),
                &profile.position_entropy(),
            )?;
            if let Some(difference) = profile.mean_pairwise_difference() {
                mean_differences.push((family.id, difference));
            }
        }
    }
    output::write_scalar_table(&layout.mean_difference(), &mean_differences)?;
    output::write_sample_profiles(
        layout,
        &stats::sample_profiles(families, sources, profile_offset),
    )?;
    output::write_occupancy(&layout.occupancy(), &stats::family_occupancy(families, sources))?;

    for (id, entropy) in &entropies {
        println!("  • Family {}: entropy {:.3}", id, entropy);
    }
    println!("✅ Statistics written to: {}", layout.dir.display());
    Ok(())
}
