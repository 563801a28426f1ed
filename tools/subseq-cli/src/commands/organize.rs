//! Lay out a subtitle file as per-sequence folders.

use anyhow::Context;
use subseq_common::config::LayoutConfig;
use subseq_layout::Summary;

pub fn run(layout: &LayoutConfig, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let summary = if dry_run {
        let entries = subseq_srt::parse_file(&layout.subtitle_file)
            .with_context(|| format!("Failed to parse {}", layout.subtitle_file.display()))?;
        let plan = subseq_layout::plan(&entries, &layout.audio_dir, &layout.output_root);
        if !json {
            for planned in &plan.sequences {
                let audio = if planned.audio_present {
                    "audio"
                } else {
                    "no audio"
                };
                println!("  {} ({audio})", planned.paths.folder.display());
            }
            println!();
        }
        plan.summary()
    } else {
        subseq_layout::run(layout).context("Failed to organize subtitle sequences")?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, dry_run);
    }

    Ok(())
}

fn print_summary(summary: &Summary, dry_run: bool) {
    if dry_run {
        println!("Dry run, nothing written.");
    } else {
        println!("Processing complete!");
    }
    println!("  Total sequences processed: {}", summary.total);
    println!("  Sequences with audio: {}", summary.with_audio);
    println!("  Sequences missing audio: {}", summary.missing_audio);
    println!("  Output folder: {}", summary.output_root.display());
}
