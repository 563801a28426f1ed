//! Show the entries of a subtitle file.

use std::path::PathBuf;

use anyhow::Context;
use subseq_layout::audio_file_name;

pub fn run(srt: PathBuf, audio: Option<PathBuf>) -> anyhow::Result<()> {
    let entries = subseq_srt::parse_file(&srt)
        .with_context(|| format!("Failed to parse {}", srt.display()))?;

    println!("Subtitles: {}", srt.display());
    println!("  Entries: {}", entries.len());
    println!();

    let mut with_audio = 0;
    for entry in &entries {
        let status = match &audio {
            Some(dir) if dir.join(audio_file_name(entry.sequence)).is_file() => {
                with_audio += 1;
                " [audio]"
            }
            Some(_) => " [missing audio]",
            None => "",
        };
        println!(
            "  {:>5}  {}  {}{status}",
            entry.sequence,
            entry.timing_line(),
            entry.first_line()
        );
    }

    if let Some(dir) = &audio {
        println!();
        println!("Audio: {}", dir.display());
        println!("  With audio: {with_audio}");
        println!("  Missing audio: {}", entries.len() - with_audio);
    }

    Ok(())
}
