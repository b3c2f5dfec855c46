//! Show the sprint review schedule, audio tracks and duration check.

use std::path::PathBuf;

use super::load_sprint;

pub fn run(config: PathBuf, public: PathBuf, theme: String) -> anyhow::Result<()> {
    let sprint = load_sprint(&config, &public, &theme)?;
    let timeline = &sprint.timeline;
    let fps = timeline.fps();
    let info = &sprint.config.info;

    println!("{} sprint review: {} {}", info.name, info.product, info.version);
    println!(
        "  {} frames @ {} ({}x{}), theme {}",
        timeline.duration(),
        fps,
        timeline.config().width,
        timeline.config().height,
        sprint.theme.name
    );
    println!();

    println!("Segments:");
    for segment in timeline.segments() {
        println!(
            "  L{} {} {:>6} +{:<5} {:<16} {}",
            segment.layer,
            fps.timecode(segment.range.start),
            segment.range.start,
            segment.range.duration,
            segment.content.kind_name(),
            segment.label
        );
    }
    println!();

    println!("Audio:");
    if timeline.audio_tracks().is_empty() {
        println!("  (none)");
    }
    for track in timeline.audio_tracks() {
        println!(
            "  {} from frame {} at volume {:.2}",
            track.file, track.start_frame, track.volume
        );
    }
    println!();

    let declared = sprint.config.video.duration_in_frames();
    match timeline.verify_declared(declared) {
        Ok(()) => println!("Declared duration matches: {declared} frames"),
        Err(e) => {
            tracing::warn!("{e}");
            println!(
                "Declared duration {declared} frames differs from computed {} frames",
                timeline.duration()
            );
        }
    }
    Ok(())
}
