//! Show the transition gallery schedule.

use reelkit_scenes::transition_gallery;
use serde::Serialize;

#[derive(Serialize)]
struct Row<'a> {
    label: &'a str,
    kind: &'static str,
    start: i64,
    duration: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Schedule<'a> {
    id: &'a str,
    duration_in_frames: i64,
    fps: f64,
    width: u32,
    height: u32,
    segments: Vec<Row<'a>>,
}

pub fn run(json: bool) -> anyhow::Result<()> {
    let timeline = transition_gallery()?;
    let config = timeline.config();

    let schedule = Schedule {
        id: &config.id,
        duration_in_frames: config.duration_in_frames,
        fps: config.fps.to_fps_f64(),
        width: config.width,
        height: config.height,
        segments: timeline
            .segments()
            .iter()
            .map(|s| Row {
                label: &s.label,
                kind: s.content.kind_name(),
                start: s.range.start,
                duration: s.range.duration,
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }

    println!(
        "{}: {} frames @ {} ({}x{})",
        schedule.id, schedule.duration_in_frames, config.fps, schedule.width, schedule.height
    );
    println!();
    for row in &schedule.segments {
        println!("  {:>5} +{:<4} {:<16} {}", row.start, row.duration, row.kind, row.label);
    }
    Ok(())
}
