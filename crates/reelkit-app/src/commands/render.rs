//! Describe frames of the sprint review as JSON lines.

use std::io::Write;
use std::path::PathBuf;

use reelkit_scenes::render_range;

use super::load_sprint;

pub fn run(config: PathBuf, public: PathBuf, theme: String, from: i64, to: Option<i64>) -> anyhow::Result<()> {
    let sprint = load_sprint(&config, &public, &theme)?;
    let to = to.unwrap_or_else(|| sprint.timeline.duration());

    let frames = render_range(&sprint.timeline, from, to, &sprint.theme, &sprint.assets)?;
    tracing::info!(frames = frames.len(), "rendered frame descriptions");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for frame in &frames {
        serde_json::to_writer(&mut out, frame)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
