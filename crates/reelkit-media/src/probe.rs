//! Media duration probing via ffprobe.

use reelkit_core::{FrameRate, ReelError, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Duration of a media file in seconds, as reported by ffprobe.
pub fn probe_duration<P: AsRef<Path>>(path: P) -> Result<f64> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReelError::NotFound(path.display().to_string()));
    }

    let ffprobe = which::which("ffprobe")
        .map_err(|e| ReelError::Process(format!("ffprobe not found on PATH: {e}")))?;
    let output = Command::new(ffprobe)
        .args(["-v", "error", "-show_entries", "format=duration", "-of", "csv=p=0"])
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ReelError::Process(format!("failed to run ffprobe: {e}")))?;

    if !output.status.success() {
        return Err(ReelError::Process(format!(
            "ffprobe exited with status {} for {}",
            output.status,
            path.display()
        )));
    }

    let duration = parse_duration(&String::from_utf8_lossy(&output.stdout))?;
    tracing::debug!(path = %path.display(), duration, "probed media duration");
    Ok(duration)
}

/// Parse the `format=duration` value; accepts both the bare csv form and
/// the default `[FORMAT]` section form.
pub fn parse_duration(output: &str) -> Result<f64> {
    let value = output
        .lines()
        .map(str::trim)
        .find_map(|line| match line.strip_prefix("duration=") {
            Some(v) => Some(v),
            None if !line.is_empty() && !line.starts_with('[') => Some(line),
            None => None,
        })
        .ok_or_else(|| ReelError::Process("ffprobe reported no duration".into()))?;

    let duration: f64 = value
        .parse()
        .map_err(|_| ReelError::Process(format!("unparseable duration '{value}'")))?;
    if !duration.is_finite() || duration < 0.0 {
        return Err(ReelError::Process(format!("invalid duration {duration}")));
    }
    Ok(duration)
}

/// Whole frames needed to show `seconds` of footage, rounded up.
pub fn frames_for_duration(seconds: f64, fps: FrameRate) -> i64 {
    (seconds * fps.to_fps_f64()).ceil() as i64
}
