//! Conversion of screen captures into constant-frame-rate H.264.
//!
//! Browser captures arrive as variable-frame-rate WebM. Compositions expect
//! a fixed frame rate, so every capture is re-encoded through the external
//! `ffmpeg` binary before it is dropped into `public/demos/`.

use reelkit_core::{FrameRate, ReelError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::viewport::Viewport;

/// Quality used when none is given.
pub const DEFAULT_CRF: u32 = 20;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

// ── Transcode job ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscodeJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub fps: FrameRate,
    /// Scale to this size; `None` keeps the capture's size.
    pub viewport: Option<Viewport>,
    /// x264 constant rate factor (0-51, lower = better).
    pub crf: u32,
}

impl TranscodeJob {
    /// Convert `input` to an `.mp4` next to it at 30 fps.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output = input.with_extension("mp4");
        Self {
            input,
            output,
            fps: FrameRate::FPS_30,
            viewport: None,
            crf: DEFAULT_CRF,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_fps(mut self, fps: FrameRate) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn with_crf(mut self, crf: u32) -> Self {
        self.crf = crf;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.crf > 51 {
            return Err(ReelError::InvalidParameter(format!(
                "crf must be within 0..=51, got {}",
                self.crf
            )));
        }
        if !self.fps.is_valid() {
            return Err(ReelError::InvalidParameter(format!("invalid frame rate {}", self.fps)));
        }
        if self.input == self.output {
            return Err(ReelError::InvalidParameter(
                "input and output must be different files".into(),
            ));
        }
        Ok(())
    }

    fn rate_arg(&self) -> String {
        if self.fps.denominator == 1 {
            self.fps.numerator.to_string()
        } else {
            format!("{}/{}", self.fps.numerator, self.fps.denominator)
        }
    }

    /// Build the FFmpeg command arguments.
    pub fn ffmpeg_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        args.extend_from_slice(&[
            "-y".into(),
            "-i".into(),
            self.input.to_string_lossy().into_owned(),
        ]);

        args.extend_from_slice(&[
            "-c:v".into(),
            "libx264".into(),
            "-crf".into(),
            self.crf.to_string(),
            "-preset".into(),
            "medium".into(),
            "-r".into(),
            self.rate_arg(),
        ]);

        if let Some(viewport) = self.viewport {
            args.extend_from_slice(&["-vf".into(), viewport.scale_filter()]);
        }

        // Players and compositors need yuv420p and the index up front
        args.extend_from_slice(&[
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-movflags".into(),
            "faststart".into(),
        ]);

        args.push(self.output.to_string_lossy().into_owned());
        args
    }

    /// Shell line a user can run by hand when the conversion fails.
    pub fn fallback_command(&self) -> String {
        let quoted: Vec<String> = self
            .ffmpeg_args()
            .into_iter()
            .map(|a| {
                if a.contains(char::is_whitespace) {
                    format!("\"{a}\"")
                } else {
                    a
                }
            })
            .collect();
        format!("ffmpeg {}", quoted.join(" "))
    }
}

impl TranscodeJob {
    /// Run ffmpeg to completion.
    ///
    /// `cancel` is polled while the encoder runs; a cancelled job kills the
    /// child and removes the partial output.
    pub fn run(&self, cancel: &TranscodeCancel) -> Result<()> {
        self.validate()?;
        if !self.input.exists() {
            return Err(ReelError::NotFound(self.input.display().to_string()));
        }

        let result = self.spawn_and_wait(cancel);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "conversion failed; input retained");
            tracing::warn!(command = %self.fallback_command(), "run manually");
        }
        result
    }

    fn spawn_and_wait(&self, cancel: &TranscodeCancel) -> Result<()> {
        let ffmpeg = which::which("ffmpeg")
            .map_err(|e| ReelError::Process(format!("ffmpeg not found on PATH: {e}")))?;

        tracing::info!(
            input = %self.input.display(),
            output = %self.output.display(),
            fps = %self.fps,
            "starting conversion"
        );
        let started = Instant::now();

        let mut child = Command::new(ffmpeg)
            .args(self.ffmpeg_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ReelError::Process(format!("failed to spawn ffmpeg: {e}")))?;

        let status = loop {
            if cancel.is_cancelled() {
                let _ = child.kill();
                let _ = child.wait();
                remove_partial(&self.output);
                return Err(ReelError::Process("conversion cancelled".into()));
            }
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    return Err(ReelError::Process(format!("failed to wait for ffmpeg: {e}")));
                }
            }
        };

        if !status.success() {
            return Err(ReelError::Process(format!("ffmpeg exited with status: {status}")));
        }

        tracing::info!(
            output = %self.output.display(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "conversion finished"
        );
        Ok(())
    }
}

fn remove_partial(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not remove partial output");
        }
    }
}

/// Handle for cancelling an in-progress conversion.
#[derive(Debug, Clone)]
pub struct TranscodeCancel(Arc<AtomicBool>);

impl TranscodeCancel {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for TranscodeCancel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffmpeg_args() {
        let job = TranscodeJob::new("recordings/login.webm").with_crf(18);
        let args = job.ffmpeg_args();
        assert_eq!(args[0], "-y");
        assert_eq!(args[2], "recordings/login.webm");
        assert!(args.windows(2).any(|w| w == ["-crf", "18"]));
        assert!(args.windows(2).any(|w| w == ["-r", "30"]));
        assert!(args.windows(2).any(|w| w == ["-pix_fmt", "yuv420p"]));
        assert!(!args.contains(&"-vf".to_string()));
        assert_eq!(args.last().unwrap(), "recordings/login.mp4");
    }

    #[test]
    fn test_viewport_and_rational_rate() {
        let job = TranscodeJob::new("a.webm")
            .with_output("out/b.mp4")
            .with_fps(FrameRate::FPS_29_97)
            .with_viewport(Viewport::MOBILE);
        let args = job.ffmpeg_args();
        assert!(args.windows(2).any(|w| w == ["-r", "30000/1001"]));
        assert!(args.windows(2).any(|w| w == ["-vf", "scale=390:844"]));
        assert_eq!(args.last().unwrap(), "out/b.mp4");
    }

    #[test]
    fn test_fallback_command_quotes_spaces() {
        let job = TranscodeJob::new("my capture.webm");
        let cmd = job.fallback_command();
        assert!(cmd.starts_with("ffmpeg -y -i \"my capture.webm\""));
        assert!(cmd.ends_with("\"my capture.mp4\""));
    }

    #[test]
    fn test_validate() {
        assert!(TranscodeJob::new("a.webm").validate().is_ok());
        assert!(TranscodeJob::new("a.webm").with_crf(60).validate().is_err());
        assert!(TranscodeJob::new("a.mp4").validate().is_err());
    }

    #[test]
    fn test_missing_input_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let job = TranscodeJob::new(dir.path().join("gone.webm"));
        let err = job.run(&TranscodeCancel::new()).unwrap_err();
        assert!(matches!(err, ReelError::NotFound(_)));
    }

    #[test]
    fn test_cancel_handle() {
        let cancel = TranscodeCancel::new();
        let shared = cancel.clone();
        assert!(!shared.is_cancelled());
        cancel.cancel();
        assert!(shared.is_cancelled());
    }
}
