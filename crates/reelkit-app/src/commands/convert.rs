//! Convert a screen capture to constant-frame-rate H.264.

use std::path::PathBuf;

use anyhow::Context;
use reelkit_core::FrameRate;
use reelkit_media::{frames_for_duration, probe_duration, ShutdownGuard, TranscodeCancel, TranscodeJob, Viewport};

pub async fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    fps: u32,
    viewport: Option<String>,
    crf: u32,
    remove_input: bool,
) -> anyhow::Result<()> {
    let fps = FrameRate::fps(fps);
    let mut job = TranscodeJob::new(&input).with_fps(fps).with_crf(crf);
    if let Some(output) = output {
        job = job.with_output(output);
    }
    if let Some(viewport) = viewport {
        job = job.with_viewport(viewport.parse::<Viewport>()?);
    }
    job.validate()?;

    let cancel = TranscodeCancel::new();
    let guard = {
        let cancel = cancel.clone();
        ShutdownGuard::new(move || cancel.cancel())
    };

    println!("Converting {} -> {}", job.input.display(), job.output.display());
    let mut worker = {
        let job = job.clone();
        tokio::task::spawn_blocking(move || job.run(&cancel))
    };

    let result = tokio::select! {
        res = &mut worker => res,
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("Stopping conversion...");
            guard.trigger();
            (&mut worker).await
        }
    };

    if let Err(e) = result.context("Conversion task panicked")? {
        println!("Conversion failed; input kept at {}", job.input.display());
        println!("  Run manually: {}", job.fallback_command());
        return Err(e.into());
    }

    if remove_input {
        std::fs::remove_file(&job.input)
            .with_context(|| format!("Failed to remove {}", job.input.display()))?;
    }

    println!("Saved {}", job.output.display());
    match probe_duration(&job.output) {
        Ok(seconds) => {
            println!("  Duration: {seconds:.2}s");
            println!("  Frames ({fps}): {}", frames_for_duration(seconds, fps));
            println!("  durationSeconds: {}", seconds.ceil() as i64);
        }
        Err(e) => tracing::warn!(error = %e, "could not probe converted video"),
    }
    Ok(())
}
