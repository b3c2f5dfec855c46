//! Integration tests for conversion plumbing.
//!
//! Exercises reelkit-media jobs and shutdown handling without invoking
//! the external encoder.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reelkit_core::{FrameRate, ReelError};
use reelkit_media::{frames_for_duration, parse_duration, ShutdownGuard, TranscodeCancel, TranscodeJob, Viewport};

#[test]
fn shutdown_cancels_conversion_once() {
    let cancel = TranscodeCancel::new();
    let runs = Arc::new(AtomicUsize::new(0));
    let guard = {
        let cancel = cancel.clone();
        let runs = Arc::clone(&runs);
        ShutdownGuard::new(move || {
            runs.fetch_add(1, Ordering::SeqCst);
            cancel.cancel();
        })
    };

    assert!(!cancel.is_cancelled());
    assert!(guard.trigger());
    assert!(!guard.trigger());
    assert!(cancel.is_cancelled());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn job_from_cli_style_options() {
    let viewport: Viewport = "tablet".parse().unwrap();
    let job = TranscodeJob::new("recordings/checkout.webm")
        .with_output("public/demos/checkout.mp4")
        .with_viewport(viewport)
        .with_crf(23);
    job.validate().unwrap();

    let args = job.ffmpeg_args();
    assert!(args.windows(2).any(|w| w == ["-vf", "scale=1024:768"]));
    assert!(args.windows(2).any(|w| w == ["-movflags", "faststart"]));
    assert_eq!(args.last().unwrap(), "public/demos/checkout.mp4");
    assert!(job.fallback_command().contains("-crf 23"));
}

#[test]
fn missing_capture_fails_before_spawning() {
    let dir = tempfile::tempdir().unwrap();
    let job = TranscodeJob::new(dir.path().join("never-recorded.webm"));
    assert!(matches!(job.run(&TranscodeCancel::new()), Err(ReelError::NotFound(_))));
}

#[test]
fn probed_duration_to_frames() {
    let seconds = parse_duration("20.033333\n").unwrap();
    assert_eq!(frames_for_duration(seconds, FrameRate::FPS_30), 601);
}
