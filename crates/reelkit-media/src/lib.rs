//! Reelkit Media - Recording conversion and probing
//!
//! Wraps the external FFmpeg tools:
//! - Transcoding raw screen captures to constant-frame-rate H.264
//! - Duration probing via ffprobe
//! - Capture viewport presets
//! - One-shot shutdown handling for interrupted conversions

pub mod probe;
pub mod shutdown;
pub mod transcode;
pub mod viewport;

pub use probe::{frames_for_duration, parse_duration, probe_duration};
pub use shutdown::ShutdownGuard;
pub use transcode::{TranscodeCancel, TranscodeJob, DEFAULT_CRF};
pub use viewport::Viewport;
