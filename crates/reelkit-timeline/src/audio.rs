//! Audio tracks placed on the composition clock.

use reelkit_core::{FrameRange, ReelError, Result};
use serde::{Deserialize, Serialize};

/// An audio file played from `start_frame` at a fixed volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTrack {
    /// Path relative to the public asset root.
    pub file: String,
    pub start_frame: i64,
    pub volume: f64,
    /// Play length in frames; `None` plays to the end of the composition.
    pub duration: Option<i64>,
}

impl AudioTrack {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            start_frame: 0,
            volume: 1.0,
            duration: None,
        }
    }

    pub fn starting_at(mut self, frame: i64) -> Self {
        self.start_frame = frame;
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_duration(mut self, frames: i64) -> Self {
        self.duration = Some(frames);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_frame < 0 {
            return Err(ReelError::Timeline(format!(
                "audio track '{}' starts before frame 0",
                self.file
            )));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ReelError::Timeline(format!(
                "audio track '{}' volume {} is outside [0, 1]",
                self.file, self.volume
            )));
        }
        if matches!(self.duration, Some(d) if d <= 0) {
            return Err(ReelError::Timeline(format!(
                "audio track '{}' has non-positive duration",
                self.file
            )));
        }
        Ok(())
    }

    /// Frames the track plays within a composition of `total` frames.
    pub fn range(&self, total: i64) -> FrameRange {
        let end = match self.duration {
            Some(d) => (self.start_frame + d).min(total),
            None => total,
        };
        FrameRange::from_start_end(self.start_frame, end.max(self.start_frame))
    }

    /// Whether the track is audible at a composition frame.
    pub fn is_playing(&self, frame: i64, total: i64) -> bool {
        self.range(total).contains(frame)
    }
}
