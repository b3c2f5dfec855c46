//! Cumulative segment placement.

use reelkit_core::{FrameRange, ReelError, Result};
use serde::{Deserialize, Serialize};

/// A segment waiting to be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub label: String,
    pub duration: i64,
    /// Explicit start frame; `None` follows the previous segment.
    pub start: Option<i64>,
}

impl SegmentSpec {
    pub fn new(label: impl Into<String>, duration: i64) -> Self {
        Self {
            label: label.into(),
            duration,
            start: None,
        }
    }

    pub fn at(label: impl Into<String>, start: i64, duration: i64) -> Self {
        Self {
            label: label.into(),
            duration,
            start: Some(start),
        }
    }
}

/// A placed segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub label: String,
    pub range: FrameRange,
}

/// Assign absolute start frames in declaration order.
///
/// The running position starts at `base`. An explicit start wins; otherwise a
/// segment begins where the previous one ended.
pub fn schedule(base: i64, specs: &[SegmentSpec]) -> Result<Vec<Placement>> {
    if base < 0 {
        return Err(ReelError::Schedule(format!(
            "base offset must be non-negative, got {base}"
        )));
    }

    let mut cursor = base;
    let mut placements = Vec::with_capacity(specs.len());

    for spec in specs {
        if spec.duration <= 0 {
            return Err(ReelError::Schedule(format!(
                "segment '{}' has non-positive duration {}",
                spec.label, spec.duration
            )));
        }
        let start = match spec.start {
            Some(start) if start < 0 => {
                return Err(ReelError::Schedule(format!(
                    "segment '{}' has negative start {}",
                    spec.label, start
                )));
            }
            Some(start) => start,
            None => cursor,
        };
        let range = FrameRange::new(start, spec.duration);
        tracing::debug!(label = %spec.label, %range, "scheduled segment");
        cursor = range.end();
        placements.push(Placement {
            label: spec.label.clone(),
            range,
        });
    }

    Ok(placements)
}

/// End frame of the last placement (or `base` when empty).
pub fn end_of(base: i64, placements: &[Placement]) -> i64 {
    placements
        .iter()
        .map(|p| p.range.end())
        .max()
        .unwrap_or(base)
}
