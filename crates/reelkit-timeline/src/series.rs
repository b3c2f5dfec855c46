//! Transition series: consecutive scenes that overlap by a transition window.
//!
//! Scene `i + 1` starts `t_i` frames before scene `i` ends, so a pair of
//! scenes spans `d_a + d_b - t` frames and a whole series spans
//! `d_1 + Σ (d_i - t_{i-1})`.

use reelkit_core::{FrameRange, FrameRate, ReelError, Result, Spring, SpringConfig};
use serde::{Deserialize, Serialize};

/// Frames spanned by two scenes joined by a transition of `transition` frames.
#[inline]
pub const fn pair_span(a: i64, b: i64, transition: i64) -> i64 {
    a + b - transition
}

/// How progress advances through a transition window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransitionTiming {
    Linear { duration: i64 },
    Spring { config: SpringConfig, duration: i64 },
}

impl TransitionTiming {
    pub const fn linear(duration: i64) -> Self {
        Self::Linear { duration }
    }

    pub fn duration(&self) -> i64 {
        match *self {
            Self::Linear { duration } | Self::Spring { duration, .. } => duration,
        }
    }

    /// Progress in [0, 1] at a frame local to the transition window.
    pub fn progress(&self, local_frame: i64, fps: FrameRate) -> f64 {
        let duration = self.duration();
        if local_frame <= 0 {
            return 0.0;
        }
        if local_frame >= duration {
            return 1.0;
        }
        match *self {
            Self::Linear { .. } => local_frame as f64 / duration as f64,
            Self::Spring { config, .. } => {
                let spring = Spring {
                    config,
                    from: 0.0,
                    to: 1.0,
                    delay: 0,
                    duration_in_frames: Some(duration),
                };
                spring.evaluate(local_frame as f64, fps).clamp(0.0, 1.0)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SeriesItem {
    Scene { label: String, duration: i64 },
    Transition(TransitionTiming),
}

/// Declarative list of scenes and the transitions between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionSeries {
    items: Vec<SeriesItem>,
}

impl TransitionSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(mut self, label: impl Into<String>, duration: i64) -> Self {
        self.items.push(SeriesItem::Scene {
            label: label.into(),
            duration,
        });
        self
    }

    pub fn transition(mut self, timing: TransitionTiming) -> Self {
        self.items.push(SeriesItem::Transition(timing));
        self
    }

    /// Resolve scene ranges and transition windows, starting at frame 0.
    pub fn layout(&self) -> Result<SeriesLayout> {
        let mut scenes: Vec<(String, FrameRange)> = Vec::new();
        let mut windows: Vec<(FrameRange, TransitionTiming)> = Vec::new();
        let mut pending: Option<TransitionTiming> = None;
        let mut cursor = 0i64;

        for item in &self.items {
            match item {
                SeriesItem::Transition(timing) => {
                    if scenes.is_empty() {
                        return Err(ReelError::Schedule(
                            "a transition series cannot start with a transition".into(),
                        ));
                    }
                    if pending.is_some() {
                        return Err(ReelError::Schedule(
                            "two transitions in a row without a scene between them".into(),
                        ));
                    }
                    if let TransitionTiming::Spring { config, .. } = timing {
                        config.validate()?;
                    }
                    pending = Some(*timing);
                }
                SeriesItem::Scene { label, duration } => {
                    if *duration <= 0 {
                        return Err(ReelError::Schedule(format!(
                            "scene '{label}' has non-positive duration {duration}"
                        )));
                    }
                    let start = match pending.take() {
                        Some(timing) => {
                            let t = timing.duration();
                            let (prev_label, prev) = &scenes[scenes.len() - 1];
                            if t <= 0 || t > prev.duration || t > *duration {
                                return Err(ReelError::Schedule(format!(
                                    "transition of {t} frames between '{prev_label}' ({}) and '{label}' ({duration}) must be positive and no longer than either scene",
                                    prev.duration
                                )));
                            }
                            let start = cursor - t;
                            windows.push((FrameRange::new(start, t), timing));
                            start
                        }
                        None => cursor,
                    };
                    let range = FrameRange::new(start, *duration);
                    cursor = range.end();
                    scenes.push((label.clone(), range));
                }
            }
        }

        if pending.is_some() {
            return Err(ReelError::Schedule(
                "a transition series cannot end with a transition".into(),
            ));
        }

        tracing::debug!(
            scenes = scenes.len(),
            transitions = windows.len(),
            span = cursor,
            "laid out transition series"
        );

        Ok(SeriesLayout {
            scenes,
            windows,
            total: cursor,
        })
    }
}

/// How much of a scene is showing at a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "progress", rename_all = "lowercase")]
pub enum Presence {
    Full,
    /// Coming in through a transition; progress in [0, 1].
    Entering(f64),
    /// Going out through a transition; progress in [0, 1].
    Exiting(f64),
}

/// A scene visible at a frame of the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveScene {
    pub index: usize,
    pub local_frame: i64,
    pub presence: Presence,
}

/// Resolved series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLayout {
    scenes: Vec<(String, FrameRange)>,
    windows: Vec<(FrameRange, TransitionTiming)>,
    total: i64,
}

impl SeriesLayout {
    pub fn total_span(&self) -> i64 {
        self.total
    }

    pub fn scenes(&self) -> impl Iterator<Item = (&str, FrameRange)> + '_ {
        self.scenes.iter().map(|(label, range)| (label.as_str(), *range))
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Window between scene `i` and scene `i + 1`.
    pub fn window(&self, i: usize) -> Option<(FrameRange, TransitionTiming)> {
        self.windows.get(i).copied()
    }

    /// Scenes visible at a series-local frame, in scene order.
    pub fn active_at(&self, frame: i64, fps: FrameRate) -> Vec<ActiveScene> {
        let mut active = Vec::with_capacity(2);
        for (index, (_, range)) in self.scenes.iter().enumerate() {
            let Some(local_frame) = range.local_frame(frame) else {
                continue;
            };

            let entering = index
                .checked_sub(1)
                .and_then(|i| self.windows.get(i))
                .filter(|(window, _)| window.contains(frame));
            let exiting = self
                .windows
                .get(index)
                .filter(|(window, _)| window.contains(frame));

            let presence = match (entering, exiting) {
                (Some((window, timing)), _) => {
                    Presence::Entering(timing.progress(frame - window.start, fps))
                }
                (None, Some((window, timing))) => {
                    Presence::Exiting(timing.progress(frame - window.start, fps))
                }
                (None, None) => Presence::Full,
            };

            active.push(ActiveScene {
                index,
                local_frame,
                presence,
            });
        }
        active
    }
}
