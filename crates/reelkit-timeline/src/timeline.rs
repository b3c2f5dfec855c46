//! Layered timeline: segments, audio tracks and render configuration.

use std::collections::HashMap;

use reelkit_core::{FrameRange, FrameRate, ReelError, Result};
use serde::{Deserialize, Serialize};

use crate::audio::AudioTrack;
use crate::schedule::{schedule, SegmentSpec};
use crate::series::SeriesLayout;

/// Output settings for a composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Composition identifier
    pub id: String,
    pub duration_in_frames: i64,
    pub fps: FrameRate,
    pub width: u32,
    pub height: u32,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ReelError::Config("composition id must not be empty".into()));
        }
        if self.duration_in_frames <= 0 {
            return Err(ReelError::Config(format!(
                "composition '{}' has non-positive duration {}",
                self.id, self.duration_in_frames
            )));
        }
        if !self.fps.is_valid() {
            return Err(ReelError::Config(format!(
                "composition '{}' has invalid frame rate {}",
                self.id, self.fps
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::Config(format!(
                "composition '{}' has empty resolution {}x{}",
                self.id, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Composition length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.fps.frame_to_seconds_f64(self.duration_in_frames)
    }
}

/// A time-bounded piece of content on one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<C> {
    pub label: String,
    pub range: FrameRange,
    /// Stacking order; higher layers draw on top.
    pub layer: u32,
    pub content: C,
}

/// A segment visible at a frame, with its local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSegment<'a, C> {
    pub segment: &'a Segment<C>,
    pub local_frame: i64,
}

/// An assembled, immutable timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<C> {
    config: RenderConfig,
    /// Sorted by (layer, start).
    segments: Vec<Segment<C>>,
    audio: Vec<AudioTrack>,
}

impl<C> Timeline<C> {
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn fps(&self) -> FrameRate {
        self.config.fps
    }

    /// Total length in frames.
    pub fn duration(&self) -> i64 {
        self.config.duration_in_frames
    }

    pub fn segments(&self) -> &[Segment<C>] {
        &self.segments
    }

    pub fn audio_tracks(&self) -> &[AudioTrack] {
        &self.audio
    }

    /// Error unless `frame` lies within the composition.
    pub fn check_frame(&self, frame: i64) -> Result<()> {
        if FrameRange::new(0, self.duration()).contains(frame) {
            Ok(())
        } else {
            Err(ReelError::Timeline(format!(
                "frame {frame} is outside composition '{}' [0, {})",
                self.config.id,
                self.duration()
            )))
        }
    }

    /// Segments covering `frame`, bottom layer first, then by start.
    pub fn active_at(&self, frame: i64) -> Vec<ActiveSegment<'_, C>> {
        self.segments
            .iter()
            .filter_map(|segment| {
                segment.range.local_frame(frame).map(|local_frame| ActiveSegment {
                    segment,
                    local_frame,
                })
            })
            .collect()
    }

    /// Audio tracks audible at `frame`.
    pub fn audible_at(&self, frame: i64) -> impl Iterator<Item = &AudioTrack> + '_ {
        let total = self.duration();
        self.audio
            .iter()
            .filter(move |track| track.is_playing(frame, total))
    }

    /// Compare the computed length against a separately declared one.
    pub fn verify_declared(&self, declared: i64) -> Result<()> {
        if declared != self.duration() {
            return Err(ReelError::Timeline(format!(
                "composition '{}' declares {declared} frames but its segments span {}",
                self.config.id,
                self.duration()
            )));
        }
        Ok(())
    }
}

struct PendingSegment<C> {
    segment: Segment<C>,
    /// Frames this segment may overlap its predecessor on the same layer.
    allowed_overlap: i64,
}

enum Extent {
    Fixed(FrameRange),
    Spanning,
}

/// Assembles a [`Timeline`].
pub struct TimelineBuilder<C> {
    pending: Vec<(Extent, PendingSegment<C>)>,
    audio: Vec<AudioTrack>,
}

impl<C> Default for TimelineBuilder<C> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            audio: Vec::new(),
        }
    }
}

impl<C> TimelineBuilder<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place segments one after another on `layer`, starting at `base`.
    pub fn sequence(
        mut self,
        layer: u32,
        base: i64,
        items: impl IntoIterator<Item = (SegmentSpec, C)>,
    ) -> Result<Self> {
        let (specs, contents): (Vec<SegmentSpec>, Vec<C>) = items.into_iter().unzip();
        for (placement, content) in schedule(base, &specs)?.into_iter().zip(contents) {
            self.push(layer, placement.label, placement.range, content, 0);
        }
        Ok(self)
    }

    /// Place one segment at an explicit range.
    pub fn place(mut self, layer: u32, label: impl Into<String>, range: FrameRange, content: C) -> Self {
        self.push(layer, label.into(), range, content, 0);
        self
    }

    /// Place the scenes of a transition series, shifted by `offset`.
    ///
    /// `contents` pairs with the layout's scenes in order.
    pub fn series(
        mut self,
        layer: u32,
        offset: i64,
        layout: &SeriesLayout,
        contents: impl IntoIterator<Item = C>,
    ) -> Result<Self> {
        let contents: Vec<C> = contents.into_iter().collect();
        if contents.len() != layout.scene_count() {
            return Err(ReelError::Timeline(format!(
                "series has {} scenes but {} contents were supplied",
                layout.scene_count(),
                contents.len()
            )));
        }
        for (i, ((label, range), content)) in layout.scenes().zip(contents).enumerate() {
            let overlap = i
                .checked_sub(1)
                .and_then(|prev| layout.window(prev))
                .map_or(0, |(window, _)| window.duration);
            self.push(layer, label.to_string(), range.shifted(offset), content, overlap);
        }
        Ok(self)
    }

    /// A segment covering the whole composition, whatever its final length.
    pub fn spanning(mut self, layer: u32, label: impl Into<String>, content: C) -> Self {
        self.pending.push((
            Extent::Spanning,
            PendingSegment {
                segment: Segment {
                    label: label.into(),
                    range: FrameRange::default(),
                    layer,
                    content,
                },
                allowed_overlap: 0,
            },
        ));
        self
    }

    pub fn audio(mut self, track: AudioTrack) -> Self {
        self.audio.push(track);
        self
    }

    /// End frame of the last fixed segment on `layer`.
    pub fn end_of_layer(&self, layer: u32) -> i64 {
        self.pending
            .iter()
            .filter_map(|(extent, p)| match extent {
                Extent::Fixed(range) if p.segment.layer == layer => Some(range.end()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    fn push(&mut self, layer: u32, label: String, range: FrameRange, content: C, allowed_overlap: i64) {
        self.pending.push((
            Extent::Fixed(range),
            PendingSegment {
                segment: Segment {
                    label,
                    range,
                    layer,
                    content,
                },
                allowed_overlap,
            },
        ));
    }

    /// Validate placement and freeze the timeline.
    ///
    /// The composition lasts until the end of the latest fixed segment.
    pub fn build(self, id: impl Into<String>, fps: FrameRate, width: u32, height: u32) -> Result<Timeline<C>> {
        let id = id.into();
        let mut last_on_layer: HashMap<u32, (String, FrameRange)> = HashMap::new();
        let mut total = 0i64;

        for (extent, pending) in &self.pending {
            let Extent::Fixed(range) = extent else {
                continue;
            };
            let seg = &pending.segment;
            if range.start < 0 || range.duration <= 0 {
                return Err(ReelError::Timeline(format!(
                    "segment '{}' has invalid range {range}",
                    seg.label
                )));
            }
            if let Some((prev_label, prev)) = last_on_layer.get(&seg.layer) {
                if range.start < prev.start {
                    return Err(ReelError::Timeline(format!(
                        "segment '{}' starts before '{prev_label}' on layer {}",
                        seg.label, seg.layer
                    )));
                }
                let overlap = prev.end() - range.start;
                if overlap > pending.allowed_overlap {
                    return Err(ReelError::Timeline(format!(
                        "segment '{}' overlaps '{prev_label}' by {overlap} frames on layer {}",
                        seg.label, seg.layer
                    )));
                }
            }
            last_on_layer.insert(seg.layer, (seg.label.clone(), *range));
            total = total.max(range.end());
        }

        let config = RenderConfig {
            id,
            duration_in_frames: total,
            fps,
            width,
            height,
        };
        config.validate()?;

        for track in &self.audio {
            track.validate()?;
        }
        let mut audio = self.audio;
        audio.retain(|track| {
            let plays = track.start_frame < total;
            if !plays {
                tracing::warn!(
                    file = %track.file,
                    start = track.start_frame,
                    duration = total,
                    "audio track starts after the composition ends, dropped"
                );
            }
            plays
        });

        let mut segments: Vec<Segment<C>> = self
            .pending
            .into_iter()
            .map(|(extent, pending)| {
                let mut segment = pending.segment;
                segment.range = match extent {
                    Extent::Fixed(range) => range,
                    Extent::Spanning => FrameRange::new(0, total),
                };
                segment
            })
            .collect();
        segments.sort_by_key(|s| (s.layer, s.range.start));

        tracing::debug!(
            id = %config.id,
            segments = segments.len(),
            audio = audio.len(),
            duration = total,
            "built timeline"
        );

        Ok(Timeline {
            config,
            segments,
            audio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{TransitionSeries, TransitionTiming};

    const FPS: FrameRate = FrameRate::FPS_30;

    fn labels<C>(active: &[ActiveSegment<'_, C>]) -> Vec<String> {
        active.iter().map(|a| a.segment.label.clone()).collect()
    }

    #[test]
    fn test_sequence_and_spanning_background() {
        let timeline = TimelineBuilder::new()
            .spanning(0, "background", ())
            .sequence(
                1,
                0,
                vec![
                    (SegmentSpec::new("title", 150), ()),
                    (SegmentSpec::new("overview", 450), ()),
                ],
            )
            .unwrap()
            .build("Demo", FPS, 1920, 1080)
            .unwrap();

        assert_eq!(timeline.duration(), 600);
        assert_eq!(timeline.segments()[0].range, FrameRange::new(0, 600));

        let active = timeline.active_at(200);
        assert_eq!(labels(&active), vec!["background", "overview"]);
        assert_eq!(active[1].local_frame, 50);
    }

    #[test]
    fn test_series_overlap_is_allowed() {
        let layout = TransitionSeries::new()
            .scene("a", 45)
            .transition(TransitionTiming::linear(25))
            .scene("b", 45)
            .layout()
            .unwrap();
        let timeline = TimelineBuilder::new()
            .place(0, "intro", FrameRange::new(0, 60), "intro")
            .series(0, 60, &layout, ["a", "b"])
            .unwrap()
            .build("Gallery", FPS, 1920, 1080)
            .unwrap();

        assert_eq!(timeline.duration(), 125);
        assert_eq!(labels(&timeline.active_at(90)), vec!["a", "b"]);
    }

    #[test]
    fn test_overlap_without_transition_rejected() {
        let result = TimelineBuilder::new()
            .place(0, "a", FrameRange::new(0, 50), ())
            .place(0, "b", FrameRange::new(40, 50), ())
            .build("Bad", FPS, 1920, 1080);
        assert!(result.is_err());
    }

    #[test]
    fn test_decreasing_start_rejected() {
        let result = TimelineBuilder::new()
            .place(0, "a", FrameRange::new(100, 10), ())
            .place(0, "b", FrameRange::new(0, 10), ())
            .build("Bad", FPS, 1920, 1080);
        assert!(result.is_err());
    }

    #[test]
    fn test_layers_may_overlap() {
        let timeline = TimelineBuilder::new()
            .place(0, "a", FrameRange::new(0, 50), ())
            .place(1, "b", FrameRange::new(10, 50), ())
            .build("Layers", FPS, 1920, 1080)
            .unwrap();
        assert_eq!(timeline.duration(), 60);
    }

    #[test]
    fn test_verify_declared() {
        let timeline = TimelineBuilder::new()
            .place(0, "a", FrameRange::new(0, 710), ())
            .build("Gallery", FPS, 1920, 1080)
            .unwrap();
        assert!(timeline.verify_declared(710).is_ok());
        assert!(timeline.verify_declared(700).is_err());
    }

    #[test]
    fn test_check_frame_bounds() {
        let timeline = TimelineBuilder::new()
            .place(0, "a", FrameRange::new(0, 10), ())
            .build("Short", FPS, 640, 360)
            .unwrap();
        assert!(timeline.check_frame(0).is_ok());
        assert!(timeline.check_frame(10).is_err());
        assert!(timeline.check_frame(-1).is_err());
    }

    #[test]
    fn test_audio_tracks() {
        let timeline = TimelineBuilder::new()
            .place(0, "a", FrameRange::new(0, 300), ())
            .audio(AudioTrack::new("audio/music.mp3").with_volume(0.15))
            .audio(AudioTrack::new("audio/chime.mp3").starting_at(100).with_volume(0.5))
            .build("Audio", FPS, 1920, 1080)
            .unwrap();
        assert_eq!(timeline.audible_at(50).count(), 1);
        assert_eq!(timeline.audible_at(150).count(), 2);
    }

    #[test]
    fn test_audio_past_the_end_is_dropped() {
        let timeline = TimelineBuilder::new()
            .place(0, "a", FrameRange::new(0, 300), ())
            .audio(AudioTrack::new("audio/music.mp3"))
            .audio(AudioTrack::new("audio/chime.mp3").starting_at(300))
            .build("Audio", FPS, 1920, 1080)
            .unwrap();
        assert_eq!(timeline.audio_tracks().len(), 1);
        assert_eq!(timeline.audio_tracks()[0].file, "audio/music.mp3");
    }

    #[test]
    fn test_empty_timeline_rejected() {
        let result = TimelineBuilder::<()>::new().build("Empty", FPS, 1920, 1080);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_config_validation() {
        let config = RenderConfig {
            id: "X".into(),
            duration_in_frames: 30,
            fps: FPS,
            width: 0,
            height: 1080,
        };
        assert!(config.validate().is_err());
    }
}
