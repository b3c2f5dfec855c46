//! Pre-recorded demo sections: single video, side-by-side split, and
//! timelapse with a normal-speed outro.
//!
//! A video missing from the asset manifest renders as a placeholder that
//! names the expected path, so a review can be laid out before every
//! capture exists.

use reelkit_core::{Color, Curve, FrameRate, Result};
use reelkit_timeline::{AssetKind, DemoConfig, DemoKind};

use crate::render::{Render, RenderContext};
use crate::visual::{Content, Layer, Rect, TextRole};

pub const PLACEHOLDER_MESSAGE: &str = "Video placeholder";

const DIVIDER_WIDTH: f32 = 4.0;
const TIMER_AMBER: Color = Color::new(0.909, 0.772, 0.0, 1.0);
/// Timer fade length in frames.
const TIMER_FADE: f64 = 30.0;

/// One video file played from an offset at a fixed rate.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoPanel {
    pub file: String,
    pub start_from: i64,
    pub playback_rate: f64,
}

impl VideoPanel {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            start_from: 0,
            playback_rate: 1.0,
        }
    }

    pub fn starting_from(mut self, frame: i64) -> Self {
        self.start_from = frame;
        self
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.playback_rate = rate;
        self
    }

    /// Source-file frame shown at `local_frame`.
    pub fn source_frame(&self, local_frame: i64) -> f64 {
        self.start_from as f64 + local_frame as f64 * self.playback_rate
    }

    pub fn path(&self) -> String {
        AssetKind::Demo.path(&self.file)
    }

    fn layer(&self, label: &str, local_frame: i64, ctx: &RenderContext<'_>) -> Layer {
        let path = self.path();
        if ctx.assets.exists(&path) {
            Layer::new(
                label,
                Content::Video {
                    path,
                    source_frame: self.source_frame(local_frame),
                    playback_rate: self.playback_rate,
                    muted: false,
                },
            )
        } else {
            Layer::new(
                label,
                Content::Placeholder {
                    expected_path: path,
                    message: PLACEHOLDER_MESSAGE.into(),
                },
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitScreen {
    pub left: VideoPanel,
    pub right: VideoPanel,
    pub left_label: String,
    pub right_label: String,
}

impl SplitScreen {
    fn layer(&self, local_frame: i64, ctx: &RenderContext<'_>) -> Layer {
        let colors = &ctx.theme.colors;
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let panel_width = (w - DIVIDER_WIDTH) / 2.0;

        let panel = |side: &str, video: &VideoPanel, title: &str, x: f32| {
            Layer::group(
                format!("{side}-panel"),
                vec![
                    video.layer(&format!("{side}-video"), local_frame, ctx),
                    panel_label(&format!("{side}-label"), title, colors.text_dark, colors.bg_overlay)
                        .translated(24.0, 24.0),
                ],
            )
            .with_bounds(Rect::new(x, 0.0, panel_width, h))
        };

        Layer::group(
            "split",
            vec![
                panel("left", &self.left, &self.left_label, 0.0),
                Layer::new("divider", Content::Solid { color: colors.divider })
                    .with_bounds(Rect::new(panel_width, 0.0, DIVIDER_WIDTH, h)),
                panel("right", &self.right, &self.right_label, panel_width + DIVIDER_WIDTH),
            ],
        )
    }
}

/// A long capture compressed into the section, optionally followed by a
/// normal-speed outro clip.
#[derive(Debug, Clone, PartialEq)]
pub struct Timelapse {
    pub video_file: String,
    pub video_duration_seconds: f64,
    pub outro_video_file: Option<String>,
    pub outro_seconds: f64,
    /// Whole section length in frames
    pub duration: i64,
    pub fps: FrameRate,
}

impl Timelapse {
    fn outro_frames(&self) -> i64 {
        self.fps.frames_from_seconds(self.outro_seconds)
    }

    /// Frames spent in the sped-up part.
    pub fn timelapse_frames(&self) -> i64 {
        self.duration - self.outro_frames()
    }

    fn timelapse_video_seconds(&self) -> f64 {
        self.video_duration_seconds - self.outro_seconds
    }

    pub fn playback_rate(&self) -> f64 {
        let sped_up_seconds = self.timelapse_frames() as f64 / self.fps.to_fps_f64();
        self.timelapse_video_seconds() / sped_up_seconds
    }

    /// Recording time shown by the timer at `local_frame`.
    pub fn elapsed_seconds(&self, local_frame: i64) -> f64 {
        let tl_frames = self.timelapse_frames();
        if local_frame < tl_frames {
            local_frame as f64 / tl_frames as f64 * self.timelapse_video_seconds()
        } else {
            let outro_frame = local_frame - tl_frames;
            self.timelapse_video_seconds() + outro_frame as f64 / self.fps.to_fps_f64()
        }
    }

    /// `MM:SS` of the elapsed recording time.
    pub fn timer_text(&self, local_frame: i64) -> String {
        let elapsed = self.elapsed_seconds(local_frame).max(0.0);
        let minutes = (elapsed / 60.0).floor() as i64;
        let seconds = (elapsed % 60.0).floor() as i64;
        format!("{minutes:02}:{seconds:02}")
    }

    /// Fades in over the first second and out over the last; a section
    /// shorter than both fades takes the smaller of the two.
    fn timer_opacity(&self, local_frame: i64) -> Result<f64> {
        let (d, x) = (self.duration as f64, local_frame as f64);
        let fade_in = Curve::clamped(&[0.0, TIMER_FADE], &[0.0, 1.0])?;
        let fade_out = Curve::clamped(&[d - TIMER_FADE, d], &[1.0, 0.0])?;
        Ok(fade_in.evaluate(x).min(fade_out.evaluate(x)))
    }

    fn layer(&self, local_frame: i64, ctx: &RenderContext<'_>) -> Result<Layer> {
        let tl_frames = self.timelapse_frames();
        let in_timelapse = local_frame < tl_frames;
        let rate = self.playback_rate();

        let video = if in_timelapse {
            VideoPanel::new(&self.video_file)
                .with_rate(rate)
                .layer("timelapse-video", local_frame, ctx)
        } else {
            match &self.outro_video_file {
                Some(outro) => VideoPanel::new(outro).layer("outro-video", local_frame - tl_frames, ctx),
                None => Layer::empty("outro-video"),
            }
        };

        let timer_opacity = self.timer_opacity(local_frame)?;
        let speed = Layer::group(
            "speed",
            vec![
                Layer::text("speed-value", format!("{rate:.1}x"), TextRole::Label, TIMER_AMBER),
                Layer::text("speed-caption", "speed", TextRole::Caption, Color::WHITE),
            ],
        )
        .translated(48.0, 40.0)
        .with_opacity(if in_timelapse { timer_opacity } else { 0.0 });

        let timer = Layer::group(
            "timer",
            vec![
                Layer::new("timer-panel", Content::Solid { color: Color::BLACK }),
                Layer::text("timer-time", self.timer_text(local_frame), TextRole::Stat, TIMER_AMBER),
                Layer::text(
                    "timer-caption",
                    "ELAPSED",
                    TextRole::Caption,
                    Color::from_rgba8(0x66, 0x55, 0x00, 255),
                ),
            ],
        )
        .translated(ctx.width as f64 - 40.0, 40.0)
        .with_opacity(timer_opacity);

        let mut children = vec![timer, speed];
        if !video.is_empty() {
            children.insert(0, video);
        }
        Ok(Layer::group("timelapse", children))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DemoBody {
    Single(VideoPanel),
    Split(SplitScreen),
    Timelapse(Timelapse),
}

/// A labelled demo section.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoScene {
    pub label: String,
    pub jira_ref: Option<String>,
    pub body: DemoBody,
}

impl DemoScene {
    pub fn from_config(config: &DemoConfig, fps: FrameRate) -> Self {
        let rate = config.playback_rate();
        let body = match &config.kind {
            DemoKind::Single { video_file, start_from } => DemoBody::Single(
                VideoPanel::new(video_file)
                    .starting_from(start_from.unwrap_or(0))
                    .with_rate(rate),
            ),
            DemoKind::Split {
                left_video,
                right_video,
                left_label,
                right_label,
                left_start_from,
                right_start_from,
            } => DemoBody::Split(SplitScreen {
                left: VideoPanel::new(left_video)
                    .starting_from(left_start_from.unwrap_or(0))
                    .with_rate(rate),
                right: VideoPanel::new(right_video)
                    .starting_from(right_start_from.unwrap_or(0))
                    .with_rate(rate),
                left_label: left_label.clone().unwrap_or_else(|| "Left".into()),
                right_label: right_label.clone().unwrap_or_else(|| "Right".into()),
            }),
            DemoKind::Timelapse {
                video_file,
                video_duration_seconds,
                outro_video_file,
                outro_seconds,
            } => DemoBody::Timelapse(Timelapse {
                video_file: video_file.clone(),
                video_duration_seconds: *video_duration_seconds,
                outro_video_file: outro_video_file.clone(),
                outro_seconds: *outro_seconds,
                duration: fps.frames_from_seconds(config.duration_seconds),
                fps,
            }),
        };
        Self {
            label: config.label.clone(),
            jira_ref: config.jira_ref.clone(),
            body,
        }
    }

    /// Every demo asset path this scene reads.
    pub fn asset_paths(&self) -> Vec<String> {
        match &self.body {
            DemoBody::Single(panel) => vec![panel.path()],
            DemoBody::Split(split) => vec![split.left.path(), split.right.path()],
            DemoBody::Timelapse(tl) => std::iter::once(&tl.video_file)
                .chain(&tl.outro_video_file)
                .map(|file| AssetKind::Demo.path(file))
                .collect(),
        }
    }
}

impl Render for DemoScene {
    fn render(&self, local_frame: i64, ctx: &RenderContext<'_>) -> Result<Layer> {
        let body = match &self.body {
            DemoBody::Single(panel) => panel.layer("video", local_frame, ctx),
            DemoBody::Split(split) => split.layer(local_frame, ctx),
            DemoBody::Timelapse(tl) => tl.layer(local_frame, ctx)?,
        };
        let caption = caption_label(&self.label, self.jira_ref.as_deref(), ctx)
            .translated(48.0, ctx.height as f64 - 48.0);
        Ok(Layer::group("demo", vec![body, caption]))
    }
}

fn panel_label(label: &str, text: &str, color: Color, background: Color) -> Layer {
    Layer::group(
        label,
        vec![
            Layer::new("pill", Content::Solid { color: background }),
            Layer::text("pill-text", text, TextRole::Label, color),
        ],
    )
}

/// Bottom-left caption with an optional ticket reference.
fn caption_label(text: &str, jira_ref: Option<&str>, ctx: &RenderContext<'_>) -> Layer {
    let colors = &ctx.theme.colors;
    let mut label = panel_label("caption", text, colors.text_dark, colors.bg_overlay);
    if let (Some(reference), Content::Group { children }) = (jira_ref, &mut label.content) {
        children.push(Layer::text("jira-ref", reference, TextRole::Caption, colors.primary));
    }
    label
}
