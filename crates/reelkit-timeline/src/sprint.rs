//! Sprint review configuration.
//!
//! Field names follow the camelCase JSON layout used by existing sprint
//! config files, so those files load without conversion.

use std::path::Path;

use reelkit_core::{Corner, FrameRate, ReelError, Result};
use serde::{Deserialize, Serialize};

/// `false` for NaN as well as for zero and negatives.
fn is_positive(value: f64) -> bool {
    value > 0.0
}

/// Output settings declared alongside a sprint config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConfig {
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub duration_seconds: f64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            width: 1920,
            height: 1080,
            duration_seconds: 120.0,
        }
    }
}

impl VideoConfig {
    pub fn frame_rate(&self) -> FrameRate {
        FrameRate::fps(self.fps)
    }

    /// Seconds to whole frames at this frame rate.
    pub fn seconds(&self, seconds: f64) -> i64 {
        self.frame_rate().frames_from_seconds(seconds)
    }

    pub fn duration_in_frames(&self) -> i64 {
        self.seconds(self.duration_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 || self.width == 0 || self.height == 0 || !is_positive(self.duration_seconds) {
            return Err(ReelError::Config(format!(
                "video config needs positive fps, size and duration, got {}fps {}x{} {}s",
                self.fps, self.width, self.height, self.duration_seconds
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintInfo {
    /// Sprint name, e.g. "Cho Oyu"
    pub name: String,
    pub date_range: String,
    pub product: String,
    pub platform: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewItem {
    pub text: String,
    pub highlight: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub title: String,
    pub items: Vec<OverviewItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatItem {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub stats: Vec<StatItem>,
    /// Image under `images/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSection {
    pub category: String,
    pub items: Vec<String>,
}

/// Demo-specific settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DemoKind {
    #[serde(rename_all = "camelCase")]
    Single {
        video_file: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_from: Option<i64>,
    },
    #[serde(rename_all = "camelCase")]
    Split {
        left_video: String,
        right_video: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        left_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        right_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        left_start_from: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        right_start_from: Option<i64>,
    },
    #[serde(rename_all = "camelCase")]
    Timelapse {
        video_file: String,
        /// Length of the captured recording
        video_duration_seconds: f64,
        /// Normal-speed clip played after the timelapse
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outro_video_file: Option<String>,
        #[serde(default)]
        outro_seconds: f64,
    },
}

/// One demo section of the review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoConfig {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_ref: Option<String>,
    pub duration_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playback_rate: Option<f64>,
    #[serde(flatten)]
    pub kind: DemoKind,
}

impl DemoConfig {
    pub fn playback_rate(&self) -> f64 {
        self.playback_rate.unwrap_or(1.0)
    }

    fn validate(&self) -> Result<()> {
        if !is_positive(self.duration_seconds) {
            return Err(ReelError::Config(format!(
                "demo '{}' needs a positive duration",
                self.label
            )));
        }
        if !is_positive(self.playback_rate()) {
            return Err(ReelError::Config(format!(
                "demo '{}' needs a positive playback rate",
                self.label
            )));
        }
        if let DemoKind::Timelapse {
            video_duration_seconds,
            outro_seconds,
            ..
        } = self.kind
        {
            if outro_seconds < 0.0 || outro_seconds >= self.duration_seconds {
                return Err(ReelError::Config(format!(
                    "timelapse '{}' outro of {outro_seconds}s must be shorter than the section",
                    self.label
                )));
            }
            if video_duration_seconds <= outro_seconds {
                return Err(ReelError::Config(format!(
                    "timelapse '{}' recording is shorter than its outro",
                    self.label
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voiceover_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voiceover_start_frame: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_music_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_music_volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chime_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chime_frame: Option<i64>,
}

/// Default background music volume.
pub const DEFAULT_MUSIC_VOLUME: f64 = 0.15;

impl AudioSettings {
    /// A zero or missing volume falls back to the default.
    pub fn music_volume(&self) -> f64 {
        match self.background_music_volume {
            Some(v) if v > 0.0 => v,
            _ => DEFAULT_MUSIC_VOLUME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl PipSize {
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            PipSize::Sm => (240, 135),
            PipSize::Md => (320, 180),
            PipSize::Lg => (400, 225),
        }
    }
}

fn default_narrator_file() -> String {
    "narrator.mp4".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarratorConfig {
    pub enabled: bool,
    #[serde(default = "default_narrator_file")]
    pub video_file: String,
    #[serde(default)]
    pub position: PipPosition,
    #[serde(default)]
    pub size: PipSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_frame: Option<i64>,
}

fn default_maze_opacity() -> f64 {
    0.18
}

fn default_maze_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeDecorationConfig {
    pub enabled: bool,
    #[serde(default)]
    pub corner: Corner,
    #[serde(default = "default_maze_opacity")]
    pub opacity: f64,
    #[serde(default = "default_maze_scale")]
    pub scale: f64,
    /// Hex color; theme primary when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    /// Hex color; theme dark background when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
}

/// Everything needed to assemble a sprint review video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintConfig {
    pub info: SprintInfo,
    pub overview: Overview,
    #[serde(default)]
    pub demos: Vec<DemoConfig>,
    pub summary: Summary,
    #[serde(default)]
    pub credits: Vec<CreditSection>,
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrator: Option<NarratorConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maze_decoration: Option<MazeDecorationConfig>,
    /// Output settings; defaults to 1080p30, 120 s
    #[serde(default)]
    pub video: VideoConfig,
}

impl SprintConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ReelError::Config(format!("invalid sprint config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReelError::NotFound(format!("{} does not exist", path.display())));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.video.validate()?;
        for demo in &self.demos {
            demo.validate()?;
        }
        if let Some(volume) = self.audio.background_music_volume {
            if !(0.0..=1.0).contains(&volume) {
                return Err(ReelError::Config(format!(
                    "background music volume {volume} is outside [0, 1]"
                )));
            }
        }
        for (name, frame) in [
            ("voiceoverStartFrame", self.audio.voiceover_start_frame),
            ("chimeFrame", self.audio.chime_frame),
            ("narrator.startFrame", self.narrator.as_ref().and_then(|n| n.start_frame)),
        ] {
            if matches!(frame, Some(f) if f < 0) {
                return Err(ReelError::Config(format!("{name} must not be negative")));
            }
        }
        if let Some(maze) = &self.maze_decoration {
            if !(0.0..=1.0).contains(&maze.opacity) || !is_positive(maze.scale) {
                return Err(ReelError::Config(
                    "maze decoration needs opacity within [0, 1] and a positive scale".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "info": {
            "name": "Cho Oyu",
            "dateRange": "24th Nov - 8th Dec",
            "product": "Digital Samba Mobile",
            "platform": "iOS Embedded App Update",
            "version": "4.0.2",
            "build": "233"
        },
        "overview": {
            "title": "What's New in v4.0.2",
            "items": [{ "text": "Feature: ", "highlight": "Dark mode" }]
        },
        "demos": [
            { "type": "single", "videoFile": "dark-mode.mp4", "label": "Dark Mode",
              "jiraRef": "DSM-101", "durationSeconds": 15, "playbackRate": 1.5 },
            { "type": "split", "leftVideo": "phone.mp4", "rightVideo": "web.mp4",
              "label": "Sync", "durationSeconds": 12, "leftStartFrom": 30 },
            { "type": "timelapse", "videoFile": "build.mp4", "label": "Build",
              "durationSeconds": 20, "videoDurationSeconds": 600, "outroSeconds": 5 }
        ],
        "summary": { "stats": [{ "value": 12, "label": "Features" }] },
        "credits": [{ "category": "Made with", "items": ["reelkit"] }],
        "audio": { "voiceoverFile": "voiceover.mp3", "voiceoverStartFrame": 120 },
        "narrator": { "enabled": true, "size": "lg" }
    }"#;

    #[test]
    fn test_parse_sample() {
        let config = SprintConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.info.name, "Cho Oyu");
        assert_eq!(config.demos.len(), 3);
        assert!(matches!(
            &config.demos[0].kind,
            DemoKind::Single { video_file, start_from: None } if video_file == "dark-mode.mp4"
        ));
        assert!(matches!(
            config.demos[1].kind,
            DemoKind::Split { left_start_from: Some(30), right_start_from: None, .. }
        ));
        assert_eq!(config.demos[0].playback_rate(), 1.5);
        assert_eq!(config.demos[1].playback_rate(), 1.0);

        let narrator = config.narrator.unwrap();
        assert_eq!(narrator.video_file, "narrator.mp4");
        assert_eq!(narrator.position, PipPosition::BottomRight);
        assert_eq!(narrator.size.dimensions(), (400, 225));
        assert_eq!(config.video, VideoConfig::default());
    }

    #[test]
    fn test_music_volume_default() {
        let mut audio = AudioSettings::default();
        assert_eq!(audio.music_volume(), DEFAULT_MUSIC_VOLUME);
        audio.background_music_volume = Some(0.0);
        assert_eq!(audio.music_volume(), DEFAULT_MUSIC_VOLUME);
        audio.background_music_volume = Some(0.4);
        assert_eq!(audio.music_volume(), 0.4);
    }

    #[test]
    fn test_video_config_frames() {
        let video = VideoConfig::default();
        assert_eq!(video.seconds(5.0), 150);
        assert_eq!(video.duration_in_frames(), 3600);
    }

    #[test]
    fn test_invalid_demo_rejected() {
        let json = SAMPLE.replace("\"durationSeconds\": 15", "\"durationSeconds\": 0");
        assert!(SprintConfig::from_json(&json).is_err());

        let json = SAMPLE.replace("\"outroSeconds\": 5", "\"outroSeconds\": 25");
        assert!(SprintConfig::from_json(&json).is_err());
    }

    #[test]
    fn test_unknown_demo_type_rejected() {
        let json = SAMPLE.replace("\"type\": \"single\"", "\"type\": \"carousel\"");
        assert!(matches!(SprintConfig::from_json(&json), Err(ReelError::Config(_))));
    }

    #[test]
    fn test_maze_defaults() {
        let maze: MazeDecorationConfig = serde_json::from_str(r#"{ "enabled": true }"#).unwrap();
        assert_eq!(maze.opacity, 0.18);
        assert_eq!(maze.scale, 1.0);
        assert_eq!(maze.corner, Corner::TopRight);
    }
}
