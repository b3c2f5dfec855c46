//! Reelkit Timeline - Timeline composition model
//!
//! Implements the structure a video is assembled from:
//! - Cumulative segment scheduling
//! - Transition series with overlapping scenes
//! - Layered timelines with audio tracks and render configuration
//! - Asset manifests for placeholder fallback
//! - Project state and sprint configuration files

pub mod assets;
pub mod audio;
pub mod project;
pub mod schedule;
pub mod serialization;
pub mod series;
pub mod sprint;
pub mod timeline;

pub use assets::{AssetKind, AssetLookup, Resolved, StaticManifest};
pub use audio::AudioTrack;
pub use project::{
    AssetStatus, AudioStatus, Phase, ProjectHealth, ProjectScanResult, Scene, SceneType,
    SceneVisual, SessionEntry, VideoProject, VisualType,
};
pub use schedule::{end_of, schedule, Placement, SegmentSpec};
pub use serialization::ProjectFile;
pub use series::{pair_span, ActiveScene, Presence, SeriesLayout, TransitionSeries, TransitionTiming};
pub use sprint::{
    AudioSettings, CreditSection, DemoConfig, DemoKind, MazeDecorationConfig, NarratorConfig,
    Overview, OverviewItem, PipPosition, PipSize, SprintConfig, SprintInfo, StatItem, Summary,
    VideoConfig, DEFAULT_MUSIC_VOLUME,
};
pub use timeline::{ActiveSegment, RenderConfig, Segment, Timeline, TimelineBuilder};
