//! Ready-made compositions.

use reelkit_core::{FrameRange, FrameRate, Result};
use reelkit_timeline::{
    AssetKind, AssetLookup, AudioTrack, Resolved, SegmentSpec, SprintConfig, Timeline, TimelineBuilder,
};

use crate::envelope::{EnvelopeStyle, SlideEnvelope};
use crate::presentation;
use crate::scenes::{
    AnimatedBackground, DemoScene, EndCredits, GalleryIntro, MazeDecoration, NarratorPip, OverviewSlide, Scene,
    SummarySlide, TitleSlide, TransitionDemo,
};
use crate::theme::Theme;

pub const GALLERY_ID: &str = "TransitionGallery";
pub const GALLERY_INTRO_FRAMES: i64 = 60;
/// Exported length of the gallery composition.
pub const GALLERY_DURATION: i64 = 710;

pub const SPRINT_REVIEW_ID: &str = "SprintReview";
pub const CHIME_VOLUME: f64 = 0.5;

const BACKGROUND_LAYER: u32 = 0;
const SLIDE_LAYER: u32 = 1;
const DECORATION_LAYER: u32 = 2;
const OVERLAY_LAYER: u32 = 3;

/// Intro card followed by one demo per built-in presentation.
pub fn transition_gallery() -> Result<Timeline<Scene>> {
    let mut items = vec![(
        SegmentSpec::new("intro", GALLERY_INTRO_FRAMES),
        Scene::GalleryIntro(GalleryIntro),
    )];
    for p in presentation::builtin().iter() {
        let demo = TransitionDemo::for_presentation(p)?;
        items.push((SegmentSpec::new(p.name(), demo.duration()), Scene::TransitionDemo(demo)));
    }

    let timeline = TimelineBuilder::new()
        .sequence(SLIDE_LAYER, 0, items)?
        .build(GALLERY_ID, FrameRate::FPS_30, 1920, 1080)?;
    timeline.verify_declared(GALLERY_DURATION)?;
    Ok(timeline)
}

/// Assemble the sprint review: background, slides and demos in sequence,
/// optional decoration and narrator overlays, and whichever audio files
/// exist.
///
/// The computed length is not forced to match `config.video`; compare it
/// with [`Timeline::verify_declared`].
pub fn sprint_review(config: &SprintConfig, theme: &Theme, assets: &dyn AssetLookup) -> Result<Timeline<Scene>> {
    config.validate()?;
    let video = &config.video;
    let fps = video.frame_rate();
    let slide = |secs: f64, style: EnvelopeStyle| -> Result<(i64, SlideEnvelope)> {
        let frames = video.seconds(secs);
        let envelope = SlideEnvelope::new(frames, style);
        envelope.validate()?;
        Ok((frames, envelope))
    };

    let mut items = Vec::with_capacity(config.demos.len() + 4);

    let (title_frames, envelope) = slide(5.0, EnvelopeStyle::Zoom)?;
    items.push((
        SegmentSpec::new("title", title_frames),
        Scene::Title(TitleSlide::new(config.info.clone())).enveloped(envelope),
    ));

    let (overview_frames, envelope) = slide(15.0, EnvelopeStyle::Zoom)?;
    items.push((
        SegmentSpec::new("overview", overview_frames),
        Scene::Overview(OverviewSlide::new(config.overview.clone())).enveloped(envelope),
    ));

    for demo in &config.demos {
        let (frames, envelope) = slide(demo.duration_seconds, EnvelopeStyle::BlurFade)?;
        let scene = DemoScene::from_config(demo, fps);
        for path in scene.asset_paths() {
            // Logs once per missing capture; the scene falls back to a placeholder.
            Resolved::resolve(assets, AssetKind::Demo, &path);
        }
        items.push((
            SegmentSpec::new(demo.label.clone(), frames),
            Scene::Demo(scene).enveloped(envelope),
        ));
    }

    let (summary_frames, envelope) = slide(15.0, EnvelopeStyle::Zoom)?;
    items.push((
        SegmentSpec::new("summary", summary_frames),
        Scene::Summary(SummarySlide::new(config.summary.clone())).enveloped(envelope.with_transition(20)),
    ));

    items.push((
        SegmentSpec::new("credits", video.seconds(30.0)),
        Scene::Credits(EndCredits::new(config.credits.clone(), &config.info.product)),
    ));

    let mut builder = TimelineBuilder::new()
        .spanning(BACKGROUND_LAYER, "background", Scene::Background(AnimatedBackground::default()))
        .sequence(SLIDE_LAYER, 0, items)?;
    let total = builder.end_of_layer(SLIDE_LAYER);

    if let Some(maze) = config.maze_decoration.as_ref().filter(|m| m.enabled) {
        let maze = MazeDecoration::from_config(maze, theme.colors.primary, theme.colors.bg_dark)?;
        builder = builder.spanning(DECORATION_LAYER, "maze", Scene::Maze(maze));
    }

    let audio = &config.audio;
    let voiceover_start = audio.voiceover_start_frame.unwrap_or(0);

    if let Some(narrator) = config.narrator.as_ref().filter(|n| n.enabled) {
        let start = narrator
            .start_frame
            .filter(|&f| f > 0)
            .unwrap_or(voiceover_start);
        if !assets.exists(&narrator.video_file) {
            tracing::warn!(path = %narrator.video_file, "narrator video missing, overlay disabled");
        }
        if start < total {
            builder = builder.place(
                OVERLAY_LAYER,
                "narrator",
                FrameRange::from_start_end(start, total),
                Scene::Narrator(NarratorPip::from_config(narrator, total)),
            );
        }
    }

    if let Some(file) = &audio.voiceover_file {
        if let Resolved::Present(path) = Resolved::resolve(assets, AssetKind::Audio, file) {
            builder = builder.audio(AudioTrack::new(path).starting_at(voiceover_start));
        }
    }
    if let Some(file) = &audio.background_music_file {
        if let Resolved::Present(path) = Resolved::resolve(assets, AssetKind::Audio, file) {
            builder = builder.audio(AudioTrack::new(path).with_volume(audio.music_volume()));
        }
    }
    if let (Some(file), Some(frame)) = (&audio.chime_file, audio.chime_frame.filter(|&f| f > 0)) {
        if let Resolved::Present(path) = Resolved::resolve(assets, AssetKind::Audio, file) {
            builder = builder.audio(AudioTrack::new(path).starting_at(frame).with_volume(CHIME_VOLUME));
        }
    }

    let timeline = builder.build(SPRINT_REVIEW_ID, fps, video.width, video.height)?;
    tracing::debug!(
        frames = timeline.duration(),
        declared = video.duration_in_frames(),
        segments = timeline.segments().len(),
        "sprint review assembled"
    );
    Ok(timeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelkit_timeline::StaticManifest;

    const CONFIG: &str = r#"{
        "info": {
            "name": "Cho Oyu",
            "dateRange": "Mar 2 - Mar 13",
            "product": "Pulse",
            "platform": "iOS",
            "version": "2.4"
        },
        "overview": { "title": "Highlights", "items": [] },
        "demos": [
            { "type": "single", "label": "Checkout", "durationSeconds": 20, "videoFile": "checkout.mp4" }
        ],
        "summary": { "stats": [] },
        "audio": {
            "voiceoverFile": "vo.mp3",
            "voiceoverStartFrame": 12,
            "backgroundMusicFile": "bed.mp3",
            "chimeFile": "chime.mp3",
            "chimeFrame": 1300
        },
        "narrator": { "enabled": true }
    }"#;

    #[test]
    fn test_gallery_totals() {
        let tl = transition_gallery().unwrap();
        assert_eq!(tl.duration(), 710);
        assert_eq!(tl.segments().len(), 11);
        assert_eq!(tl.segments()[1].label, "glitch()");
        assert_eq!(tl.segments()[1].range, FrameRange::new(60, 65));
        assert_eq!(tl.segments()[4].range.duration, 55);
    }

    #[test]
    fn test_sprint_review_sequence() {
        let config = SprintConfig::from_json(CONFIG).unwrap();
        let assets = StaticManifest::new().with("audio/vo.mp3").with("audio/chime.mp3");
        let tl = sprint_review(&config, &Theme::default(), &assets).unwrap();

        // 5 + 15 + 20 + 15 + 30 seconds
        assert_eq!(tl.duration(), 2550);
        let slides: Vec<_> = tl
            .segments()
            .iter()
            .filter(|s| s.layer == SLIDE_LAYER)
            .map(|s| (s.label.as_str(), s.range.start))
            .collect();
        assert_eq!(
            slides,
            vec![("title", 0), ("overview", 150), ("Checkout", 600), ("summary", 1200), ("credits", 1650)]
        );
        assert_eq!(tl.segments()[0].range, FrameRange::new(0, 2550));
        assert!(tl.verify_declared(config.video.duration_in_frames()).is_err());
    }

    #[test]
    fn test_sprint_review_audio_only_when_present() {
        let config = SprintConfig::from_json(CONFIG).unwrap();
        let assets = StaticManifest::new().with("audio/vo.mp3").with("audio/chime.mp3");
        let tl = sprint_review(&config, &Theme::default(), &assets).unwrap();

        let tracks: Vec<_> = tl
            .audio_tracks()
            .iter()
            .map(|t| (t.file.as_str(), t.start_frame, t.volume))
            .collect();
        assert_eq!(tracks, vec![("audio/vo.mp3", 12, 1.0), ("audio/chime.mp3", 1300, 0.5)]);
    }

    #[test]
    fn test_narrator_follows_voiceover() {
        let config = SprintConfig::from_json(CONFIG).unwrap();
        let assets = StaticManifest::new();
        let tl = sprint_review(&config, &Theme::default(), &assets).unwrap();
        let narrator = tl.segments().iter().find(|s| s.label == "narrator").unwrap();
        assert_eq!(narrator.range, FrameRange::from_start_end(12, 2550));
    }
}
