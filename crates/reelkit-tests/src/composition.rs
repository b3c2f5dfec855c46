//! Integration tests for composition assembly and rendering.
//!
//! Exercises reelkit-core, reelkit-timeline and reelkit-scenes together,
//! with asset manifests scanned from a real directory.

use std::fs;
use std::path::Path;

use reelkit_core::{GridSpec, ReelError};
use reelkit_scenes::presentation::builtin;
use reelkit_scenes::{render_frame, render_range, sprint_review, transition_gallery, Content, Layer, Scene, Theme};
use reelkit_scenes::{GALLERY_DURATION, GALLERY_ID};
use reelkit_timeline::{DemoKind, SprintConfig, StaticManifest, TransitionSeries, TransitionTiming};

// ── Helpers ────────────────────────────────────────────────────

const SPRINT: &str = r#"{
    "info": {
        "name": "Lhotse",
        "dateRange": "Apr 6 - Apr 17",
        "product": "Pulse",
        "platform": "Android",
        "version": "3.1"
    },
    "overview": { "title": "What shipped", "items": [] },
    "demos": [
        { "type": "single", "label": "Checkout", "durationSeconds": 20, "videoFile": "checkout.mp4" }
    ],
    "summary": { "stats": [] },
    "audio": { "chimeFile": "chime.mp3", "chimeFrame": 1300 },
    "mazeDecoration": { "enabled": true }
}"#;

fn sprint() -> SprintConfig {
    SprintConfig::from_json(SPRINT).unwrap()
}

fn public_dir(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for file in files {
        touch(dir.path(), file);
    }
    dir
}

fn touch(root: &Path, file: &str) {
    let path = root.join(file);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

fn find<'a>(layers: &'a [Layer], label: &str) -> Option<&'a Layer> {
    layers.iter().find_map(|l| l.find(label))
}

// ── Transition gallery ─────────────────────────────────────────

#[test]
fn gallery_total_matches_exported_duration() {
    let timeline = transition_gallery().unwrap();
    assert_eq!(timeline.config().id, GALLERY_ID);
    assert_eq!(timeline.duration(), GALLERY_DURATION);

    let spans: i64 = timeline.segments().iter().skip(1).map(|s| s.range.duration).sum();
    assert_eq!(60 + spans, GALLERY_DURATION);
}

#[test]
fn gallery_demo_lengths_follow_presentations() {
    let timeline = transition_gallery().unwrap();
    let demos: Vec<_> = timeline.segments().iter().skip(1).collect();
    assert_eq!(demos.len(), builtin().len());
    for (segment, presentation) in demos.iter().zip(builtin().iter()) {
        assert_eq!(segment.label, presentation.name());
        assert_eq!(segment.range.duration, 90 - presentation.default_duration());
    }
}

#[test]
fn three_scene_series_spans_95_frames() {
    let layout = TransitionSeries::new()
        .scene("a", 45)
        .transition(TransitionTiming::linear(20))
        .scene("b", 45)
        .transition(TransitionTiming::linear(20))
        .scene("c", 45)
        .layout()
        .unwrap();
    assert_eq!(layout.total_span(), 95);
}

#[test]
fn gallery_renders_every_frame() {
    let timeline = transition_gallery().unwrap();
    let theme = Theme::default();
    let assets = StaticManifest::new();
    let frames = render_range(&timeline, 0, timeline.duration(), &theme, &assets).unwrap();
    assert_eq!(frames.len() as i64, GALLERY_DURATION);
    assert!(frames.iter().all(|f| !f.layers.is_empty()));
}

// ── Sprint review ──────────────────────────────────────────────

#[test]
fn demo_shows_placeholder_until_capture_exists() {
    let config = sprint();
    let theme = Theme::default();
    let public = public_dir(&["audio/chime.mp3"]);

    let assets = StaticManifest::scan_dir(public.path()).unwrap();
    let timeline = sprint_review(&config, &theme, &assets).unwrap();
    let frame = render_frame(&timeline, 700, &theme, &assets).unwrap();
    match &find(&frame.layers, "video").unwrap().content {
        Content::Placeholder { expected_path, .. } => assert_eq!(expected_path, "demos/checkout.mp4"),
        other => panic!("expected placeholder, got {other:?}"),
    }

    touch(public.path(), "demos/checkout.mp4");
    let assets = StaticManifest::scan_dir(public.path()).unwrap();
    let timeline = sprint_review(&config, &theme, &assets).unwrap();
    let frame = render_frame(&timeline, 700, &theme, &assets).unwrap();
    match &find(&frame.layers, "video").unwrap().content {
        Content::Video { path, source_frame, .. } => {
            assert_eq!(path, "demos/checkout.mp4");
            assert_eq!(*source_frame, 100.0);
        }
        other => panic!("expected video, got {other:?}"),
    }
}

#[test]
fn layers_stack_background_slide_decoration() {
    let config = sprint();
    let theme = Theme::default();
    let assets = StaticManifest::new();
    let timeline = sprint_review(&config, &theme, &assets).unwrap();

    let frame = render_frame(&timeline, 300, &theme, &assets).unwrap();
    let labels: Vec<_> = frame.layers.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels.first(), Some(&"background"));
    assert_eq!(labels.last(), Some(&"maze"));
    assert!(find(&frame.layers, "overview-title").is_some());
}

#[test]
fn chime_is_audible_from_its_frame() {
    let config = sprint();
    let theme = Theme::default();
    let public = public_dir(&["audio/chime.mp3"]);
    let assets = StaticManifest::scan_dir(public.path()).unwrap();
    let timeline = sprint_review(&config, &theme, &assets).unwrap();

    assert!(render_frame(&timeline, 1299, &theme, &assets).unwrap().audio.is_empty());
    let frame = render_frame(&timeline, 1310, &theme, &assets).unwrap();
    assert_eq!(frame.audio.len(), 1);
    assert_eq!(frame.audio[0].file, "audio/chime.mp3");
    assert_eq!(frame.audio[0].local_frame, 10);
    assert_eq!(frame.audio[0].volume, 0.5);
}

#[test]
fn parallel_range_matches_sequential() {
    let config = sprint();
    let theme = Theme::default();
    let assets = StaticManifest::new();
    let timeline = sprint_review(&config, &theme, &assets).unwrap();

    let parallel = render_range(&timeline, 100, 260, &theme, &assets).unwrap();
    let sequential: Vec<_> = (100..260)
        .map(|f| render_frame(&timeline, f, &theme, &assets).unwrap())
        .collect();
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.first().unwrap().frame, 100);
}

#[test]
fn frame_past_the_end_is_an_error() {
    let config = sprint();
    let theme = Theme::default();
    let assets = StaticManifest::new();
    let timeline = sprint_review(&config, &theme, &assets).unwrap();
    assert!(render_frame(&timeline, timeline.duration(), &theme, &assets).is_err());
    assert!(render_frame(&timeline, -1, &theme, &assets).is_err());
}

#[test]
fn frame_descriptions_serialize() {
    let config = sprint();
    let theme = Theme::default();
    let assets = StaticManifest::new();
    let timeline = sprint_review(&config, &theme, &assets).unwrap();
    let frame = render_frame(&timeline, 45, &theme, &assets).unwrap();

    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["frame"], 45);
    assert_eq!(json["timecode"], "00:00:01:15");
    assert!(json.get("audio").is_none());
}

#[test]
fn demo_shorter_than_its_fade_renders() {
    let mut config = sprint();
    config.demos[0].duration_seconds = 0.3;
    let theme = Theme::default();
    let assets = StaticManifest::new();
    let timeline = sprint_review(&config, &theme, &assets).unwrap();

    let demo = timeline.segments().iter().find(|s| s.label == "Checkout").unwrap();
    assert_eq!(demo.range.duration, 9);
    let frames = render_range(&timeline, demo.range.start, demo.range.end(), &theme, &assets).unwrap();
    assert_eq!(frames.len(), 9);
    for frame in &frames {
        assert!(find(&frame.layers, "demo").unwrap().opacity < 1.0);
    }
}

#[test]
fn short_timelapse_and_summary_render() {
    let mut config = sprint();
    config.demos[0].duration_seconds = 1.5;
    config.demos[0].kind = DemoKind::Timelapse {
        video_file: "build.mp4".into(),
        video_duration_seconds: 120.0,
        outro_video_file: None,
        outro_seconds: 0.0,
    };
    let theme = Theme::default();
    let assets = StaticManifest::new();
    let timeline = sprint_review(&config, &theme, &assets).unwrap();
    assert!(render_range(&timeline, 0, timeline.duration(), &theme, &assets).is_ok());
}

#[test]
fn chime_past_the_end_is_skipped() {
    let mut config = sprint();
    config.audio.chime_frame = Some(100_000);
    let theme = Theme::default();
    let public = public_dir(&["audio/chime.mp3"]);
    let assets = StaticManifest::scan_dir(public.path()).unwrap();
    let timeline = sprint_review(&config, &theme, &assets).unwrap();

    assert!(timeline.audio_tracks().is_empty());
    let last = render_frame(&timeline, timeline.duration() - 1, &theme, &assets).unwrap();
    assert!(last.audio.is_empty());
}

// ── Decoration grid ────────────────────────────────────────────

#[test]
fn maze_grid_is_reproducible() {
    let config = sprint();
    let theme = Theme::default();
    let assets = StaticManifest::new();
    let grid_of = || {
        let timeline = sprint_review(&config, &theme, &assets).unwrap();
        timeline
            .segments()
            .iter()
            .find_map(|s| match &s.content {
                Scene::Maze(maze) => Some(maze.grid.clone()),
                _ => None,
            })
            .unwrap()
    };
    assert_eq!(grid_of(), grid_of());

    let spec = GridSpec {
        rows: 9,
        cols: 7,
        ..GridSpec::default()
    };
    assert_eq!(spec.generate().unwrap(), spec.generate().unwrap());
}

#[test]
fn bad_sprint_config_is_rejected() {
    let result = SprintConfig::from_json(r#"{ "info": {} }"#);
    assert!(matches!(result, Err(ReelError::Config(_))));
}

#[test]
fn bundled_template_matches_its_declared_length() {
    let config = SprintConfig::from_json(include_str!("../../../templates/sprint-review.json")).unwrap();
    let theme = Theme::default();
    let assets = StaticManifest::new();
    let timeline = sprint_review(&config, &theme, &assets).unwrap();
    timeline.verify_declared(config.video.duration_in_frames()).unwrap();
    assert!(timeline.audio_tracks().is_empty());
}
