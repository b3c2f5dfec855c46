//! Integration tests for project files on disk.
//!
//! Exercises reelkit-timeline project state against a scanned asset
//! directory.

use std::fs;

use chrono::{DateTime, Duration, TimeZone, Utc};
use reelkit_core::ReelError;
use reelkit_timeline::serialization::CURRENT_VERSION;
use reelkit_timeline::{
    AssetStatus, Phase, ProjectFile, ProjectHealth, Scene, SceneType, StaticManifest, VideoProject,
    VisualType,
};

// ── Helpers ────────────────────────────────────────────────────

fn monday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 6, 9, 30, 0).unwrap()
}

fn project() -> VideoProject {
    let mut project = VideoProject::create("lhotse", "sprint-review", "default", monday());
    project
        .add_scene(Scene::slide("title", SceneType::Title, 5.0))
        .unwrap();
    project
        .add_scene(Scene::with_asset(
            "checkout",
            SceneType::Demo,
            20.0,
            VisualType::Playwright,
            "demos/checkout.mp4",
        ))
        .unwrap();
    project
}

// ── Sessions ───────────────────────────────────────────────────

#[test]
fn session_log_keeps_one_entry_per_day() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.json");

    let mut project = project();
    project.add_session("Planned scenes", monday() + Duration::hours(3));
    ProjectFile::new(project).save_to_file(&path).unwrap();

    let mut project = ProjectFile::load_from_file(&path).unwrap().project;
    project.add_session("Recorded checkout", monday() + Duration::days(1));
    project.add_session("Re-recorded checkout", monday() + Duration::days(1) + Duration::hours(2));
    ProjectFile::new(project).save_to_file(&path).unwrap();

    let sessions = ProjectFile::load_from_file(&path).unwrap().project.sessions;
    let summaries: Vec<_> = sessions.iter().map(|s| s.summary.as_str()).collect();
    assert_eq!(summaries, vec!["Planned scenes", "Re-recorded checkout"]);
}

// ── Versioning ─────────────────────────────────────────────────

#[test]
fn unversioned_file_migrates_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.json");
    fs::write(&path, serde_json::to_vec_pretty(&project()).unwrap()).unwrap();

    let file = ProjectFile::load_from_file(&path).unwrap();
    assert_eq!(file.version, CURRENT_VERSION);
    assert_eq!(file.project, project());

    // saving writes the wrapper
    file.save_to_file(&path).unwrap();
    let raw: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(raw["version"], CURRENT_VERSION);
    assert_eq!(raw["project"]["name"], "lhotse");
}

#[test]
fn newer_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.json");
    let mut raw = serde_json::to_value(ProjectFile::new(project())).unwrap();
    raw["version"] = serde_json::json!(CURRENT_VERSION + 1);
    fs::write(&path, serde_json::to_vec(&raw).unwrap()).unwrap();

    assert!(matches!(
        ProjectFile::load_from_file(&path),
        Err(ReelError::Serialization(_))
    ));
}

// ── Status against assets ──────────────────────────────────────

#[test]
fn recorded_capture_unblocks_project() {
    let public = tempfile::tempdir().unwrap();
    let mut project = project();
    project.advance_phase(monday()).unwrap();
    assert_eq!(project.phase, Phase::Assets);

    let assets = StaticManifest::scan_dir(public.path()).unwrap();
    project.refresh_statuses(&assets);
    let scan = project.scan("projects/lhotse", monday());
    assert_eq!(scan.health, ProjectHealth::Blocked);
    assert_eq!(scan.blockers.len(), 1);

    fs::create_dir_all(public.path().join("demos")).unwrap();
    fs::write(public.path().join("demos/checkout.mp4"), b"").unwrap();
    let assets = StaticManifest::scan_dir(public.path()).unwrap();
    project.refresh_statuses(&assets);

    assert_eq!(project.scenes[1].status, AssetStatus::AssetPresent);
    let scan = project.scan("projects/lhotse", monday());
    assert_eq!(scan.health, ProjectHealth::Ready);
    assert!(scan.blockers.is_empty());
}
