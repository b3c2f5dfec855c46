//! `project.json` lifecycle commands.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::Utc;
use reelkit_timeline::serialization::PROJECT_FILE_NAME;
use reelkit_timeline::{ProjectFile, StaticManifest, VideoProject};

fn project_file(path: &Path) -> PathBuf {
    if path.file_name().is_some_and(|n| n == PROJECT_FILE_NAME) {
        path.to_path_buf()
    } else {
        path.join(PROJECT_FILE_NAME)
    }
}

fn load(path: &Path) -> anyhow::Result<(PathBuf, ProjectFile)> {
    let file = project_file(path);
    let project = ProjectFile::load_from_file(&file)
        .with_context(|| format!("Failed to load project {}", file.display()))?;
    Ok((file, project))
}

fn save(file: &Path, project: VideoProject) -> anyhow::Result<()> {
    ProjectFile::new(project)
        .save_to_file(file)
        .with_context(|| format!("Failed to write {}", file.display()))
}

pub fn new(name: String, dir: PathBuf, template: String, brand: String) -> anyhow::Result<()> {
    let root = dir.join(&name);
    let file = root.join(PROJECT_FILE_NAME);
    if file.exists() {
        bail!("Project already exists at {}", file.display());
    }
    std::fs::create_dir_all(&root).with_context(|| format!("Failed to create {}", root.display()))?;

    let project = VideoProject::create(&name, template, brand, Utc::now());
    save(&file, project)?;
    tracing::info!(path = %file.display(), "created project");
    println!("Created {}", file.display());
    Ok(())
}

pub fn status(path: PathBuf, public: PathBuf, json: bool) -> anyhow::Result<()> {
    let (file, loaded) = load(&path)?;
    let mut project = loaded.project;

    if public.is_dir() {
        let assets = StaticManifest::scan_dir(&public)?;
        let before = project.clone();
        project.refresh_statuses(&assets);
        if project != before {
            save(&file, project.clone())?;
        }
    } else {
        tracing::warn!(path = %public.display(), "asset root not found; statuses not refreshed");
    }

    let scan = project.scan(file.display().to_string(), Utc::now());
    if json {
        println!("{}", serde_json::to_string_pretty(&scan)?);
        return Ok(());
    }

    println!("Project: {}", scan.name);
    println!("  Phase: {:?} ({})", scan.phase, scan.phase.description());
    println!("  Health: {:?}", scan.health);
    println!(
        "  Scenes: {} total, {} ready, {} with asset, {} need asset",
        scan.scenes.total, scan.scenes.ready, scan.scenes.has_asset, scan.scenes.needs_asset
    );
    println!("  Voiceover: {:?}, music: {:?}", scan.voiceover_status, scan.music_status);
    println!(
        "  Last modified: {} ({} days ago)",
        scan.last_modified.format("%Y-%m-%d"),
        scan.days_since_update
    );
    if !scan.blockers.is_empty() {
        println!();
        println!("Blockers:");
        for blocker in &scan.blockers {
            println!("  - {blocker}");
        }
    }
    if !scan.next_actions.is_empty() {
        println!();
        println!("Next:");
        for action in &scan.next_actions {
            println!("  - {action}");
        }
    }
    Ok(())
}

pub fn log(path: PathBuf, summary: String) -> anyhow::Result<()> {
    let (file, loaded) = load(&path)?;
    let mut project = loaded.project;
    project.add_session(summary, Utc::now());
    let sessions = project.sessions.len();
    save(&file, project)?;
    println!("Logged session ({sessions} total)");
    Ok(())
}

pub fn advance(path: PathBuf) -> anyhow::Result<()> {
    let (file, loaded) = load(&path)?;
    let mut project = loaded.project;
    let phase = project.advance_phase(Utc::now())?;
    save(&file, project)?;
    println!("Now in {phase:?}: {}", phase.description());
    Ok(())
}
