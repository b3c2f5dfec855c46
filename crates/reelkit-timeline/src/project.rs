//! Multi-session video project state.
//!
//! `project.json` records intent; the asset directory is the source of truth
//! for which files exist, so statuses are refreshed against an
//! [`AssetLookup`] before scanning.

use chrono::{DateTime, NaiveDate, Utc};
use reelkit_core::{ReelError, Result};
use serde::{Deserialize, Serialize};

use crate::assets::AssetLookup;

/// Days without an update after which a project counts as stale.
pub const STALE_AFTER_DAYS: i64 = 7;

/// Narration pace used for voiceover estimates.
const WORDS_PER_MINUTE: f64 = 150.0;

// ── Lifecycle ───────────────────────────────────────────────────

/// Project phases in order of progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Planning,
    Assets,
    Audio,
    Editing,
    Rendering,
    Complete,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Planning,
        Phase::Assets,
        Phase::Audio,
        Phase::Editing,
        Phase::Rendering,
        Phase::Complete,
    ];

    pub fn next(self) -> Option<Phase> {
        let i = Self::ALL.iter().position(|&p| p == self)?;
        Self::ALL.get(i + 1).copied()
    }

    pub fn description(self) -> &'static str {
        match self {
            Phase::Planning => "Planning scenes and writing script",
            Phase::Assets => "Recording demos and gathering assets",
            Phase::Audio => "Generating voiceover and music",
            Phase::Editing => "Adjusting timing and previewing",
            Phase::Rendering => "Rendering final video",
            Phase::Complete => "Video complete",
        }
    }
}

// ── Scenes ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualType {
    /// Generated slide, no asset needed
    Slide,
    /// Scripted browser recording
    Playwright,
    /// User-provided video file
    External,
    Screenshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneType {
    Title,
    Overview,
    Demo,
    SplitDemo,
    Summary,
    Credits,
    Problem,
    Solution,
    Feature,
    Stats,
    Cta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetStatus {
    /// No asset needed, or asset verified
    Ready,
    #[default]
    AssetNeeded,
    /// File exists but not yet verified in preview
    AssetPresent,
    /// Was present, now gone
    AssetMissing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneVisual {
    #[serde(rename = "type")]
    pub kind: VisualType,
    /// Path relative to the public root, e.g. `demos/dark-mode.mp4`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Recording instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SceneType,
    pub duration_seconds: f64,
    pub visual: SceneVisual,
    #[serde(default)]
    pub narration: Option<String>,
    #[serde(default)]
    pub status: AssetStatus,
}

impl Scene {
    /// A generated slide scene, ready from the start.
    pub fn slide(id: impl Into<String>, kind: SceneType, duration_seconds: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            duration_seconds,
            visual: SceneVisual {
                kind: VisualType::Slide,
                asset: None,
                instructions: None,
            },
            narration: None,
            status: AssetStatus::Ready,
        }
    }

    /// A scene backed by a recorded or supplied asset.
    pub fn with_asset(
        id: impl Into<String>,
        kind: SceneType,
        duration_seconds: f64,
        visual: VisualType,
        asset: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            duration_seconds,
            visual: SceneVisual {
                kind: visual,
                asset: Some(asset.into()),
                instructions: None,
            },
            narration: None,
            status: AssetStatus::AssetNeeded,
        }
    }

    fn refresh(&mut self, assets: &dyn AssetLookup) {
        let Some(asset) = &self.visual.asset else {
            if self.visual.kind == VisualType::Slide {
                self.status = AssetStatus::Ready;
            }
            return;
        };
        let present = assets.exists(asset);
        self.status = match (self.status, present) {
            (AssetStatus::Ready, true) => AssetStatus::Ready,
            (_, true) => AssetStatus::AssetPresent,
            (AssetStatus::Ready | AssetStatus::AssetPresent | AssetStatus::AssetMissing, false) => {
                AssetStatus::AssetMissing
            }
            (AssetStatus::AssetNeeded, false) => AssetStatus::AssetNeeded,
        };
    }
}

// ── Audio ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioStatus {
    Needed,
    Present,
    Verified,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioAsset {
    pub file: String,
    pub status: AudioStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_word_count: Option<u32>,
}

impl AudioAsset {
    fn refresh(&mut self, assets: &dyn AssetLookup) {
        let present = assets.exists(&self.file);
        self.status = match (self.status, present) {
            (AudioStatus::Needed, true) => AudioStatus::Present,
            (AudioStatus::Present | AudioStatus::Verified, false) => AudioStatus::Needed,
            (status, _) => status,
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    pub voiceover: AudioAsset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<AudioAsset>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sfx: Vec<AudioAsset>,
}

// ── Project ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimates {
    pub total_duration_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voiceover_minutes: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub date: NaiveDate,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoProject {
    pub name: String,
    /// Template the project was created from, e.g. `sprint-review`
    pub template: String,
    pub brand: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub phase: Phase,
    pub scenes: Vec<Scene>,
    pub audio: AudioConfig,
    pub estimates: Estimates,
    pub sessions: Vec<SessionEntry>,
}

impl VideoProject {
    pub fn create(
        name: impl Into<String>,
        template: impl Into<String>,
        brand: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            brand: brand.into(),
            created: now,
            updated: now,
            phase: Phase::Planning,
            scenes: Vec::new(),
            audio: AudioConfig {
                voiceover: AudioAsset {
                    file: "audio/voiceover.mp3".into(),
                    status: AudioStatus::Needed,
                    script_word_count: None,
                },
                music: None,
                sfx: Vec::new(),
            },
            estimates: Estimates::default(),
            sessions: vec![SessionEntry {
                date: now.date_naive(),
                summary: "Project created".into(),
            }],
        }
    }

    /// Record work done; a second entry on the same day replaces the first.
    pub fn add_session(&mut self, summary: impl Into<String>, now: DateTime<Utc>) {
        let today = now.date_naive();
        let summary = summary.into();
        match self.sessions.last_mut() {
            Some(last) if last.date == today => last.summary = summary,
            _ => self.sessions.push(SessionEntry { date: today, summary }),
        }
        self.updated = now;
    }

    pub fn add_scene(&mut self, scene: Scene) -> Result<()> {
        if self.scenes.iter().any(|s| s.id == scene.id) {
            return Err(ReelError::InvalidParameter(format!(
                "scene '{}' already exists",
                scene.id
            )));
        }
        if scene.duration_seconds.is_nan() || scene.duration_seconds <= 0.0 {
            return Err(ReelError::InvalidParameter(format!(
                "scene '{}' needs a positive duration",
                scene.id
            )));
        }
        self.scenes.push(scene);
        self.recompute_estimates();
        Ok(())
    }

    /// Move to the next phase.
    pub fn advance_phase(&mut self, now: DateTime<Utc>) -> Result<Phase> {
        let next = self.phase.next().ok_or_else(|| {
            ReelError::InvalidParameter(format!("project '{}' is already complete", self.name))
        })?;
        tracing::info!(project = %self.name, from = ?self.phase, to = ?next, "advancing phase");
        self.phase = next;
        self.updated = now;
        Ok(next)
    }

    pub fn recompute_estimates(&mut self) {
        self.estimates.total_duration_seconds =
            self.scenes.iter().map(|s| s.duration_seconds).sum();
        self.estimates.voiceover_minutes = self
            .audio
            .voiceover
            .script_word_count
            .map(|words| words as f64 / WORDS_PER_MINUTE);
    }

    /// Sync scene and audio statuses with the files that actually exist.
    pub fn refresh_statuses(&mut self, assets: &dyn AssetLookup) {
        for scene in &mut self.scenes {
            scene.refresh(assets);
        }
        self.audio.voiceover.refresh(assets);
        if let Some(music) = &mut self.audio.music {
            music.refresh(assets);
        }
        for sfx in &mut self.audio.sfx {
            sfx.refresh(assets);
        }
    }

    /// Summarise health, blockers and next actions.
    pub fn scan(&self, path: impl Into<String>, now: DateTime<Utc>) -> ProjectScanResult {
        let count = |status: AssetStatus| self.scenes.iter().filter(|s| s.status == status).count();
        let scenes = SceneCounts {
            total: self.scenes.len(),
            ready: count(AssetStatus::Ready),
            needs_asset: count(AssetStatus::AssetNeeded) + count(AssetStatus::AssetMissing),
            has_asset: count(AssetStatus::AssetPresent),
        };
        let voiceover_status = self.audio.voiceover.status;
        let music_status = self
            .audio
            .music
            .as_ref()
            .map_or(AudioStatus::Optional, |m| m.status);

        let mut blockers = Vec::new();
        for scene in &self.scenes {
            let asset = scene.visual.asset.as_deref().unwrap_or("?");
            match scene.status {
                AssetStatus::AssetNeeded if self.phase >= Phase::Assets => {
                    blockers.push(format!("Scene '{}' needs {asset}", scene.id));
                }
                AssetStatus::AssetMissing => {
                    blockers.push(format!("Scene '{}' lost its asset {asset}", scene.id));
                }
                _ => {}
            }
        }
        if self.phase >= Phase::Editing && voiceover_status == AudioStatus::Needed {
            blockers.push(format!("Voiceover {} is missing", self.audio.voiceover.file));
        }

        let days_since_update = (now - self.updated).num_days();
        let health = if self.phase == Phase::Complete {
            ProjectHealth::Complete
        } else if !blockers.is_empty() {
            ProjectHealth::Blocked
        } else if days_since_update >= STALE_AFTER_DAYS {
            ProjectHealth::Stale
        } else {
            ProjectHealth::Ready
        };

        let next_actions = self.next_actions(&scenes, voiceover_status);

        ProjectScanResult {
            name: self.name.clone(),
            path: path.into(),
            phase: self.phase,
            health,
            scenes,
            voiceover_status,
            music_status,
            blockers,
            next_actions,
            last_modified: self.updated,
            days_since_update,
        }
    }

    fn next_actions(&self, scenes: &SceneCounts, voiceover: AudioStatus) -> Vec<String> {
        let mut actions = Vec::new();
        match self.phase {
            Phase::Planning => {
                if scenes.total == 0 {
                    actions.push("Define the scene list".to_string());
                }
                actions.push("Write narration for each scene".to_string());
            }
            Phase::Assets => {
                for scene in self.scenes.iter().filter(|s| s.status == AssetStatus::AssetNeeded) {
                    if let Some(asset) = &scene.visual.asset {
                        actions.push(format!("Record {asset} for scene '{}'", scene.id));
                    }
                }
            }
            Phase::Audio => {
                if voiceover == AudioStatus::Needed {
                    actions.push(format!("Generate voiceover {}", self.audio.voiceover.file));
                }
            }
            Phase::Editing => {
                for scene in self.scenes.iter().filter(|s| s.status == AssetStatus::AssetPresent) {
                    actions.push(format!("Verify scene '{}' in preview", scene.id));
                }
                if voiceover == AudioStatus::Present {
                    actions.push("Verify voiceover timing".to_string());
                }
            }
            Phase::Rendering => actions.push("Render the final video".to_string()),
            Phase::Complete => {}
        }
        if actions.is_empty() {
            if let Some(next) = self.phase.next() {
                actions.push(format!("Advance to {next:?}: {}", next.description()));
            }
        }
        actions
    }
}

// ── Scanning ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectHealth {
    /// Can proceed to the next phase
    Ready,
    /// Missing required assets
    Blocked,
    /// No updates in the last week
    Stale,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneCounts {
    pub total: usize,
    pub ready: usize,
    pub needs_asset: usize,
    pub has_asset: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectScanResult {
    pub name: String,
    pub path: String,
    pub phase: Phase,
    pub health: ProjectHealth,
    pub scenes: SceneCounts,
    pub voiceover_status: AudioStatus,
    pub music_status: AudioStatus,
    pub blockers: Vec<String>,
    pub next_actions: Vec<String>,
    pub last_modified: DateTime<Utc>,
    pub days_since_update: i64,
}
