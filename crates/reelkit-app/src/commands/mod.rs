pub mod convert;
pub mod gallery;
pub mod plan;
pub mod project;
pub mod render;

use std::path::Path;

use anyhow::Context;
use reelkit_scenes::{sprint_review, Scene, Theme};
use reelkit_timeline::{SprintConfig, StaticManifest, Timeline};

/// A sprint review built against the files under an asset root.
pub struct LoadedSprint {
    pub config: SprintConfig,
    pub theme: Theme,
    pub assets: StaticManifest,
    pub timeline: Timeline<Scene>,
}

pub fn load_sprint(config: &Path, public: &Path, theme: &str) -> anyhow::Result<LoadedSprint> {
    let config = SprintConfig::load(config)
        .with_context(|| format!("Failed to load sprint config {}", config.display()))?;
    let theme = Theme::by_name(theme)?;

    let assets = if public.is_dir() {
        StaticManifest::scan_dir(public)?
    } else {
        tracing::warn!(path = %public.display(), "asset root not found; every asset treated as missing");
        StaticManifest::new()
    };

    let timeline = sprint_review(&config, &theme, &assets).context("Failed to assemble sprint review")?;
    Ok(LoadedSprint {
        config,
        theme,
        assets,
        timeline,
    })
}
