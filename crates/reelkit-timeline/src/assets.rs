//! Asset manifests.
//!
//! Paths are relative to the public asset root (`demos/x.mp4`,
//! `images/logo.png`, `audio/voiceover.mp3`). A missing asset is never an
//! error at this level; callers fall back to placeholders.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use reelkit_core::{ReelError, Result};

/// Answers whether an asset exists.
pub trait AssetLookup: Send + Sync {
    fn exists(&self, path: &str) -> bool;
}

/// Asset directories under the public root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Demo,
    Image,
    Audio,
}

impl AssetKind {
    pub fn directory(self) -> &'static str {
        match self {
            Self::Demo => "demos",
            Self::Image => "images",
            Self::Audio => "audio",
        }
    }

    /// `demos/<file>` etc. A file that already carries a directory is kept as-is.
    pub fn path(self, file: &str) -> String {
        let file = normalize(file);
        if file.contains('/') {
            file
        } else {
            format!("{}/{}", self.directory(), file)
        }
    }
}

/// Outcome of resolving an asset against a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Present(String),
    Missing(String),
}

impl Resolved {
    pub fn resolve(lookup: &dyn AssetLookup, kind: AssetKind, file: &str) -> Self {
        let path = kind.path(file);
        if lookup.exists(&path) {
            Self::Present(path)
        } else {
            tracing::warn!(%path, "asset missing, using placeholder");
            Self::Missing(path)
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Present(p) | Self::Missing(p) => p,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

fn normalize(path: &str) -> String {
    path.trim()
        .replace('\\', "/")
        .trim_start_matches("./")
        .trim_start_matches('/')
        .to_string()
}

/// A fixed set of known asset paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticManifest {
    files: BTreeSet<String>,
}

impl StaticManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str) {
        self.files.insert(normalize(path));
    }

    pub fn with(mut self, path: &str) -> Self {
        self.insert(path);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    /// Snapshot every file below `root`, recursively.
    pub fn scan_dir(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(ReelError::NotFound(format!(
                "asset directory {} does not exist",
                root.display()
            )));
        }
        let mut manifest = Self::new();
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    stack.push(path);
                } else if let Ok(relative) = path.strip_prefix(root) {
                    manifest.insert(&relative.to_string_lossy());
                }
            }
        }
        tracing::debug!(root = %root.display(), files = manifest.len(), "scanned assets");
        Ok(manifest)
    }
}

impl AssetLookup for StaticManifest {
    fn exists(&self, path: &str) -> bool {
        self.files.contains(&normalize(path))
    }
}

impl<'a> FromIterator<&'a str> for StaticManifest {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut manifest = Self::new();
        for path in iter {
            manifest.insert(path);
        }
        manifest
    }
}
