//! Capture viewport presets.

use reelkit_core::ReelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pixel size a capture is recorded or scaled at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const HD_1080: Self = Self::new(1920, 1080);
    pub const HD_720: Self = Self::new(1280, 720);
    pub const MOBILE: Self = Self::new(390, 844);
    pub const TABLET: Self = Self::new(1024, 768);

    /// Named presets in the order they are listed to users.
    pub const PRESETS: [(&'static str, Self); 4] = [
        ("1080p", Self::HD_1080),
        ("720p", Self::HD_720),
        ("mobile", Self::MOBILE),
        ("tablet", Self::TABLET),
    ];

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        Self::PRESETS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }

    /// Video filter argument that scales to this size.
    pub fn scale_filter(self) -> String {
        format!("scale={}:{}", self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::HD_1080
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Accepts a preset name or an explicit `WIDTHxHEIGHT`.
impl FromStr for Viewport {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(v) = Self::preset(s) {
            return Ok(v);
        }
        let invalid = || {
            let names: Vec<_> = Self::PRESETS.iter().map(|(n, _)| *n).collect();
            ReelError::InvalidParameter(format!(
                "unknown viewport '{s}' (expected one of {} or WIDTHxHEIGHT)",
                names.join(", ")
            ))
        };
        let (w, h) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self::new(width, height))
    }
}
