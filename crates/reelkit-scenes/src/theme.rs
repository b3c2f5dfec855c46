//! Read-only visual theme passed explicitly to every render call.

use reelkit_core::{Color, ReelError, Result};
use serde::{Deserialize, Serialize};

/// `0xRRGGBB` to an opaque color.
fn rgb(hex: u32) -> Color {
    Color::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    )
}

fn rgba(hex: u32, alpha: f32) -> Color {
    let c = rgb(hex);
    Color::new(c.r, c.g, c.b, alpha)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: Color,
    pub primary_light: Color,
    pub text_dark: Color,
    pub text_medium: Color,
    pub text_light: Color,
    pub bg_light: Color,
    pub bg_dark: Color,
    /// Card and label backgrounds
    pub bg_overlay: Color,
    pub divider: Color,
    pub shadow: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeFonts {
    pub primary: String,
    pub mono: String,
}

/// Spacing scale in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeSpacing {
    pub xs: f32,
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
    pub xl: f32,
    pub xxl: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeRadius {
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    pub fonts: ThemeFonts,
    pub spacing: ThemeSpacing,
    pub border_radius: ThemeRadius,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".into(),
            colors: ThemeColors {
                primary: rgb(0xea580c),
                primary_light: rgb(0xfb923c),
                text_dark: rgb(0x1e293b),
                text_medium: rgb(0x334155),
                text_light: rgb(0x64748b),
                bg_light: rgb(0xffffff),
                bg_dark: rgb(0x1a1a2e),
                bg_overlay: rgba(0xffffff, 0.95),
                divider: rgb(0xe2e8f0),
                shadow: rgba(0x000000, 0.12),
            },
            fonts: ThemeFonts {
                primary: "system-ui, -apple-system, BlinkMacSystemFont, \"SF Pro Display\", sans-serif"
                    .into(),
                mono: "ui-monospace, SFMono-Regular, \"SF Mono\", Menlo, monospace".into(),
            },
            spacing: ThemeSpacing {
                xs: 8.0,
                sm: 16.0,
                md: 24.0,
                lg: 48.0,
                xl: 80.0,
                xxl: 120.0,
            },
            border_radius: ThemeRadius {
                sm: 7.0,
                md: 12.0,
                lg: 16.0,
            },
        }
    }
}

impl Theme {
    pub fn dark() -> Self {
        let base = Self::default();
        Self {
            name: "dark".into(),
            colors: ThemeColors {
                primary: rgb(0xff6b35),
                primary_light: rgb(0xff8c5a),
                text_dark: rgb(0xf1f5f9),
                text_medium: rgb(0xcbd5e1),
                text_light: rgb(0x94a3b8),
                bg_light: rgb(0x0f172a),
                bg_dark: rgb(0x020617),
                bg_overlay: rgba(0x0f172a, 0.95),
                divider: rgb(0x334155),
                ..base.colors
            },
            ..base
        }
    }

    pub fn blue() -> Self {
        Self::with_accent("blue", rgb(0x2563eb), rgb(0x3b82f6))
    }

    pub fn green() -> Self {
        Self::with_accent("green", rgb(0x16a34a), rgb(0x22c55e))
    }

    fn with_accent(name: &str, primary: Color, primary_light: Color) -> Self {
        let base = Self::default();
        Self {
            name: name.into(),
            colors: ThemeColors {
                primary,
                primary_light,
                ..base.colors
            },
            ..base
        }
    }

    /// Look up a built-in theme.
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "default" => Ok(Self::default()),
            "dark" => Ok(Self::dark()),
            "blue" => Ok(Self::blue()),
            "green" => Ok(Self::green()),
            other => Err(ReelError::NotFound(format!(
                "unknown theme '{other}' (expected default, dark, blue or green)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let theme = Theme::default();
        assert_eq!(theme.colors.primary.to_hex(), "#ea580c");
        assert_eq!(theme.colors.bg_dark.to_hex(), "#1a1a2e");
        assert_eq!(theme.colors.divider.to_hex(), "#e2e8f0");
    }

    #[test]
    fn test_variants_share_layout() {
        let blue = Theme::blue();
        assert_eq!(blue.colors.primary.to_hex(), "#2563eb");
        assert_eq!(blue.colors.text_dark, Theme::default().colors.text_dark);
        assert_eq!(blue.spacing, Theme::default().spacing);

        let dark = Theme::dark();
        assert_eq!(dark.colors.bg_light.to_hex(), "#0f172a");
        assert_eq!(dark.colors.shadow, Theme::default().colors.shadow);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Theme::by_name("green").unwrap().name, "green");
        assert!(Theme::by_name("purple").is_err());
    }
}
