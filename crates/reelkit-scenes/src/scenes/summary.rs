//! Release summary: counting stats, then an optional screenshot.

use reelkit_core::{interpolate, Extrapolate, Result, Spring, SpringConfig};
use reelkit_timeline::{AssetKind, Summary};

use super::ramp;
use crate::render::{Render, RenderContext};
use crate::visual::{Content, Layer, TextRole};

/// Frame at which the screenshot springs in.
pub const SCREENSHOT_START: i64 = 150;

const STAT_SPRING: SpringConfig = SpringConfig::new(12.0, 100.0);
const SCREENSHOT_SPRING: SpringConfig = SpringConfig::new(12.0, 80.0);

#[derive(Debug, Clone, PartialEq)]
pub struct SummarySlide {
    pub summary: Summary,
}

impl SummarySlide {
    pub fn new(summary: Summary) -> Self {
        Self { summary }
    }

    /// Displayed value of stat `index` at `frame`.
    pub fn count_up(&self, index: usize, frame: i64) -> Result<i64> {
        let Some(stat) = self.summary.stats.get(index) else {
            return Ok(0);
        };
        let start = 40.0 + index as f64 * 10.0;
        Ok(ramp(frame as f64, [start, start + 60.0], [0.0, stat.value])?.round() as i64)
    }

    fn screenshot_path(&self, ctx: &RenderContext<'_>) -> Option<String> {
        let file = self.summary.screenshot_file.as_deref()?;
        let path = AssetKind::Image.path(file);
        ctx.assets.exists(&path).then_some(path)
    }
}

impl Render for SummarySlide {
    fn render(&self, local_frame: i64, ctx: &RenderContext<'_>) -> Result<Layer> {
        let f = local_frame as f64;
        let colors = &ctx.theme.colors;
        let screenshot = self
            .screenshot_path(ctx)
            .filter(|_| local_frame >= SCREENSHOT_START);

        let mut stats = Vec::with_capacity(self.summary.stats.len());
        for (i, stat) in self.summary.stats.iter().enumerate() {
            let spring = Spring::new(STAT_SPRING)?
                .with_delay(20 + i as i64 * 10)
                .evaluate(f, ctx.fps);
            stats.push(
                Layer::group(
                    format!("stat-{i}"),
                    vec![
                        Layer::text("value", self.count_up(i, local_frame)?.to_string(), TextRole::Stat, colors.primary),
                        Layer::text("label", &stat.label, TextRole::Label, colors.text_light),
                    ],
                )
                .with_opacity(spring)
                .scaled(0.5 + spring * 0.5),
            );
        }

        let fade_out = if screenshot.is_some() {
            let start = SCREENSHOT_START as f64;
            ramp(f, [start, start + 20.0], [1.0, 0.0])?
        } else {
            1.0
        };
        let stats_layer = Layer::group(
            "stats",
            vec![
                Layer::text("header", "SPRINT COMPLETE", TextRole::Label, colors.primary),
                Layer::text("summary-title", "Release Summary", TextRole::Heading, colors.text_dark),
                Layer::group("stat-row", stats),
            ],
        )
        .with_opacity(ramp(f, [0.0, 20.0], [0.0, 1.0])? * fade_out)
        .scaled(ramp(f, [0.0, 25.0], [0.9, 1.0])?);

        let mut children = vec![stats_layer];
        if let Some(path) = screenshot {
            let progress = Spring::new(SCREENSHOT_SPRING)?
                .with_delay(SCREENSHOT_START)
                .evaluate(f, ctx.fps);
            let scale = interpolate(progress, &[0.0, 1.0], &[0.8, 1.0], Extrapolate::Extend, Extrapolate::Extend)?;
            let opacity = interpolate(progress, &[0.0, 0.3], &[0.0, 1.0], Extrapolate::Extend, Extrapolate::Clamp)?;
            children.push(
                Layer::group(
                    "screenshot",
                    vec![
                        Layer::new("screenshot-backdrop", Content::Solid { color: colors.bg_overlay }),
                        Layer::new("screenshot-image", Content::Image { path }).scaled(scale),
                    ],
                )
                .with_opacity(opacity),
            );
        }
        Ok(Layer::group("summary", children))
    }
}
