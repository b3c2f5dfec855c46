//! Sprint overview with staggered bullet items.

use reelkit_core::Result;
use reelkit_timeline::Overview;

use super::ramp;
use crate::render::{Render, RenderContext};
use crate::visual::{Content, Layer, TextRole};

/// First item starts at 2 s.
const FIRST_ITEM: f64 = 60.0;
/// Gap between item starts.
const ITEM_STAGGER: f64 = 75.0;
const ITEM_FADE: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewSlide {
    pub overview: Overview,
}

impl OverviewSlide {
    pub fn new(overview: Overview) -> Self {
        Self { overview }
    }

    /// Frame window over which item `index` slides in.
    pub fn item_window(index: usize) -> [f64; 2] {
        let start = FIRST_ITEM + index as f64 * ITEM_STAGGER;
        [start, start + ITEM_FADE]
    }
}

impl Render for OverviewSlide {
    fn render(&self, local_frame: i64, ctx: &RenderContext<'_>) -> Result<Layer> {
        let f = local_frame as f64;
        let colors = &ctx.theme.colors;

        let mut children = vec![
            Layer::text("header", "SPRINT OVERVIEW", TextRole::Label, colors.primary),
            Layer::text("overview-title", &self.overview.title, TextRole::Heading, colors.text_dark),
        ];
        for (i, item) in self.overview.items.iter().enumerate() {
            let window = Self::item_window(i);
            let row = Layer::group(
                format!("item-{i}"),
                vec![
                    Layer::new("bullet", Content::Solid { color: colors.primary }),
                    Layer::text("text", &item.text, TextRole::Body, colors.text_medium),
                    Layer::text("highlight", &item.highlight, TextRole::Body, colors.primary),
                ],
            )
            .with_opacity(ramp(f, window, [0.0, 1.0])?)
            .translated(ramp(f, window, [-30.0, 0.0])?, 0.0);
            children.push(row);
        }

        Ok(Layer::group("overview", children).with_opacity(ramp(f, [0.0, 30.0], [0.0, 1.0])?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::testing::{ctx, opacity_of};
    use crate::theme::Theme;
    use reelkit_timeline::{OverviewItem, StaticManifest};

    fn slide() -> OverviewSlide {
        let item = |text: &str, highlight: &str| OverviewItem {
            text: text.into(),
            highlight: highlight.into(),
        };
        OverviewSlide::new(Overview {
            title: "What we shipped".into(),
            items: vec![item("Faster sync ", "2x"), item("Offline mode ", "beta")],
        })
    }

    #[test]
    fn test_item_windows() {
        assert_eq!(OverviewSlide::item_window(0), [60.0, 90.0]);
        assert_eq!(OverviewSlide::item_window(2), [210.0, 240.0]);
    }

    #[test]
    fn test_second_item_slides_in() {
        let theme = Theme::default();
        let assets = StaticManifest::new();
        let layer = slide().render(150, &ctx(&theme, &assets)).unwrap();
        assert_eq!(layer.opacity, 1.0);
        assert_eq!(opacity_of(&layer, "item-0"), 1.0);
        assert!((opacity_of(&layer, "item-1") - 0.5).abs() < 1e-6);
        let second = layer.find("item-1").unwrap();
        assert!((second.transform.translate.x + 15.0).abs() < 1e-4);
    }
}
