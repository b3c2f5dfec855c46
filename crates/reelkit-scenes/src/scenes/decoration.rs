//! Rippling block grid tucked into a top corner.

use reelkit_core::{BlockPalette, Color, Corner, DecorationGrid, GridSpec, Result, TileCategory};
use reelkit_timeline::MazeDecorationConfig;

use crate::render::{Render, RenderContext};
use crate::visual::{Content, Layer, Rect};

const CELL: f32 = 72.0;
const GAP: f32 = 8.0;
const MARGIN: f32 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MazeDecoration {
    pub grid: DecorationGrid,
    pub opacity: f64,
    pub scale: f32,
    pub primary: BlockPalette,
    pub secondary: BlockPalette,
}

impl MazeDecoration {
    /// Generate the grid once; configured colors override the theme's
    /// primary and dark background.
    pub fn from_config(config: &MazeDecorationConfig, primary: Color, secondary: Color) -> Result<Self> {
        let grid = GridSpec {
            corner: config.corner,
            ..GridSpec::default()
        }
        .generate()?;
        let pick = |hex: &Option<String>, fallback: Color| -> Result<Color> {
            hex.as_deref().map_or(Ok(fallback), Color::from_hex)
        };
        Ok(Self {
            grid,
            opacity: config.opacity,
            scale: config.scale as f32,
            primary: BlockPalette::derive(pick(&config.primary_color, primary)?),
            secondary: BlockPalette::derive(pick(&config.secondary_color, secondary)?),
        })
    }

    fn pitch(&self) -> f32 {
        (CELL + GAP) * self.scale
    }
}

impl Render for MazeDecoration {
    fn render(&self, local_frame: i64, ctx: &RenderContext<'_>) -> Result<Layer> {
        let f = local_frame as f64;
        let spec = self.grid.spec;
        let cell = CELL * self.scale;
        let pitch = self.pitch();

        let blocks = self
            .grid
            .cells
            .iter()
            .map(|c| {
                let palette = match c.category {
                    TileCategory::Primary => self.primary,
                    TileCategory::Secondary => self.secondary,
                };
                Layer::new(
                    format!("block-{}-{}", c.row, c.col),
                    Content::Block { palette, size: cell },
                )
                .with_bounds(Rect::new(
                    c.col as f32 * pitch + MARGIN,
                    c.row as f32 * pitch + MARGIN,
                    cell,
                    cell,
                ))
                .scaled(c.scale(f))
                .with_opacity(c.opacity(f, self.opacity))
            })
            .collect();

        let width = spec.cols as f32 * pitch + 100.0;
        let height = spec.rows as f32 * pitch + 100.0;
        let (x, tilt) = match spec.corner {
            Corner::TopRight => (ctx.width as f32 - 80.0 - width, -25.0),
            Corner::TopLeft => (80.0, 25.0),
        };
        Ok(Layer::group("maze", blocks)
            .with_bounds(Rect::new(x, -30.0, width, height))
            .rotated(tilt))
    }
}
