//! Seeded decoration grid.
//!
//! The grid is regenerated from its spec on every call. All randomness comes
//! from [`seeded_random`], a fixed arithmetic transform, so two runs with the
//! same spec produce bit-identical cells.

use serde::{Deserialize, Serialize};

use crate::error::{ReelError, Result};

/// Deterministic pseudo-random value in [0, 1) for a seed.
#[inline]
pub fn seeded_random(seed: f64) -> f64 {
    let x = (seed * 9301.0 + 49297.0).sin() * 49297.0;
    x - x.floor()
}

/// Corner the grid ripples out from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    #[default]
    TopRight,
    TopLeft,
}

/// Which palette a cell is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileCategory {
    Primary,
    Secondary,
}

/// Grid dimensions and generation thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    pub corner: Corner,
    /// Share of visible cells drawn with the primary palette.
    pub primary_ratio: f64,
    /// Cells whose inclusion roll does not exceed this are left empty.
    pub inclusion_threshold: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rows: 7,
            cols: 9,
            corner: Corner::TopRight,
            primary_ratio: 0.55,
            inclusion_threshold: 0.25,
        }
    }
}

impl GridSpec {
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ReelError::InvalidParameter(format!(
                "grid must have at least one row and column, got {}x{}",
                self.cols, self.rows
            )));
        }
        for (name, value) in [
            ("primary_ratio", self.primary_ratio),
            ("inclusion_threshold", self.inclusion_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ReelError::InvalidParameter(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Generate the visible cells.
    pub fn generate(&self) -> Result<DecorationGrid> {
        self.validate()?;

        let mut cells = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let seed = (row * self.cols + col) as f64;
                if seeded_random(seed * 7.0) <= self.inclusion_threshold {
                    continue;
                }

                let dx = match self.corner {
                    Corner::TopRight => (self.cols - 1 - col) as f64,
                    Corner::TopLeft => col as f64,
                };
                let dist_from_corner = (dx * dx + (row as f64).powi(2)).sqrt();
                let category = if seeded_random(seed * 3.0) > 1.0 - self.primary_ratio {
                    TileCategory::Primary
                } else {
                    TileCategory::Secondary
                };

                cells.push(GridCell {
                    row,
                    col,
                    category,
                    phase: dist_from_corner + seeded_random(seed * 11.0) * 2.0,
                    speed: 0.03 + seeded_random(seed * 13.0) * 0.02,
                });
            }
        }

        Ok(DecorationGrid { spec: *self, cells })
    }
}

/// A visible grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub category: TileCategory,
    pub phase: f64,
    pub speed: f64,
}

impl GridCell {
    /// Ripple value in [0, 1] at a frame.
    #[inline]
    pub fn wave(&self, frame: f64) -> f64 {
        ((frame * self.speed + self.phase).sin() + 1.0) / 2.0
    }

    /// Block scale, between 0.7 and 1.05.
    pub fn scale(&self, frame: f64) -> f64 {
        0.7 + self.wave(frame) * 0.35
    }

    /// Block opacity, between half and all of `base`.
    pub fn opacity(&self, frame: f64, base: f64) -> f64 {
        base * (0.5 + self.wave(frame) * 0.5)
    }
}

/// The generated set of visible cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationGrid {
    pub spec: GridSpec,
    pub cells: Vec<GridCell>,
}

impl DecorationGrid {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells drawn with the primary palette.
    pub fn primary_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.category == TileCategory::Primary)
            .count()
    }
}
