//! Reelkit Core - Foundation types for frame-accurate composition
//!
//! This crate provides the pure, stateless building blocks every scene uses:
//! - Frame clock types (FrameRate, FrameRange)
//! - Piecewise-linear curves with easing and boundary policies
//! - Closed-form spring evaluation
//! - Seeded decoration grids
//! - Hex color helpers

pub mod color;
pub mod curve;
pub mod error;
pub mod grid;
pub mod spring;
pub mod time;

pub use color::{BlockPalette, Color};
pub use curve::{interpolate, CubicBezier, Curve, EasingCurve, Extrapolate};
pub use error::{ReelError, Result};
pub use grid::{seeded_random, Corner, DecorationGrid, GridCell, GridSpec, TileCategory};
pub use spring::{Spring, SpringConfig};
pub use time::{FrameRange, FrameRate};
