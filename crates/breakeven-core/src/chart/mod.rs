//! Declarative chart descriptions and an SVG backend to draw them.
//!
//! Builders never touch a drawing surface: they return a [`ChartSpec`] that
//! any [`Renderer`] can turn into an image.

pub mod axis;
pub mod breakeven;
pub mod comparison;
pub mod palette;
pub mod primitives;
pub mod svg;

pub use breakeven::build_breakeven_chart;
pub use comparison::build_comparison_chart;
pub use primitives::*;
pub use svg::{RenderConfig, Renderer, SvgRenderer};

/// Samples taken across the x domain of every chart.
pub const SAMPLE_COUNT: usize = 100;
