use serde::{Deserialize, Serialize};

use crate::format::format_thousands;

/// Opaque RGB colour; transparency lives on the element using it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_u32(packed: u32) -> Self {
        Self::rgb(
            ((packed >> 16) & 0xff) as u8,
            ((packed >> 8) & 0xff) as u8,
            (packed & 0xff) as u8,
        )
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// A point in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub points: Vec<Point>,
    pub color: Color,
    pub width: f64,
    pub style: LineStyle,
    pub alpha: f64,
}

impl LineSeries {
    /// Solid, opaque line of width 1.5 sampled from `xs` through `f`.
    pub fn sampled(xs: &[f64], color: Color, f: impl Fn(f64) -> f64) -> Self {
        Self {
            label: None,
            points: xs.iter().map(|&x| Point::new(x, f(x))).collect(),
            color,
            width: 1.5,
            style: LineStyle::Solid,
            alpha: 1.0,
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillKind {
    /// Sales above total cost
    Profit,
    /// Sales below total cost
    Loss,
}

/// Shaded area between two curves, one polygon per contiguous run of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillBand {
    pub kind: FillKind,
    pub color: Color,
    pub alpha: f64,
    pub regions: Vec<Vec<Point>>,
}

/// Horizontal line spanning the whole x range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalRule {
    pub y: f64,
    pub color: Color,
    pub width: f64,
    pub style: LineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerShape {
    Circle,
    Star,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub position: Point,
    pub shape: MarkerShape,
    /// Marker size in points
    pub size: f64,
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_color: Option<Color>,
    pub z_order: i32,
}

/// Text anchored at a data point and shifted by a fixed pixel offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub anchor: Point,
    /// Offset in pixels; positive `dy` moves the text up
    pub offset_px: (f64, f64),
    pub color: Color,
    pub font_size: f64,
    pub bold: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickFormat {
    /// Integer part with `,` thousands separators
    Thousands,
}

impl TickFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            TickFormat::Thousands => format_thousands(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub tick_format: TickFormat,
}

impl Axis {
    pub fn thousands() -> Self {
        Self {
            label: None,
            tick_format: TickFormat::Thousands,
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub style: LineStyle,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendPosition {
    UpperLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub position: LegendPosition,
    pub columns: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
}

/// Closed interval on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Grow the range by `fraction` of its span on both sides; widen a
    /// zero-width range by one unit each way.
    pub fn padded(&self, fraction: f64) -> Self {
        let span = self.span();
        if span.abs() < f64::EPSILON {
            return Self::new(self.min - 1.0, self.max + 1.0);
        }
        Self::new(self.min - span * fraction, self.max + span * fraction)
    }

    fn include(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }
}

/// Backend-agnostic description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub size: FigureSize,
    pub x_range: AxisRange,
    pub x_axis: Axis,
    pub y_axis: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    pub lines: Vec<LineSeries>,
    pub fills: Vec<FillBand>,
    pub rules: Vec<HorizontalRule>,
    pub markers: Vec<Marker>,
    pub annotations: Vec<Annotation>,
}

impl ChartSpec {
    pub fn new(size: FigureSize, x_range: AxisRange) -> Self {
        Self {
            title: None,
            size,
            x_range,
            x_axis: Axis::thousands(),
            y_axis: Axis::thousands(),
            grid: None,
            legend: None,
            lines: Vec::new(),
            fills: Vec::new(),
            rules: Vec::new(),
            markers: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Data extent on the y axis across lines, fills, rules and markers.
    ///
    /// Annotations do not contribute. `None` when nothing is plotted.
    pub fn y_extent(&self) -> Option<AxisRange> {
        let ys = self
            .lines
            .iter()
            .flat_map(|l| l.points.iter().map(|p| p.y))
            .chain(
                self.fills
                    .iter()
                    .flat_map(|f| f.regions.iter().flatten().map(|p| p.y)),
            )
            .chain(self.rules.iter().map(|r| r.y))
            .chain(self.markers.iter().map(|m| m.position.y));

        ys.filter(|y| y.is_finite()).fold(None, |extent, y| {
            Some(match extent {
                Some(mut range) => {
                    range.include(y);
                    range
                }
                None => AxisRange::new(y, y),
            })
        })
    }
}
