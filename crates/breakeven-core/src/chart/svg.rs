use std::fmt::Write;

use super::axis::nice_ticks;
use super::primitives::{AxisRange, ChartSpec, Color, LineStyle, Marker, MarkerShape, Point};
use crate::BreakevenResult;

/// Contract implemented by any chart backend.
///
/// Backends receive a fully built [`ChartSpec`], so drawing code stays
/// isolated from the financial model.
pub trait Renderer {
    fn render(&self, chart: &ChartSpec) -> BreakevenResult<String>;
}

/// Backend settings fixed when the renderer is created.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// CSS font-family list used for every text element
    pub font_family: String,
    pub pixels_per_inch: f64,
    /// Approximate number of tick intervals per axis
    pub tick_target: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_family: "DejaVu Sans, Hiragino Sans, Meiryo, Arial, sans-serif".to_string(),
            pixels_per_inch: 100.0,
            tick_target: 6,
        }
    }
}

/// Renders charts as standalone SVG documents.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    config: RenderConfig,
}

impl SvgRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Points (1/72 in) to pixels at the configured resolution.
    fn pt(&self, points: f64) -> f64 {
        points * self.config.pixels_per_inch / 72.0
    }
}

/// Y-axis margin around the data, as a fraction of its span.
const Y_MARGIN: f64 = 0.05;
const AXIS_FONT_PT: f64 = 8.0;
const LEGEND_FONT_PT: f64 = 8.0;
const GRID_COLOR: Color = Color::from_u32(0xb0b0b0);

/// Maps data coordinates into the pixel rectangle of the plot area.
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x: AxisRange,
    y: AxisRange,
}

impl PlotArea {
    fn sx(&self, x: f64) -> f64 {
        self.left + (x - self.x.min) / self.x.span() * self.width
    }

    fn sy(&self, y: f64) -> f64 {
        self.top + self.height - (y - self.y.min) / self.y.span() * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

enum LegendGlyph {
    Line {
        color: Color,
        style: LineStyle,
        alpha: f64,
    },
    Marker {
        shape: MarkerShape,
        color: Color,
    },
}

impl Renderer for SvgRenderer {
    fn render(&self, chart: &ChartSpec) -> BreakevenResult<String> {
        let width = chart.size.width_in * self.config.pixels_per_inch;
        let height = chart.size.height_in * self.config.pixels_per_inch;

        let x_range = if chart.x_range.span().abs() < f64::EPSILON {
            chart.x_range.padded(0.0)
        } else {
            chart.x_range
        };
        let y_range = chart
            .y_extent()
            .unwrap_or(AxisRange::new(0.0, 0.0))
            .padded(Y_MARGIN);

        let left = 70.0 + if chart.y_axis.label.is_some() { 20.0 } else { 0.0 };
        let top = 15.0 + if chart.title.is_some() { 30.0 } else { 0.0 };
        let bottom = 35.0 + if chart.x_axis.label.is_some() { 20.0 } else { 0.0 };
        let area = PlotArea {
            left,
            top,
            width: (width - left - 20.0).max(1.0),
            height: (height - top - bottom).max(1.0),
            x: x_range,
            y: y_range,
        };

        let mut svg = String::new();
        writeln!(
            svg,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}" font-family="{}">"##,
            width,
            height,
            width,
            height,
            xml_escape(&self.config.font_family)
        )?;
        writeln!(svg, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
        writeln!(
            svg,
            r##"<defs><clipPath id="plot-area"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath></defs>"##,
            area.left, area.top, area.width, area.height
        )?;

        let x_ticks = nice_ticks(area.x.min, area.x.max, self.config.tick_target);
        let y_ticks = nice_ticks(area.y.min, area.y.max, self.config.tick_target);

        if let Some(grid) = &chart.grid {
            self.write_grid(&mut svg, &area, &x_ticks, &y_ticks, grid.style, grid.alpha)?;
        }

        writeln!(svg, r#"<g clip-path="url(#plot-area)">"#)?;
        for fill in &chart.fills {
            for region in fill.regions.iter().filter(|r| !r.is_empty()) {
                writeln!(
                    svg,
                    r#"<polygon points="{}" fill="{}" fill-opacity="{}" stroke="none"/>"#,
                    points_attr(&area, region),
                    fill.color.to_hex(),
                    fill.alpha
                )?;
            }
        }
        for rule in &chart.rules {
            let y = area.sy(rule.y);
            writeln!(
                svg,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"{}/>"#,
                area.left,
                y,
                area.right(),
                y,
                rule.color.to_hex(),
                self.pt(rule.width),
                dash_attr(rule.style)
            )?;
        }
        for line in &chart.lines {
            writeln!(
                svg,
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{:.2}" stroke-opacity="{}"{}/>"#,
                points_attr(&area, &line.points),
                line.color.to_hex(),
                self.pt(line.width),
                line.alpha,
                dash_attr(line.style)
            )?;
        }
        let mut markers: Vec<&Marker> = chart.markers.iter().collect();
        markers.sort_by_key(|m| m.z_order);
        for marker in markers {
            let center = Point::new(area.sx(marker.position.x), area.sy(marker.position.y));
            self.write_marker(
                &mut svg,
                center,
                marker.shape,
                marker.size,
                marker.color,
                marker.edge_color,
            )?;
        }
        writeln!(svg, "</g>")?;

        for note in &chart.annotations {
            writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" fill="{}"{}>{}</text>"#,
                area.sx(note.anchor.x) + note.offset_px.0,
                area.sy(note.anchor.y) - note.offset_px.1,
                self.pt(note.font_size),
                note.color.to_hex(),
                if note.bold { r#" font-weight="bold""# } else { "" },
                xml_escape(&note.text)
            )?;
        }

        self.write_axes(&mut svg, chart, &area, &x_ticks, &y_ticks, width)?;

        if chart.legend.is_some() {
            self.write_legend(&mut svg, chart, &area)?;
        }

        writeln!(svg, "</svg>")?;
        Ok(svg)
    }
}

impl SvgRenderer {
    fn write_grid(
        &self,
        svg: &mut String,
        area: &PlotArea,
        x_ticks: &[f64],
        y_ticks: &[f64],
        style: LineStyle,
        alpha: f64,
    ) -> std::fmt::Result {
        let stroke = GRID_COLOR.to_hex();
        for &x in x_ticks {
            let px = area.sx(x);
            writeln!(
                svg,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="0.8" stroke-opacity="{}"{}/>"#,
                px,
                area.top,
                px,
                area.bottom(),
                stroke,
                alpha,
                dash_attr(style)
            )?;
        }
        for &y in y_ticks {
            let py = area.sy(y);
            writeln!(
                svg,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="0.8" stroke-opacity="{}"{}/>"#,
                area.left,
                py,
                area.right(),
                py,
                stroke,
                alpha,
                dash_attr(style)
            )?;
        }
        Ok(())
    }

    fn write_marker(
        &self,
        svg: &mut String,
        center: Point,
        shape: MarkerShape,
        size: f64,
        color: Color,
        edge: Option<Color>,
    ) -> std::fmt::Result {
        let radius = self.pt(size) / 2.0;
        let edge_attr = edge
            .map(|c| format!(r#" stroke="{}" stroke-width="1""#, c.to_hex()))
            .unwrap_or_default();
        match shape {
            MarkerShape::Circle => writeln!(
                svg,
                r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"{}/>"#,
                center.x,
                center.y,
                radius,
                color.to_hex(),
                edge_attr
            ),
            MarkerShape::Star => writeln!(
                svg,
                r#"<polygon points="{}" fill="{}"{}/>"#,
                star_points(center, radius),
                color.to_hex(),
                edge_attr
            ),
        }
    }

    fn write_axes(
        &self,
        svg: &mut String,
        chart: &ChartSpec,
        area: &PlotArea,
        x_ticks: &[f64],
        y_ticks: &[f64],
        width: f64,
    ) -> std::fmt::Result {
        let font = self.pt(AXIS_FONT_PT);
        writeln!(
            svg,
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="#000000" stroke-width="0.8"/>"##,
            area.left, area.top, area.width, area.height
        )?;
        for &x in x_ticks {
            writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" text-anchor="middle">{}</text>"#,
                area.sx(x),
                area.bottom() + font + 6.0,
                font,
                xml_escape(&chart.x_axis.tick_format.format(x))
            )?;
        }
        for &y in y_ticks {
            writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" text-anchor="end" dominant-baseline="middle">{}</text>"#,
                area.left - 6.0,
                area.sy(y),
                font,
                xml_escape(&chart.y_axis.tick_format.format(y))
            )?;
        }
        if let Some(label) = &chart.x_axis.label {
            writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" text-anchor="middle">{}</text>"#,
                area.left + area.width / 2.0,
                area.bottom() + 2.0 * font + 16.0,
                self.pt(10.0),
                xml_escape(label)
            )?;
        }
        if let Some(label) = &chart.y_axis.label {
            let cx = 18.0;
            let cy = area.top + area.height / 2.0;
            writeln!(
                svg,
                r#"<text x="{cx:.2}" y="{cy:.2}" font-size="{:.1}" text-anchor="middle" transform="rotate(-90 {cx:.2} {cy:.2})">{}</text>"#,
                self.pt(10.0),
                xml_escape(label)
            )?;
        }
        if let Some(title) = &chart.title {
            writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" text-anchor="middle">{}</text>"#,
                width / 2.0,
                area.top - 14.0,
                self.pt(14.0),
                xml_escape(title)
            )?;
        }
        Ok(())
    }

    fn write_legend(
        &self,
        svg: &mut String,
        chart: &ChartSpec,
        area: &PlotArea,
    ) -> std::fmt::Result {
        let entries: Vec<(&str, LegendGlyph)> = chart
            .lines
            .iter()
            .filter_map(|l| {
                l.label.as_deref().map(|label| {
                    (
                        label,
                        LegendGlyph::Line {
                            color: l.color,
                            style: l.style,
                            alpha: l.alpha,
                        },
                    )
                })
            })
            .chain(chart.markers.iter().filter_map(|m| {
                m.label.as_deref().map(|label| {
                    (
                        label,
                        LegendGlyph::Marker {
                            shape: m.shape,
                            color: m.color,
                        },
                    )
                })
            }))
            .collect();
        if entries.is_empty() {
            return Ok(());
        }

        let columns = chart.legend.map(|l| l.columns.max(1)).unwrap_or(1);
        let rows = entries.len().div_ceil(columns);
        let font = self.pt(LEGEND_FONT_PT);
        let row_height = font + 6.0;
        let longest = entries.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        let column_width = 34.0 + longest as f64 * font * 0.6;
        let x0 = area.left + 8.0;
        let y0 = area.top + 8.0;

        writeln!(
            svg,
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="#ffffff" fill-opacity="0.8" stroke="#cccccc" stroke-width="0.8" rx="3"/>"##,
            x0,
            y0,
            column_width * columns as f64 + 8.0,
            row_height * rows as f64 + 8.0
        )?;

        for (i, (label, glyph)) in entries.iter().enumerate() {
            let col = i / rows;
            let row = i % rows;
            let gx = x0 + 6.0 + col as f64 * column_width;
            let gy = y0 + 4.0 + row_height * (row as f64 + 0.5);
            match glyph {
                LegendGlyph::Line {
                    color,
                    style,
                    alpha,
                } => writeln!(
                    svg,
                    r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="2" stroke-opacity="{}"{}/>"#,
                    gx,
                    gy,
                    gx + 20.0,
                    gy,
                    color.to_hex(),
                    alpha,
                    dash_attr(*style)
                )?,
                LegendGlyph::Marker { shape, color } => {
                    self.write_marker(svg, Point::new(gx + 10.0, gy), *shape, 6.0, *color, None)?
                }
            }
            writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" dominant-baseline="middle">{}</text>"#,
                gx + 26.0,
                gy,
                font,
                xml_escape(label)
            )?;
        }
        Ok(())
    }
}

fn points_attr(area: &PlotArea, points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", area.sx(p.x), area.sy(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn dash_attr(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Solid => "",
        LineStyle::Dashed => r#" stroke-dasharray="6,4""#,
        LineStyle::Dotted => r#" stroke-dasharray="1,3""#,
    }
}

/// Five-pointed star centred on `center`, first point straight up.
fn star_points(center: Point, radius: f64) -> String {
    let inner = radius * 0.382;
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { radius } else { inner };
            let angle = std::f64::consts::PI * (i as f64 / 5.0 - 0.5);
            format!(
                "{:.2},{:.2}",
                center.x + r * angle.cos(),
                center.y + r * angle.sin()
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{build_breakeven_chart, build_comparison_chart};
    use crate::portfolio::Portfolio;
    use crate::record::FinancialRecord;
    use rust_decimal_macros::dec;

    fn render(chart: &ChartSpec) -> String {
        SvgRenderer::default().render(chart).unwrap()
    }

    #[test]
    fn test_breakeven_svg_structure() {
        let record = FinancialRecord::new("Acme", dec!(0.6), 1000, 2000).unwrap();
        let svg = render(&build_breakeven_chart(&record));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 3);
        // one circle marker, one star marker + legend star glyph
        assert!(svg.contains("<circle"));
        assert!(svg.contains(r#"width="500""#));
        assert!(svg.contains(">Break-even</text>"));
    }

    #[test]
    fn test_tick_labels_use_thousands_separators() {
        let record = FinancialRecord::new("Acme", dec!(0.6), 1000, 2000).unwrap();
        let svg = render(&build_breakeven_chart(&record));
        assert!(svg.contains(">2,000</text>"), "missing 2,000 tick: {svg}");
    }

    #[test]
    fn test_empty_comparison_renders() {
        let svg = render(&build_comparison_chart(&Portfolio::default()));
        assert_eq!(svg.matches("<polyline").count(), 0);
        assert!(svg.contains("Profit Structure Comparison"));
    }

    #[test]
    fn test_text_is_escaped() {
        let p = Portfolio::new(vec![
            FinancialRecord::new("A&B <Ltd>", dec!(0.5), 100, 1000).unwrap()
        ]);
        let svg = render(&build_comparison_chart(&p));
        assert!(svg.contains("A&amp;B &lt;Ltd&gt;"));
        assert!(!svg.contains("A&B"));
    }

    #[test]
    fn test_degenerate_domain_still_renders() {
        let record = FinancialRecord::new("Idle", dec!(0.5), 0, 0).unwrap();
        let svg = render(&build_breakeven_chart(&record));
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
    }

    #[test]
    fn test_star_points_count() {
        let pts = star_points(Point::new(0.0, 0.0), 10.0);
        assert_eq!(pts.split(' ').count(), 10);
        assert!(pts.starts_with("0.00,-10.00"));
    }
}
