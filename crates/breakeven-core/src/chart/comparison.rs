use super::axis::linspace;
use super::palette::color_at;
use super::primitives::{
    Annotation, Axis, AxisRange, ChartSpec, Color, FigureSize, Grid, HorizontalRule, Legend,
    LegendPosition, LineSeries, LineStyle, Marker, MarkerShape, Point,
};
use super::SAMPLE_COUNT;
use crate::portfolio::Portfolio;
use crate::types::to_plot_f64;

/// Headroom beyond the largest sales figure in the portfolio.
pub const COMPARISON_HEADROOM: f64 = 1.1;

/// Stand-in for the largest sales figure when the portfolio is empty.
pub const FALLBACK_MAX_SALES: f64 = 1000.0;

/// Pixel offset of each company label from its marker.
pub const LABEL_OFFSET_PX: (f64, f64) = (5.0, 5.0);

/// Profit/volume chart comparing every company on one set of axes.
///
/// Series are emitted in portfolio order and coloured by position, so the
/// palette wraps after twenty companies.
pub fn build_comparison_chart(portfolio: &Portfolio) -> ChartSpec {
    log::debug!(
        "building comparison chart for {} companies",
        portfolio.len()
    );

    let max_sales = portfolio
        .max_sales()
        .map(|s| s as f64)
        .unwrap_or(FALLBACK_MAX_SALES);
    let limit_x = max_sales * COMPARISON_HEADROOM;
    let xs = linspace(0.0, limit_x, SAMPLE_COUNT);

    let mut chart = ChartSpec::new(
        FigureSize {
            width_in: 10.0,
            height_in: 5.0,
        },
        AxisRange::new(0.0, limit_x),
    );
    chart.title = Some("Profit Structure Comparison (PV Chart)".to_string());
    chart.x_axis = Axis::thousands().labelled("Sales (Volume)");
    chart.y_axis = Axis::thousands().labelled("Profit");
    chart.grid = Some(Grid {
        style: LineStyle::Dotted,
        alpha: 0.7,
    });
    chart.legend = Some(Legend {
        position: LegendPosition::UpperLeft,
        columns: 2,
    });
    chart.rules.push(HorizontalRule {
        y: 0.0,
        color: Color::BLACK,
        width: 1.5,
        style: LineStyle::Solid,
    });

    for (i, record) in portfolio.iter().enumerate() {
        let color = color_at(i);
        let mpr = to_plot_f64(record.marginal_profit_ratio());
        let fixed = record.fixed_cost() as f64;
        let position = Point::new(record.sales() as f64, record.profit() as f64);

        chart.lines.push(
            LineSeries::sampled(&xs, color, |x| mpr * x - fixed)
                .labelled(record.name())
                .width(2.0),
        );
        chart.markers.push(Marker {
            label: None,
            position,
            shape: MarkerShape::Circle,
            size: 8.0,
            color,
            edge_color: Some(Color::WHITE),
            z_order: 5,
        });
        chart.annotations.push(Annotation {
            text: record.name().to_string(),
            anchor: position,
            offset_px: LABEL_OFFSET_PX,
            color,
            font_size: 9.0,
            bold: true,
        });
    }

    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FinancialRecord;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_portfolio_uses_fallback_domain() {
        let chart = build_comparison_chart(&Portfolio::default());
        assert_relative_eq!(chart.x_range.max, 1100.0);
        assert_eq!(chart.x_range.min, 0.0);
        assert!(chart.lines.is_empty());
        assert!(chart.markers.is_empty());
        assert_eq!(chart.rules.len(), 1);
        assert_eq!(chart.rules[0].y, 0.0);
    }

    #[test]
    fn test_marker_uses_truncated_profit() {
        // profit = 1001 - (1000 + 500.5) = -499.5 -> -499
        let p = Portfolio::new(vec![
            FinancialRecord::new("Acme", dec!(0.5), 1000, 1001).unwrap()
        ]);
        let chart = build_comparison_chart(&p);
        assert_eq!(chart.markers[0].position, Point::new(1001.0, -499.0));
        assert_eq!(chart.annotations[0].anchor, chart.markers[0].position);
        assert_eq!(chart.annotations[0].offset_px, LABEL_OFFSET_PX);
    }

    #[test]
    fn test_profit_line_intercept_and_slope() {
        let p = Portfolio::new(vec![
            FinancialRecord::new("Acme", dec!(0.6), 1000, 2000).unwrap()
        ]);
        let chart = build_comparison_chart(&p);
        let line = &chart.lines[0];
        assert_eq!(line.label.as_deref(), Some("Acme"));
        assert_relative_eq!(line.points[0].y, -1000.0);
        let last = line.points.last().unwrap();
        assert_relative_eq!(last.x, 2200.0);
        assert_relative_eq!(last.y, 0.4 * 2200.0 - 1000.0, epsilon = 1e-9);
    }
}
