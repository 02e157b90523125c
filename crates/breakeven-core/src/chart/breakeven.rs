use super::axis::linspace;
use super::primitives::{
    AxisRange, ChartSpec, Color, FigureSize, FillBand, FillKind, Grid, Legend, LegendPosition,
    LineSeries, LineStyle, Marker, MarkerShape, Point,
};
use super::SAMPLE_COUNT;
use crate::record::FinancialRecord;
use crate::types::to_plot_f64;

/// Headroom beyond the larger of sales and break-even point.
pub const BREAKEVEN_HEADROOM: f64 = 1.2;

const SALES_COLOR: Color = Color::from_u32(0x1f77b4);
const TOTAL_COST_COLOR: Color = Color::from_u32(0xff7f0e);
const FILL_ALPHA: f64 = 0.1;

/// Break-even chart for one company: sales, total cost and fixed cost lines
/// with the profit and loss zones shaded between sales and total cost.
pub fn build_breakeven_chart(record: &FinancialRecord) -> ChartSpec {
    let sales = record.sales() as f64;
    let fixed = record.fixed_cost() as f64;
    let vcr = to_plot_f64(record.variable_cost_ratio());
    let bep = to_plot_f64(record.break_even_point());

    log::debug!("building break-even chart for {}", record.name());

    let max_x = (sales * BREAKEVEN_HEADROOM).max(bep * BREAKEVEN_HEADROOM);
    let xs = linspace(0.0, max_x, SAMPLE_COUNT);

    let sales_line = LineSeries::sampled(&xs, SALES_COLOR, |x| x).labelled("Sales");
    let total_cost_line =
        LineSeries::sampled(&xs, TOTAL_COST_COLOR, |x| fixed + vcr * x).labelled("Total cost");
    let fixed_cost_line = LineSeries::sampled(&xs, Color::GRAY, |_| fixed)
        .labelled("Fixed cost")
        .style(LineStyle::Dashed)
        .alpha(0.5);

    let revenue: Vec<f64> = sales_line.points.iter().map(|p| p.y).collect();
    let cost: Vec<f64> = total_cost_line.points.iter().map(|p| p.y).collect();

    let profit_zone = FillBand {
        kind: FillKind::Profit,
        color: Color::BLUE,
        alpha: FILL_ALPHA,
        regions: fill_between(&xs, &revenue, &cost, |s, c| s > c),
    };
    let loss_zone = FillBand {
        kind: FillKind::Loss,
        color: Color::RED,
        alpha: FILL_ALPHA,
        regions: fill_between(&xs, &revenue, &cost, |s, c| s < c),
    };

    let mut chart = ChartSpec::new(
        FigureSize {
            width_in: 5.0,
            height_in: 4.0,
        },
        AxisRange::new(0.0, max_x),
    );
    chart.grid = Some(Grid {
        style: LineStyle::Dotted,
        alpha: 0.6,
    });
    chart.legend = Some(Legend {
        position: LegendPosition::UpperLeft,
        columns: 1,
    });
    chart.lines = vec![sales_line, total_cost_line, fixed_cost_line];
    chart.fills = vec![profit_zone, loss_zone];
    chart.markers = vec![
        Marker {
            label: Some("Current".to_string()),
            position: Point::new(sales, sales),
            shape: MarkerShape::Circle,
            size: 8.0,
            color: Color::BLACK,
            edge_color: None,
            z_order: 5,
        },
        Marker {
            label: Some("Break-even".to_string()),
            position: Point::new(bep, bep),
            shape: MarkerShape::Star,
            size: 12.0,
            color: Color::RED,
            edge_color: None,
            z_order: 5,
        },
    ];
    chart
}

/// Polygons covering the samples where `keep(upper[i], lower[i])` holds.
///
/// Each maximal run of kept samples becomes one polygon: along `upper`
/// left to right, then back along `lower`. No interpolation happens between
/// a kept sample and its neighbours.
pub fn fill_between(
    xs: &[f64],
    upper: &[f64],
    lower: &[f64],
    keep: impl Fn(f64, f64) -> bool,
) -> Vec<Vec<Point>> {
    let n = xs.len().min(upper.len()).min(lower.len());
    let mut regions = Vec::new();
    let mut run_start: Option<usize> = None;

    for i in 0..=n {
        let kept = i < n && keep(upper[i], lower[i]);
        match (run_start, kept) {
            (None, true) => run_start = Some(i),
            (Some(start), false) => {
                let mut polygon: Vec<Point> =
                    (start..i).map(|j| Point::new(xs[j], upper[j])).collect();
                polygon.extend((start..i).rev().map(|j| Point::new(xs[j], lower[j])));
                regions.push(polygon);
                run_start = None;
            }
            _ => {}
        }
    }
    regions
}
