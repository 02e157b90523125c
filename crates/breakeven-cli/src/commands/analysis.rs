use clap::Args;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use breakeven_core::chart::{
    build_breakeven_chart, build_comparison_chart, ChartSpec, Renderer, SvgRenderer,
};
use breakeven_core::summary::{summarize_portfolio, NO_DATA_WARNING};
use breakeven_core::with_metadata;

use crate::input;

/// Arguments for the portfolio summary
#[derive(Args)]
pub struct SummaryArgs {
    /// Path to CSV input file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a single company's break-even chart
#[derive(Args)]
pub struct ChartArgs {
    /// Path to CSV input file
    #[arg(long)]
    pub input: Option<String>,
    /// Company name as it appears in the input
    #[arg(long)]
    pub company: String,
    /// Write the chart as SVG to this path instead of printing its description
    #[arg(long)]
    pub svg: Option<String>,
}

/// Arguments for the comparison chart
#[derive(Args)]
pub struct CompareArgs {
    /// Path to CSV input file
    #[arg(long)]
    pub input: Option<String>,
    /// Write the chart as SVG to this path instead of printing its description
    #[arg(long)]
    pub svg: Option<String>,
}

/// Arguments for the full report
#[derive(Args)]
pub struct ReportArgs {
    /// Path to CSV input file
    #[arg(long)]
    pub input: Option<String>,
    /// Directory receiving the SVG files
    #[arg(long)]
    pub out_dir: String,
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let portfolio = input::load_portfolio(args.input.as_deref())?;
    let result = summarize_portfolio(&portfolio);
    Ok(serde_json::to_value(result)?)
}

pub fn run_chart(args: ChartArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let portfolio = input::load_portfolio(args.input.as_deref())?;
    if portfolio.is_empty() {
        return Err(NO_DATA_WARNING.into());
    }
    let record = portfolio
        .find(&args.company)
        .ok_or_else(|| format!("Company '{}' not found in input", args.company))?;

    let chart = build_breakeven_chart(record);
    let result = chart_result(&chart, args.svg.as_deref())?;

    let output = with_metadata(
        "Break-even Chart (sales, total cost and fixed cost lines)",
        &json!({
            "company": record.name(),
            "fixed_cost": record.fixed_cost(),
            "sales": record.sales(),
            "variable_cost_ratio": record.variable_cost_ratio().to_string(),
        }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let portfolio = input::load_portfolio(args.input.as_deref())?;
    let mut warnings = Vec::new();
    if portfolio.is_empty() {
        warnings.push(NO_DATA_WARNING.to_string());
    }

    let chart = build_comparison_chart(&portfolio);
    let result = chart_result(&chart, args.svg.as_deref())?;

    let output = with_metadata(
        "Profit/Volume Comparison Chart",
        &json!({ "companies": portfolio.len() }),
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_report(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let portfolio = input::load_portfolio(args.input.as_deref())?;
    let summary = summarize_portfolio(&portfolio);

    let mut files: Vec<String> = Vec::new();
    if !portfolio.is_empty() {
        let out_dir = Path::new(&args.out_dir);
        fs::create_dir_all(out_dir)
            .map_err(|e| format!("Failed to create '{}': {}", out_dir.display(), e))?;

        let renderer = SvgRenderer::default();
        for (i, record) in portfolio.iter().enumerate() {
            let path = out_dir.join(format!("{:02}-{}.svg", i + 1, slug(record.name())));
            write_svg(&renderer, &build_breakeven_chart(record), &path)?;
            files.push(path.display().to_string());
        }
        let path = out_dir.join("comparison.svg");
        write_svg(&renderer, &build_comparison_chart(&portfolio), &path)?;
        files.push(path.display().to_string());
    }

    let mut value = serde_json::to_value(summary)?;
    if let Some(result) = value.get_mut("result").and_then(Value::as_object_mut) {
        result.insert("files".to_string(), json!(files));
    }
    Ok(value)
}

/// Either the chart description itself or the path it was rendered to.
fn chart_result(chart: &ChartSpec, svg: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    match svg {
        Some(path) => {
            let path = PathBuf::from(path);
            write_svg(&SvgRenderer::default(), chart, &path)?;
            Ok(json!({ "written": path.display().to_string() }))
        }
        None => Ok(serde_json::to_value(chart)?),
    }
}

fn write_svg(
    renderer: &SvgRenderer,
    chart: &ChartSpec,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let svg = renderer.render(chart)?;
    fs::write(path, svg).map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// File-name-safe form of a company name.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "company".to_string()
    } else {
        trimmed.to_string()
    }
}
