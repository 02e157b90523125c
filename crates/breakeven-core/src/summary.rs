use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::format::{format_percent, group_thousands};
use crate::portfolio::Portfolio;
use crate::record::{
    FinancialRecord, SafetyLevel, HIGH_SAFETY_THRESHOLD, MEDIUM_SAFETY_THRESHOLD,
};
use crate::types::{saturating_i64, with_metadata, ComputationOutput, Money, Rate};

/// Warning attached to the summary of an empty portfolio.
pub const NO_DATA_WARNING: &str = "No company data available";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Visual tone of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeTone {
    Success,
    Warning,
    Error,
}

/// Status badge derived from the safety level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    pub tone: BadgeTone,
}

impl From<SafetyLevel> for Badge {
    fn from(level: SafetyLevel) -> Self {
        let (label, tone) = match level {
            SafetyLevel::High => ("Safe", BadgeTone::Success),
            SafetyLevel::Medium => ("Caution", BadgeTone::Warning),
            SafetyLevel::Low => ("Danger", BadgeTone::Error),
        };
        Badge {
            label: label.to_string(),
            tone,
        }
    }
}

/// Display-ready view of one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySummary {
    pub name: String,
    pub sales: i64,
    pub fixed_cost: i64,
    pub marginal_profit_ratio: Rate,
    pub break_even_point: Money,
    /// Break-even point truncated to whole currency units
    pub break_even_display: i64,
    pub safety_margin_ratio: Rate,
    pub safety_level: SafetyLevel,
    pub profit: i64,
    /// Safety margin ratio clamped to [0, 1] for progress bars
    pub progress: Rate,
    pub badge: Badge,
    pub caption: String,
}

/// Number of companies in each safety tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub company_count: usize,
    pub level_counts: LevelCounts,
    pub companies: Vec<CompanySummary>,
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

/// Summarise every company in portfolio order.
///
/// An empty portfolio is not an error: it produces an empty summary carrying
/// [`NO_DATA_WARNING`].
pub fn summarize_portfolio(portfolio: &Portfolio) -> ComputationOutput<PortfolioSummary> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if portfolio.is_empty() {
        warnings.push(NO_DATA_WARNING.to_string());
    }

    let companies: Vec<CompanySummary> = portfolio.iter().map(summarize_company).collect();

    let mut level_counts = LevelCounts::default();
    for c in &companies {
        match c.safety_level {
            SafetyLevel::High => level_counts.high += 1,
            SafetyLevel::Medium => level_counts.medium += 1,
            SafetyLevel::Low => level_counts.low += 1,
        }
    }

    let output = PortfolioSummary {
        company_count: companies.len(),
        level_counts,
        companies,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    with_metadata(
        "Break-even Point and Safety Margin Analysis",
        &serde_json::json!({
            "companies": portfolio.len(),
            "high_threshold": HIGH_SAFETY_THRESHOLD.to_string(),
            "medium_threshold": MEDIUM_SAFETY_THRESHOLD.to_string(),
        }),
        warnings,
        elapsed,
        output,
    )
}

/// Build the display view of a single record.
pub fn summarize_company(record: &FinancialRecord) -> CompanySummary {
    let bep = record.break_even_point();
    let ratio = record.safety_margin_ratio();
    let level = SafetyLevel::classify(ratio);
    let break_even_display = saturating_i64(bep);

    CompanySummary {
        name: record.name().to_string(),
        sales: record.sales(),
        fixed_cost: record.fixed_cost(),
        marginal_profit_ratio: record.marginal_profit_ratio(),
        break_even_point: bep,
        break_even_display,
        safety_margin_ratio: ratio,
        safety_level: level,
        profit: record.profit(),
        progress: clamp_progress(ratio),
        badge: Badge::from(level),
        caption: format!(
            "Safety margin: {} (break-even: {})",
            format_percent(ratio),
            group_thousands(break_even_display)
        ),
    }
}

/// Clamp a ratio into the [0, 1] range used by progress bars.
pub fn clamp_progress(ratio: Rate) -> Rate {
    ratio.clamp(Decimal::ZERO, Decimal::ONE)
}
