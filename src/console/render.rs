//! Text Rendering
//!
//! Table of visible rows joined with their predictions, summary cards, and
//! the three-bucket status chart.

use std::fmt::Write;

use crate::logic::classifier::{FeatureImpact, PredictionResult, Status};
use crate::logic::dispatch::DispatchReport;
use crate::logic::state::DashboardState;
use crate::logic::summary::Summary;

/// Widest a data cell may get before truncation
const MAX_CELL_WIDTH: usize = 14;

/// Longest chart bar
const BAR_WIDTH: usize = 40;

const PLACEHOLDER: &str = "...";
const PENDING: &str = "Pending...";

pub const CHART_TITLE: &str = "Total Transactions by Status";

/// Chart bucket order
pub const BUCKETS: [Status; 3] = [Status::Fraud, Status::Legitimate, Status::ManualReview];

// ============================================================================
// CELLS
// ============================================================================

pub fn prediction_cell(pred: Option<&PredictionResult>) -> String {
    pred.map(|p| p.prediction.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn probability_cell(pred: Option<&PredictionResult>) -> String {
    pred.map(|p| format!("{}%", p.fraud_probability))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn status_cell(pred: Option<&PredictionResult>) -> String {
    pred.map(|p| p.status.as_str().to_string())
        .unwrap_or_else(|| PENDING.to_string())
}

pub fn explanation_cell(pred: Option<&PredictionResult>) -> String {
    match pred.and_then(|p| p.explanation.as_deref()) {
        Some(entries) => entries.iter().map(format_impact).collect::<Vec<_>>().join("; "),
        None => PLACEHOLDER.to_string(),
    }
}

/// `amount +0.4123`, `oldbalanceOrg -0.0500`
pub fn format_impact(entry: &FeatureImpact) -> String {
    // -0.0 prints unsigned
    let impact = if entry.impact == 0.0 { 0.0 } else { entry.impact };
    let sign = if impact > 0.0 { "+" } else { "" };
    format!("{} {}{:.4}", entry.feature, sign, impact)
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        value.to_string()
    } else {
        let mut cut: String = value.chars().take(MAX_CELL_WIDTH - 1).collect();
        cut.push('…');
        cut
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// Visible window as a text table. Unresolved rows show `Pending...`.
pub fn table(state: &DashboardState) -> String {
    let dataset = state.dataset();
    let range = state.window().visible_range(dataset.len());
    table_rows(state, range.start, range.end)
}

/// Rows `[from, to)` of the table (clamped to the visible window), with header
pub fn table_rows(state: &DashboardState, from: usize, to: usize) -> String {
    let dataset = state.dataset();
    let visible = state.window().visible_range(dataset.len());
    let to = to.min(visible.end);
    let from = from.min(to);

    let mut header: Vec<String> = dataset.columns().iter().map(|c| truncate(c)).collect();
    header.extend(["Prediction", "Probability", "Status", "Explanation"].map(String::from));

    let mut rows: Vec<(String, Vec<String>)> = Vec::with_capacity(to - from);
    for index in from..to {
        let Some(row) = dataset.get(index) else { break };
        let pred = state.store().get(index);

        let mut cells: Vec<String> = dataset
            .columns()
            .iter()
            .map(|c| truncate(row.get(c).unwrap_or("")))
            .collect();
        cells.push(prediction_cell(pred));
        cells.push(probability_cell(pred));
        cells.push(status_cell(pred));
        cells.push(explanation_cell(pred));

        let tag = pred.map(|p| p.status.tag()).unwrap_or("").to_string();
        rows.push((tag, cells));
    }

    // Explanation is the last column and is never padded.
    let last = header.len() - 1;
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for (_, cells) in &rows {
        for (i, cell) in cells.iter().enumerate().take(last) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    let tag_width = rows.iter().map(|(t, _)| t.len()).max().unwrap_or(0).max("#".len());

    let mut out = String::new();
    let _ = writeln!(out, "{}", format_line(&format!("{:<w$}", "#", w = tag_width), &header, &widths, last));
    let rule: usize = widths.iter().take(last).map(|w| w + 3).sum::<usize>() + tag_width + header[last].len() + 3;
    let _ = writeln!(out, "{}", "-".repeat(rule));
    for (index, (tag, cells)) in (from..).zip(rows.iter()) {
        let lead = if tag.is_empty() { index.to_string() } else { tag.clone() };
        let _ = writeln!(out, "{}", format_line(&format!("{:<w$}", lead, w = tag_width), cells, &widths, last));
    }
    out
}

fn format_line(lead: &str, cells: &[String], widths: &[usize], last: usize) -> String {
    let mut line = String::from(lead);
    for (i, cell) in cells.iter().enumerate() {
        line.push_str(" | ");
        if i == last {
            line.push_str(cell);
        } else {
            let pad = widths[i].saturating_sub(cell.chars().count());
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
        }
    }
    line
}

// ============================================================================
// SUMMARY
// ============================================================================

pub fn summary_cards(summary: &Summary) -> String {
    format!(
        "Legitimate: {}   Manual Review: {}   Fraud: {}",
        summary.legit, summary.review, summary.fraud
    )
}

/// One-line totals of a finished run
pub fn run_line(report: &DispatchReport) -> String {
    let mut line = format!(
        "Run complete: {}/{} resolved, {} failed, {} skipped in {} batches",
        report.succeeded(),
        report.requested(),
        report.failed(),
        report.skipped(),
        report.batches.len()
    );
    if let Some(elapsed) = report.elapsed() {
        let _ = write!(line, " ({} ms)", elapsed.num_milliseconds());
    }
    line
}

/// Horizontal bar chart of the three status counts
pub fn chart(summary: &Summary) -> String {
    let max = BUCKETS.iter().map(|s| summary.count(*s)).max().unwrap_or(0);
    let label_width = BUCKETS.iter().map(|s| s.as_str().len()).max().unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{}", CHART_TITLE);
    for status in BUCKETS {
        let count = summary.count(status);
        let bar = if max == 0 { 0 } else { (count * BAR_WIDTH).div_ceil(max) };
        let _ = writeln!(out, "{:<w$} | {} {}", status.as_str(), "█".repeat(bar), count, w = label_width);
    }
    let _ = writeln!(out, "{:<w$}   Number of Transactions", "", w = label_width);
    out
}
