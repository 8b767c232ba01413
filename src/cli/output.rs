//! Output formatting for CLI results.
//!
//! Results go to stdout: one compact JSON line by default, or a
//! human-readable rendering with `--human`. Logs never share stdout.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use console::style;
use serde::Serialize;

use crate::domain::models::TrialVerdict;

/// Trait for types that can be rendered as human-readable or JSON output.
pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Render a result as a single line of JSON, or as text in human mode.
pub fn render<T: CommandOutput>(result: &T, human: bool) -> String {
    if human {
        result.to_human()
    } else {
        result.to_json().to_string()
    }
}

/// Print a result to stdout.
pub fn output<T: CommandOutput>(result: &T, human: bool) {
    println!("{}", render(result, human));
}

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Verdict word for a trial, colored when the terminal allows.
pub fn verdict_label(verdict: &TrialVerdict) -> String {
    if verdict.passed {
        style("pass").green().bold().to_string()
    } else if verdict.early_failed {
        style("early-fail").red().to_string()
    } else {
        style("fail").red().bold().to_string()
    }
}

/// Table of trials in execution order.
pub fn trials_table(trials: &[TrialVerdict]) -> Table {
    let mut table = list_table(&["#", "interval (ns)", "verdict", "satisfy ratio", "requests"]);
    for (i, trial) in trials.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(trial.interval),
            Cell::new(verdict_label(trial)),
            Cell::new(format!("{:.6}", trial.counters.satisfy_ratio)),
            Cell::new(trial.counters.n_requests),
        ]);
    }
    table
}
