//! Read-only view models for the summary cards and the trend chart.

use crate::prediction::{HistoryEntry, PredictionResponse};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

pub const VALUE_PLACEHOLDER: &str = "N/A";
pub const SUGGESTION_PLACEHOLDER: &str = "No suggestion yet";

/// Formats a forecast quantity with two decimals, the way a browser's
/// `toFixed(2)` does: exact ties round away from zero and `-0` prints as
/// `0.00`.
pub fn format_value(value: f64) -> String {
    if value.is_infinite() {
        return (if value > 0.0 { "Infinity" } else { "-Infinity" }).to_string();
    }
    if value == 0.0 {
        return "0.00".to_string();
    }

    // A double sits exactly halfway between two hundredths only when it is an
    // odd multiple of 1/8; `{:.2}` would round those to even.
    let eighths = value * 8.0;
    if value.abs() < TIE_LIMIT && eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return format!("{:.2}", (value * 100.0).round() / 100.0);
    }
    format!("{:.2}", value)
}

// Below this magnitude `value * 100.0` is exact for multiples of 1/8.
const TIE_LIMIT: f64 = (1u64 << 48) as f64;

/// Renders an ISO date as `M/D/YYYY`; anything else is shown as typed.
pub fn display_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%-m/%-d/%Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
    pub caption: String,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCards {
    pub predicted_quantity: SummaryCard,
    pub safety_stock: SummaryCard,
    pub reorder_point: SummaryCard,
}

impl SummaryCards {
    pub fn from_result(result: Option<&PredictionResponse>) -> Self {
        let value = |pick: fn(&PredictionResponse) -> f64| {
            result
                .map(|r| format_value(pick(r)))
                .unwrap_or_else(|| VALUE_PLACEHOLDER.to_string())
        };

        let suggestion = result
            .map(|r| r.inventory_suggestion.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(SUGGESTION_PLACEHOLDER)
            .to_string();

        Self {
            predicted_quantity: SummaryCard {
                title: "Predicted Quantity",
                value: value(|r| r.predicted_quantity),
                caption: "Predicted units needed".to_string(),
                icon: "fas fa-chart-line",
            },
            safety_stock: SummaryCard {
                title: "Safety Stock",
                value: value(|r| r.safety_stock),
                caption: "Minimum stock level".to_string(),
                icon: "fas fa-boxes",
            },
            reorder_point: SummaryCard {
                title: "Reorder Point",
                value: value(|r| r.reorder_point),
                caption: suggestion,
                icon: "fas fa-exclamation-circle",
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SummaryCard> {
        [&self.predicted_quantity, &self.safety_stock, &self.reorder_point].into_iter()
    }
}

impl fmt::Display for SummaryCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in self.iter() {
            writeln!(f, "{:<20} {:>12}  {}", card.title, card.value, card.caption)?;
        }
        Ok(())
    }
}

/// One plotted line of the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: &'static str,
    pub color: &'static str,
    pub values: Vec<f64>,
}

/// Column-oriented copy of the history, one series per plotted quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySeries {
    pub dates: Vec<String>,
    pub series: Vec<Series>,
}

impl HistorySeries {
    pub fn from_history(history: &[HistoryEntry]) -> Self {
        let column =
            |pick: fn(&HistoryEntry) -> f64| -> Vec<f64> { history.iter().map(pick).collect() };

        Self {
            dates: history.iter().map(|e| e.date.clone()).collect(),
            series: vec![
                Series {
                    name: "Predicted Quantity",
                    color: "#570df8",
                    values: column(|e| e.predicted),
                },
                Series {
                    name: "Reorder Point",
                    color: "#ef4444",
                    values: column(|e| e.reorder),
                },
                Series {
                    name: "Safety Stock",
                    color: "#f000b8",
                    values: column(|e| e.safety),
                },
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// X position of each entry: its index in the history, so entries keep
    /// submission order and duplicate dates get their own point.
    pub fn positions(&self) -> Vec<f64> {
        (0..self.dates.len()).map(|i| i as f64).collect()
    }

    /// Date labels for the x axis.
    pub fn date_labels(&self) -> Vec<String> {
        self.dates.iter().map(|d| display_date(d)).collect()
    }
}

/// Plain-text rendering of the history, used by the command-line client.
pub fn history_table(history: &[HistoryEntry]) -> String {
    let mut out = format!(
        "{:<12} {:>12} {:>12} {:>12}\n",
        "Date", "Predicted", "Reorder", "Safety"
    );
    for entry in history {
        out.push_str(&format!(
            "{:<12} {:>12} {:>12} {:>12}\n",
            display_date(&entry.date),
            format_value(entry.predicted),
            format_value(entry.reorder),
            format_value(entry.safety),
        ));
    }
    out
}
