//! Wire types exchanged with the inventory prediction endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body POSTed to the prediction endpoint.
///
/// Numeric fields keep whatever the form parser produced. An unparsable float
/// is `NaN` and an unparsable integer is `None`; both go out as JSON `null`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct PredictionRequest {
    /// Calendar date, `YYYY-MM-DD` as produced by a date input
    #[validate(length(min = 1))]
    pub date: String,
    /// Fraction of daily sales in `[0, 1]` (advisory)
    #[validate(range(min = 0.0, max = 1.0))]
    pub daily_sales_percentage: f64,
    /// Integer market share percentage (advisory `0..=100`)
    #[validate(range(min = 0, max = 100))]
    pub market_share: Option<i64>,
    /// Political factor, expected 0 or 1 but not enforced
    #[validate(range(min = 0, max = 1))]
    pub political: Option<i64>,
    /// Marketing factor, expected 0 or 1 but not enforced
    #[validate(range(min = 0, max = 1))]
    pub marketing: Option<i64>,
    /// Budget amount (advisory minimum 0)
    #[validate(range(min = 0.0))]
    pub budget: f64,
    #[validate(length(min = 1))]
    pub machineries: String,
    #[validate(length(min = 1))]
    pub region: String,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            date: String::new(),
            daily_sales_percentage: 0.0,
            market_share: Some(0),
            political: Some(0),
            marketing: Some(0),
            budget: 0.0,
            machineries: String::new(),
            region: String::new(),
        }
    }
}

impl PredictionRequest {
    /// Names of the fields whose input hints this request does not satisfy.
    ///
    /// Hints are advisory: callers log the result and submit anyway.
    pub fn hint_violations(&self) -> Vec<String> {
        let mut fields: Vec<String> = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors.field_errors().keys().map(|k| k.to_string()).collect(),
        };

        // Range checks let NaN through, so report placeholders explicitly.
        if self.daily_sales_percentage.is_nan() {
            fields.push("daily_sales_percentage".to_string());
        }
        if self.budget.is_nan() {
            fields.push("budget".to_string());
        }
        for (name, value) in [
            ("market_share", self.market_share),
            ("political", self.political),
            ("marketing", self.marketing),
        ] {
            if value.is_none() {
                fields.push(name.to_string());
            }
        }

        fields.sort();
        fields.dedup();
        fields
    }
}

/// Forecast returned by the prediction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResponse {
    pub predicted_quantity: f64,
    pub safety_stock: f64,
    pub reorder_point: f64,
    pub inventory_suggestion: String,
}

/// One plotted point of the prediction history chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub date: String,
    pub predicted: f64,
    pub reorder: f64,
    pub safety: f64,
}

impl HistoryEntry {
    /// Builds the entry for an accepted response to a request submitted for `date`.
    pub fn from_response(date: impl Into<String>, response: &PredictionResponse) -> Self {
        Self {
            date: date.into(),
            predicted: response.predicted_quantity,
            reorder: response.reorder_point,
            safety: response.safety_stock,
        }
    }
}
