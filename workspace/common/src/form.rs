//! Form field catalogue and the field-by-field reducer.
//!
//! Text parsing follows what a browser number input handler gets out of
//! `parseFloat`/`parseInt`: the longest numeric prefix wins and anything
//! unparsable becomes a placeholder instead of an error.

use crate::prediction::PredictionRequest;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Input fields of the prediction form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Date,
    DailySalesPercentage,
    MarketShare,
    Political,
    Marketing,
    Budget,
    Machineries,
    Region,
}

/// HTML input hints for a field. Browsers may enforce them, nothing else does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputHints {
    pub input_type: &'static str,
    pub placeholder: Option<&'static str>,
    pub min: Option<&'static str>,
    pub max: Option<&'static str>,
    pub step: Option<&'static str>,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Date,
        FormField::DailySalesPercentage,
        FormField::MarketShare,
        FormField::Political,
        FormField::Marketing,
        FormField::Budget,
        FormField::Machineries,
        FormField::Region,
    ];

    /// Wire name of the field in [`PredictionRequest`].
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Date => "date",
            FormField::DailySalesPercentage => "daily_sales_percentage",
            FormField::MarketShare => "market_share",
            FormField::Political => "political",
            FormField::Marketing => "marketing",
            FormField::Budget => "budget",
            FormField::Machineries => "machineries",
            FormField::Region => "region",
        }
    }

    /// DOM id of the input element.
    pub fn input_id(&self) -> &'static str {
        match self {
            FormField::Date => "date",
            FormField::DailySalesPercentage => "dailySales",
            FormField::MarketShare => "marketShare",
            FormField::Political => "political",
            FormField::Marketing => "marketing",
            FormField::Budget => "budget",
            FormField::Machineries => "machineries",
            FormField::Region => "region",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Date => "Date",
            FormField::DailySalesPercentage => "Daily Sales Percentage",
            FormField::MarketShare => "Market Share",
            FormField::Political => "Political Factor",
            FormField::Marketing => "Marketing Factor",
            FormField::Budget => "Budget",
            FormField::Machineries => "Machineries",
            FormField::Region => "Region",
        }
    }

    pub fn hints(&self) -> InputHints {
        let text = |placeholder| InputHints {
            input_type: "text",
            placeholder: Some(placeholder),
            min: None,
            max: None,
            step: None,
        };
        let number = |placeholder, min, max, step| InputHints {
            input_type: "number",
            placeholder: Some(placeholder),
            min,
            max,
            step: Some(step),
        };

        match self {
            FormField::Date => InputHints {
                input_type: "date",
                placeholder: None,
                min: None,
                max: None,
                step: None,
            },
            FormField::DailySalesPercentage => number(
                "Enter Daily Sales (e.g., 0.034)",
                Some("0"),
                Some("1"),
                "0.000001",
            ),
            FormField::MarketShare => number("Enter Market Share", Some("0"), Some("100"), "1"),
            FormField::Political => number("Enter 0 or 1", Some("0"), Some("1"), "1"),
            FormField::Marketing => number("Enter 0 or 1", Some("0"), Some("1"), "1"),
            FormField::Budget => number("Enter Budget Amount", Some("0"), None, "0.01"),
            FormField::Machineries => text("Enter Machinery Type"),
            FormField::Region => text("Enter Region"),
        }
    }

    /// Current value of this field in `request`, rendered back to input text.
    pub fn current_text(&self, request: &PredictionRequest) -> String {
        let float = |v: f64| if v.is_nan() { String::new() } else { v.to_string() };
        let int = |v: Option<i64>| v.map(|v| v.to_string()).unwrap_or_default();

        match self {
            FormField::Date => request.date.clone(),
            FormField::DailySalesPercentage => float(request.daily_sales_percentage),
            FormField::MarketShare => int(request.market_share),
            FormField::Political => int(request.political),
            FormField::Marketing => int(request.marketing),
            FormField::Budget => float(request.budget),
            FormField::Machineries => request.machineries.clone(),
            FormField::Region => request.region.clone(),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a [`FormField`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s || field.input_id() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Lenient float parse: longest leading decimal literal, `NaN` when there is none.
pub fn parse_float(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned.starts_with("Infinity") {
        return if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let end = float_prefix_len(trimmed);
    trimmed[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Lenient integer parse: optional sign then leading digits, `None` when there are none.
pub fn parse_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    // Saturate like a double would rather than reject huge inputs.
    trimmed[..end].parse::<i64>().ok().or_else(|| {
        if trimmed.starts_with('-') {
            Some(i64::MIN)
        } else {
            Some(i64::MAX)
        }
    })
}

// Length of the longest prefix shaped like `[+-]digits[.digits][e[+-]digits]`.
fn float_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        mantissa_digits += j - frac_start;
        if mantissa_digits > 0 {
            i = j;
        }
    }

    if mantissa_digits == 0 {
        return 0;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

/// Returns `request` with `field` updated from the raw input text.
pub fn apply_field(request: &PredictionRequest, field: FormField, text: &str) -> PredictionRequest {
    let mut next = request.clone();
    match field {
        FormField::Date => next.date = text.to_string(),
        FormField::DailySalesPercentage => next.daily_sales_percentage = parse_float(text),
        FormField::MarketShare => next.market_share = parse_int(text),
        FormField::Political => next.political = parse_int(text),
        FormField::Marketing => next.marketing = parse_int(text),
        FormField::Budget => next.budget = parse_float(text),
        FormField::Machineries => next.machineries = text.to_string(),
        FormField::Region => next.region = text.to_string(),
    }
    tracing::trace!(field = field.name(), "form field updated");
    next
}
