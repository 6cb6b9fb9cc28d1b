//! Shared types and state for the stockcast prediction dashboard.
//!
//! Everything here is plain data and pure functions so the browser frontend
//! and the command-line client drive the exact same submission flow.

pub mod dashboard;
pub mod form;
pub mod outcome;
pub mod prediction;
pub mod presentation;

pub use dashboard::{DashboardAction, DashboardState, Phase, Submission};
pub use form::{FormField, InputHints, apply_field, parse_float, parse_int};
pub use outcome::{SubmissionError, SubmissionOutcome, classify_response};
pub use prediction::{HistoryEntry, PredictionRequest, PredictionResponse};
pub use presentation::{
    HistorySeries, SUGGESTION_PLACEHOLDER, Series, SummaryCard, SummaryCards, VALUE_PLACEHOLDER,
    display_date, format_value, history_table,
};

/// Endpoint the dashboard posts to unless configured otherwise.
pub const DEFAULT_PREDICT_URL: &str = "https://web-production-c948.up.railway.app/predict";
