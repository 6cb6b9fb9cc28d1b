//! Dashboard state and its reducer.
//!
//! The state is a plain value owned by whoever hosts the view. Every change
//! goes through [`DashboardState::reduce`], so the whole submission flow can
//! be exercised without a browser.

use crate::form::{FormField, apply_field};
use crate::outcome::{SubmissionError, SubmissionOutcome};
use crate::prediction::{HistoryEntry, PredictionRequest, PredictionResponse};
use tracing::{debug, warn};

/// Snapshot of the form taken when a submission starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub generation: u64,
    pub request: PredictionRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    /// Raw text typed into a form input
    Edit { field: FormField, value: String },
    /// Start a submission of the current form
    Submit,
    /// Outcome of the submission started as `generation`
    Resolve {
        generation: u64,
        outcome: SubmissionOutcome,
    },
    DismissError,
}

/// Whether a forecast has been received yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoResult,
    HasResult,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    pub form: PredictionRequest,
    pub result: Option<PredictionResponse>,
    pub history: Vec<HistoryEntry>,
    /// Number of submissions started so far
    pub generation: u64,
    /// Latest started submission that has not resolved yet
    pub in_flight: Option<Submission>,
    pub last_error: Option<SubmissionError>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.result.is_some() {
            Phase::HasResult
        } else {
            Phase::NoResult
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn reduce(&self, action: DashboardAction) -> DashboardState {
        let mut next = self.clone();
        match action {
            DashboardAction::Edit { field, value } => {
                next.form = apply_field(&self.form, field, &value);
            }
            DashboardAction::Submit => {
                next.generation = self.generation + 1;
                next.in_flight = Some(Submission {
                    generation: next.generation,
                    request: self.form.clone(),
                });
                next.last_error = None;
                debug!(generation = next.generation, "prediction submission started");
            }
            DashboardAction::Resolve {
                generation,
                outcome,
            } => {
                let submission = match &self.in_flight {
                    Some(submission) if submission.generation == generation => submission,
                    _ => {
                        warn!(
                            generation,
                            latest = self.generation,
                            "discarding outcome of superseded submission"
                        );
                        return next;
                    }
                };

                match outcome {
                    Ok(response) => {
                        next.history.push(HistoryEntry::from_response(
                            submission.request.date.clone(),
                            &response,
                        ));
                        next.result = Some(response);
                        debug!(
                            generation,
                            history_len = next.history.len(),
                            "prediction accepted"
                        );
                    }
                    Err(error) => {
                        warn!(generation, kind = error.kind(), "prediction submission failed");
                        next.last_error = Some(error);
                    }
                }
                next.in_flight = None;
            }
            DashboardAction::DismissError => {
                next.last_error = None;
            }
        }
        next
    }

    /// Starts a submission and returns the snapshot to send.
    pub fn submit(&mut self) -> Submission {
        *self = self.reduce(DashboardAction::Submit);
        // Submit always leaves a submission in flight.
        self.in_flight.clone().unwrap_or(Submission {
            generation: self.generation,
            request: self.form.clone(),
        })
    }

    pub fn resolve(&mut self, generation: u64, outcome: SubmissionOutcome) {
        *self = self.reduce(DashboardAction::Resolve {
            generation,
            outcome,
        });
    }

    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        *self = self.reduce(DashboardAction::Edit {
            field,
            value: value.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_scenario_form(state: &mut DashboardState, date: &str) {
        for (field, value) in [
            (FormField::Date, date),
            (FormField::DailySalesPercentage, "0.05"),
            (FormField::MarketShare, "10"),
            (FormField::Political, "0"),
            (FormField::Marketing, "1"),
            (FormField::Budget, "1000"),
            (FormField::Machineries, "Harvester"),
            (FormField::Region, "North"),
        ] {
            state.edit(field, value);
        }
    }

    fn response(predicted: f64, safety: f64, reorder: f64) -> PredictionResponse {
        PredictionResponse {
            predicted_quantity: predicted,
            safety_stock: safety,
            reorder_point: reorder,
            inventory_suggestion: "Reorder soon".to_string(),
        }
    }

    #[test]
    fn test_initial_state_has_no_result() {
        let state = DashboardState::new();
        assert_eq!(state.phase(), Phase::NoResult);
        assert!(state.history.is_empty());
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_success_replaces_result_and_appends_history() {
        let mut state = DashboardState::new();
        fill_scenario_form(&mut state, "2024-01-01");
        assert_eq!(state.form.market_share, Some(10));
        assert_eq!(state.form.machineries, "Harvester");

        let submission = state.submit();
        assert_eq!(submission.generation, 1);
        assert!(state.is_submitting());

        let body = response(120.5, 30.2, 45.7);
        state.resolve(submission.generation, Ok(body.clone()));

        assert_eq!(state.phase(), Phase::HasResult);
        assert_eq!(state.result, Some(body));
        assert_eq!(
            state.history,
            vec![HistoryEntry {
                date: "2024-01-01".to_string(),
                predicted: 120.5,
                reorder: 45.7,
                safety: 30.2,
            }]
        );
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_failure_leaves_result_and_history_unchanged() {
        let mut state = DashboardState::new();
        fill_scenario_form(&mut state, "2024-01-01");
        let first = state.submit();
        state.resolve(first.generation, Ok(response(1.0, 2.0, 3.0)));
        let before_result = state.result.clone();
        let before_history = state.history.clone();

        let second = state.submit();
        let error = SubmissionError::Network("connection refused".to_string());
        state.resolve(second.generation, Err(error.clone()));

        assert_eq!(state.result, before_result);
        assert_eq!(state.history, before_history);
        assert_eq!(state.last_error, Some(error));
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_sequential_successes_preserve_order() {
        let mut state = DashboardState::new();

        fill_scenario_form(&mut state, "2024-01-01");
        let first = state.submit();
        state.resolve(first.generation, Ok(response(10.0, 1.0, 2.0)));

        state.edit(FormField::Date, "2024-01-02");
        let second = state.submit();
        state.resolve(second.generation, Ok(response(20.0, 3.0, 4.0)));

        let dates: Vec<&str> = state.history.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(state.result.as_ref().map(|r| r.predicted_quantity), Some(20.0));
    }

    #[test]
    fn test_duplicate_dates_are_both_kept() {
        let mut state = DashboardState::new();
        fill_scenario_form(&mut state, "2024-03-01");
        for value in [5.0, 6.0] {
            let submission = state.submit();
            state.resolve(submission.generation, Ok(response(value, 0.0, 0.0)));
        }
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].date, state.history[1].date);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = DashboardState::new();
        fill_scenario_form(&mut state, "2024-01-01");
        let first = state.submit();

        state.edit(FormField::Date, "2024-01-02");
        let second = state.submit();

        // Second request answers first, then the superseded one arrives.
        state.resolve(second.generation, Ok(response(20.0, 3.0, 4.0)));
        state.resolve(first.generation, Ok(response(10.0, 1.0, 2.0)));

        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].date, "2024-01-02");
        assert_eq!(state.result.as_ref().map(|r| r.predicted_quantity), Some(20.0));
    }

    #[test]
    fn test_superseded_request_cannot_clear_in_flight_marker() {
        let mut state = DashboardState::new();
        let first = state.submit();
        let second = state.submit();

        state.resolve(first.generation, Err(SubmissionError::Network("timeout".into())));
        assert!(state.is_submitting());
        assert_eq!(state.last_error, None);

        state.resolve(second.generation, Ok(response(1.0, 1.0, 1.0)));
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_history_uses_submitted_date_not_edited_date() {
        let mut state = DashboardState::new();
        fill_scenario_form(&mut state, "2024-01-01");
        let submission = state.submit();
        state.edit(FormField::Date, "2030-12-31");
        state.resolve(submission.generation, Ok(response(1.0, 1.0, 1.0)));
        assert_eq!(state.history[0].date, "2024-01-01");
    }

    #[test]
    fn test_unparsable_input_is_submitted_as_placeholder() {
        let mut state = DashboardState::new();
        fill_scenario_form(&mut state, "2024-01-01");
        state.edit(FormField::DailySalesPercentage, "abc");
        let submission = state.submit();
        assert!(submission.request.daily_sales_percentage.is_nan());
    }

    #[test]
    fn test_submit_clears_previous_error_and_dismiss() {
        let mut state = DashboardState::new();
        let submission = state.submit();
        state.resolve(submission.generation, Err(SubmissionError::UnexpectedShape("x".into())));
        assert!(state.last_error.is_some());

        let dismissed = state.reduce(DashboardAction::DismissError);
        assert_eq!(dismissed.last_error, None);

        state.submit();
        assert_eq!(state.last_error, None);
    }
}
