use std::collections::BTreeMap;

use anyhow::{Result, bail};
use common::{DashboardState, FormField, SubmissionOutcome};
use serde_json::Value;
use tracing::warn;

use crate::client::PredictionClient;

/// A form filled in as raw input text, keyed by field.
pub type FormInput = BTreeMap<FormField, String>;

/// Native host of the dashboard state: edits, submits and keeps history for
/// the lifetime of the process.
pub struct PredictionSession {
    client: PredictionClient,
    state: DashboardState,
}

impl PredictionSession {
    pub fn new(client: PredictionClient) -> Self {
        Self {
            client,
            state: DashboardState::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Applies every field of `input` to the form through the same reducer
    /// the browser uses.
    pub fn fill(&mut self, input: &FormInput) {
        for (field, value) in input {
            self.state.edit(*field, value.as_str());
        }
    }

    /// Submits the current form and waits for the outcome.
    pub async fn submit(&mut self) -> SubmissionOutcome {
        let submission = self.state.submit();

        let violations = submission.request.hint_violations();
        if !violations.is_empty() {
            warn!(
                generation = submission.generation,
                fields = %violations.join(", "),
                "submitting fields outside input hints"
            );
        }

        let outcome = self.client.predict(&submission.request).await;
        self.state.resolve(submission.generation, outcome.clone());
        outcome
    }
}

/// Converts one JSON record (field name to string/number) into form input.
pub fn form_input_from_json(record: &Value) -> Result<FormInput> {
    let Some(object) = record.as_object() else {
        bail!("expected a JSON object, got {}", record);
    };

    let mut input = FormInput::new();
    for (key, value) in object {
        let field: FormField = key.parse()?;
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
            Value::Null => String::new(),
            other => bail!("field '{}' has unsupported value {}", key, other),
        };
        input.insert(field, text);
    }
    Ok(input)
}
