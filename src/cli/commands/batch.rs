use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use common::{DashboardState, SummaryCards, format_value, history_table};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::PredictionClient;
use crate::config::ClientSettings;
use crate::session::{PredictionSession, form_input_from_json};

/// Submits each record of a JSON array through one session, in file order.
///
/// Records edit the same form, so a field a record leaves out keeps the value
/// from the previous record.
///
/// Every record is submitted even if an earlier one failed; the returned
/// error reports how many failed.
pub async fn batch(settings: &ClientSettings, input: &Path) -> Result<DashboardState> {
    info!("Running batch predictions from {}", input.display());

    let raw = fs::read_to_string(input)
        .with_context(|| format!("Failed to read batch file {}", input.display()))?;
    let records: Vec<Value> = serde_json::from_str(&raw)
        .with_context(|| format!("Batch file {} is not a JSON array", input.display()))?;
    debug!("Loaded {} records", records.len());

    // Parse everything up front so a malformed record fails before any request.
    let inputs = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            form_input_from_json(record).with_context(|| format!("Invalid record #{}", index + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    let client = PredictionClient::from_settings(settings)?;
    let mut session = PredictionSession::new(client);
    let mut failures = 0usize;

    for (index, form) in inputs.iter().enumerate() {
        session.fill(form);
        match session.submit().await {
            Ok(prediction) => println!(
                "#{} ok: predicted {}, reorder {}, safety {}",
                index + 1,
                format_value(prediction.predicted_quantity),
                format_value(prediction.reorder_point),
                format_value(prediction.safety_stock)
            ),
            Err(e) => {
                failures += 1;
                warn!("Record #{} failed ({}): {}", index + 1, e.kind(), e);
                println!("#{} failed: {}", index + 1, e.user_message());
            }
        }
    }

    let state = session.state().clone();
    println!();
    println!("{}", SummaryCards::from_result(state.result.as_ref()));
    println!();
    print!("{}", history_table(&state.history));

    info!(
        "Batch completed: {} succeeded, {} failed",
        inputs.len() - failures,
        failures
    );

    if failures > 0 {
        bail!("{} of {} predictions failed", failures, inputs.len());
    }
    Ok(state)
}
