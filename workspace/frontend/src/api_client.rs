use std::cell::Cell;
use std::rc::Rc;

use common::{classify_response, PredictionRequest, SubmissionError, SubmissionOutcome};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use web_sys::AbortController;

use crate::settings;

/// POST a prediction request to the configured endpoint.
///
/// The request is aborted through `controller` when the configured timeout
/// elapses; callers may also abort it themselves (e.g. on unmount).
pub async fn predict(request: &PredictionRequest, controller: &AbortController) -> SubmissionOutcome {
    let settings = settings::get_settings();
    let url = settings.predict_url;
    log::debug!("POST request to: {}", url);

    let timed_out = Rc::new(Cell::new(false));
    let _timeout = (settings.request_timeout_ms > 0).then(|| {
        let controller = controller.clone();
        let timed_out = timed_out.clone();
        let url = url.clone();
        let timeout_ms = settings.request_timeout_ms;
        Timeout::new(timeout_ms, move || {
            log::warn!("POST {} - no response after {} ms, aborting", url, timeout_ms);
            timed_out.set(true);
            controller.abort();
        })
    });

    let signal = controller.signal();
    let response = Request::post(&url)
        .abort_signal(Some(&signal))
        .json(request)
        .map_err(|e| {
            let error_msg = format!("Failed to serialize request: {}", e);
            log::error!("POST {} - {}", url, error_msg);
            SubmissionError::Network(error_msg)
        })?
        .send()
        .await
        .map_err(|e| {
            let error_msg = if timed_out.get() {
                format!("Request timed out after {} ms", settings.request_timeout_ms)
            } else {
                format!("Request failed: {}", e)
            };
            log::error!("POST {} - {}", url, error_msg);
            SubmissionError::Network(error_msg)
        })?;

    let status = response.status();
    log::trace!("POST {} - Response received ({}), reading body", url, status);
    let body = response.text().await.map_err(|e| {
        let error_msg = format!("Failed to read response body: {}", e);
        log::error!("POST {} - {}", url, error_msg);
        SubmissionError::Network(error_msg)
    })?;

    let outcome = classify_response(status, &body);
    match &outcome {
        Ok(_) => log::info!("POST {} - Success", url),
        Err(e) => log::error!("POST {} - {} ({})", url, e, e.kind()),
    }
    outcome
}
