use std::cell::Cell;
use std::rc::Rc;

use common::{DashboardAction, DashboardState, FormField, SubmissionError};
use web_sys::AbortController;
use yew::prelude::*;

use super::chart::PredictionTrendChart;
use super::form::PredictionForm;
use super::stats::SummaryStats;
use crate::api_client;
use crate::common::error::SubmissionAlert;
use crate::common::toast::ToastContext;

/// Dashboard state owned by the view, updated only through [`DashboardAction`]s.
#[derive(Clone, PartialEq, Default)]
struct DashboardStore(DashboardState);

impl Reducible for DashboardStore {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(DashboardStore(self.0.reduce(action)))
    }
}

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let store = use_reducer(DashboardStore::default);
    let toast_ctx = use_context::<ToastContext>();

    // The latest submission's request runs inside this effect. A newer
    // submission, or unmounting, runs the cleanup which aborts it.
    {
        let dispatcher = store.dispatcher();
        let submission = store.0.in_flight.clone();
        let toast_ctx = toast_ctx.clone();
        let generation = submission.as_ref().map(|s| s.generation);

        use_effect_with(generation, move |_| {
            let mut cleanup: Option<(AbortController, Rc<Cell<bool>>)> = None;

            if let Some(submission) = submission {
                let violations = submission.request.hint_violations();
                if !violations.is_empty() {
                    log::warn!(
                        "Submitting prediction #{} with fields outside input hints: {}",
                        submission.generation,
                        violations.join(", ")
                    );
                }

                match AbortController::new() {
                    Ok(controller) => {
                        let cancelled = Rc::new(Cell::new(false));
                        cleanup = Some((controller.clone(), cancelled.clone()));

                        wasm_bindgen_futures::spawn_local(async move {
                            log::info!("Requesting prediction #{}", submission.generation);
                            let outcome = api_client::predict(&submission.request, &controller).await;
                            if cancelled.get() {
                                log::debug!("Prediction #{} superseded, ignoring outcome", submission.generation);
                                return;
                            }

                            if let Some(toast_ctx) = &toast_ctx {
                                match &outcome {
                                    Ok(_) => toast_ctx.show_success("Prediction updated".to_string()),
                                    Err(e @ SubmissionError::Validation { .. }) => toast_ctx.show_warning(e.user_message()),
                                    Err(e) => toast_ctx.show_error(e.user_message()),
                                }
                            }

                            dispatcher.dispatch(DashboardAction::Resolve {
                                generation: submission.generation,
                                outcome,
                            });
                        });
                    }
                    Err(e) => {
                        log::error!("Failed to create abort controller: {:?}", e);
                        dispatcher.dispatch(DashboardAction::Resolve {
                            generation: submission.generation,
                            outcome: Err(SubmissionError::Network("Unable to start request".to_string())),
                        });
                    }
                }
            }

            move || {
                if let Some((controller, cancelled)) = cleanup {
                    cancelled.set(true);
                    controller.abort();
                }
            }
        });
    }

    let on_edit = {
        let dispatcher = store.dispatcher();
        Callback::from(move |(field, value): (FormField, String)| {
            dispatcher.dispatch(DashboardAction::Edit { field, value });
        })
    };

    let on_submit = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(DashboardAction::Submit))
    };

    let on_dismiss_error = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(DashboardAction::DismissError))
    };

    let state = &store.0;

    html! {
        <div class="space-y-6">
            <SummaryStats result={state.result.clone()} />

            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">{"Prediction Trends"}</h2>
                        <PredictionTrendChart history={state.history.clone()} />
                    </div>
                </div>

                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">{"Predict"}</h2>
                        {if let Some(error) = &state.last_error {
                            html! { <SubmissionAlert error={error.clone()} on_dismiss={on_dismiss_error} /> }
                        } else {
                            html! {}
                        }}
                        <PredictionForm
                            submitting={state.is_submitting()}
                            {on_edit}
                            {on_submit}
                        />
                    </div>
                </div>
            </div>
        </div>
    }
}
