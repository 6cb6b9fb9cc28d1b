use common::SubmissionError;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SubmissionAlertProps {
    pub error: SubmissionError,
    pub on_dismiss: Callback<()>,
}

fn heading(error: &SubmissionError) -> &'static str {
    match error {
        SubmissionError::Network(_) => "Prediction service unreachable",
        SubmissionError::Validation { .. } => "Input rejected",
        SubmissionError::Server { .. } => "Prediction service error",
        SubmissionError::UnexpectedShape(_) => "Unexpected response",
    }
}

/// Inline, dismissible description of the last failed submission.
#[function_component(SubmissionAlert)]
pub fn submission_alert(props: &SubmissionAlertProps) -> Html {
    log::warn!("Displaying submission error to user: {}", props.error);

    let alert_class = match props.error {
        SubmissionError::Validation { .. } => "alert-warning",
        _ => "alert-error",
    };

    let on_dismiss = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| {
            log::debug!("User dismissed submission error");
            on_dismiss.emit(());
        })
    };

    html! {
        <div class={classes!("alert", alert_class)} role="alert">
            <i class="fas fa-exclamation-circle text-xl"></i>
            <div class="flex flex-col gap-1">
                <span class="font-semibold">{heading(&props.error)}</span>
                <span class="text-sm">{props.error.user_message()}</span>
                <span class="text-xs opacity-70">{props.error.to_string()}</span>
            </div>
            <button type="button" class="btn btn-sm btn-ghost btn-circle" onclick={on_dismiss}>
                <i class="fas fa-times"></i>
            </button>
        </div>
    }
}
