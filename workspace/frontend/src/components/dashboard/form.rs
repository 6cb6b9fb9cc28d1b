use common::FormField;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PredictionFormProps {
    pub submitting: bool,
    pub on_edit: Callback<(FormField, String)>,
    pub on_submit: Callback<()>,
}

/// Prediction input form. Inputs are uncontrolled; every edit is reported
/// through `on_edit` with the raw input text.
#[function_component(PredictionForm)]
pub fn prediction_form(props: &PredictionFormProps) -> Html {
    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            log::debug!("Prediction form submitted");
            on_submit.emit(());
        })
    };

    html! {
        <form class="space-y-4" onsubmit={on_submit}>
            { for FormField::ALL.iter().map(|field| render_input(*field, &props.on_edit)) }
            <button type="submit" class="btn btn-primary w-full">
                {if props.submitting {
                    html! { <><span class="loading loading-spinner loading-sm"></span>{" Predicting..."}</> }
                } else {
                    html! { {"Predict"} }
                }}
            </button>
        </form>
    }
}

fn render_input(field: FormField, on_edit: &Callback<(FormField, String)>) -> Html {
    let hints = field.hints();
    let oninput = {
        let on_edit = on_edit.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_edit.emit((field, input.value()));
        })
    };

    html! {
        <div class="form-control" key={field.name()}>
            <label class="label" for={field.input_id()}>
                <span class="label-text">{field.label()}</span>
            </label>
            <input
                id={field.input_id()}
                name={field.name()}
                type={hints.input_type}
                class="input input-bordered w-full"
                placeholder={hints.placeholder}
                min={hints.min}
                max={hints.max}
                step={hints.step}
                required={true}
                {oninput}
            />
        </div>
    }
}
