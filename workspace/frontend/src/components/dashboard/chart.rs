use common::{HistoryEntry, HistorySeries};
use plotly::common::{Line, LineShape, Mode, Title};
use plotly::layout::{Axis, AxisType, Legend, Margin};
use plotly::{Layout, Scatter};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

const CHART_DIV_ID: &str = "chart-prediction-trends";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

#[derive(Properties, PartialEq)]
pub struct PredictionTrendChartProps {
    pub history: Vec<HistoryEntry>,
}

#[function_component(PredictionTrendChart)]
pub fn prediction_trend_chart(props: &PredictionTrendChartProps) -> Html {
    if props.history.is_empty() {
        return html! {
            <div class="flex flex-col items-center justify-center text-gray-500" style="height: 300px;">
                <i class="fas fa-chart-line text-4xl mb-4 opacity-50"></i>
                <p>{"No predictions yet."}</p>
                <p class="text-sm mt-2">{"Submit the form to start plotting predictions."}</p>
            </div>
        };
    }

    html! { <TrendPlot history={props.history.clone()} /> }
}

#[function_component(TrendPlot)]
fn trend_plot(props: &PredictionTrendChartProps) -> Html {
    let container_ref = use_node_ref();

    use_effect_with((container_ref.clone(), props.history.clone()), move |(container_ref, history)| {
        if let Some(element) = container_ref.cast::<HtmlElement>() {
            element.set_id(CHART_DIV_ID);
            let series = HistorySeries::from_history(history);
            log::trace!("Plotting {} history points", series.dates.len());
            if let Err(e) = draw(&series) {
                log::error!("Failed to render prediction chart: {:?}", e);
            }
        }
        || ()
    });

    html! {
        <div ref={container_ref} class="chart-container" style="width: 100%; height: 300px;"></div>
    }
}

fn draw(series: &HistorySeries) -> Result<(), JsValue> {
    let positions = series.positions();
    let labels = series.date_labels();
    let data_js = js_sys::Array::new();

    for line in &series.series {
        let trace = Scatter::new(positions.clone(), line.values.clone())
            .mode(Mode::LinesMarkers)
            .name(line.name)
            .text_array(labels.clone())
            .hover_template("%{text}<br>%{fullData.name}: %{y:.2f}<extra></extra>")
            .line(Line::new().color(line.color).width(2.0).shape(LineShape::Spline));

        data_js.push(&to_js(&trace)?);
    }

    let layout = Layout::new()
        .x_axis(
            Axis::new()
                .type_(AxisType::Linear)
                .tick_values(positions)
                .tick_text(labels)
                .show_grid(false),
        )
        .y_axis(Axis::new().title(Title::with_text("Units")).show_grid(true))
        .legend(Legend::new().x(0.0).y(-0.2))
        .margin(Margin::new().top(10).right(10).left(50).bottom(40))
        .height(300);

    let config = serde_json::json!({"responsive": true, "displayModeBar": false});

    newPlot(CHART_DIV_ID, data_js.into(), to_js(&layout)?, to_js(&config)?);
    Ok(())
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}
