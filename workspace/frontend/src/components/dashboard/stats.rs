use common::{PredictionResponse, SummaryCard, SummaryCards};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryStatsProps {
    pub result: Option<PredictionResponse>,
}

#[function_component(SummaryStats)]
pub fn summary_stats(props: &SummaryStatsProps) -> Html {
    let cards = SummaryCards::from_result(props.result.as_ref());
    let value_class = if props.result.is_some() { "text-primary" } else { "text-base-content/50" };

    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
            { for cards.iter().map(|card| render_card(card, value_class)) }
        </div>
    }
}

fn render_card(card: &SummaryCard, value_class: &'static str) -> Html {
    html! {
        <div class="stats shadow bg-base-100" key={card.title}>
            <div class="stat">
                <div class="stat-figure text-base-content/60">
                    <i class={classes!(card.icon, "text-xl")}></i>
                </div>
                <div class="stat-title">{card.title}</div>
                <div class={classes!("stat-value", value_class)}>{&card.value}</div>
                <div class="stat-desc">{&card.caption}</div>
            </div>
        </div>
    }
}
