use anyhow::{Result, anyhow};
use common::{FormField, SummaryCards};
use tracing::{debug, error, info};

use crate::cli::PredictArgs;
use crate::client::PredictionClient;
use crate::config::ClientSettings;
use crate::session::{FormInput, PredictionSession};

impl PredictArgs {
    pub fn to_form_input(&self) -> FormInput {
        [
            (FormField::Date, &self.date),
            (FormField::DailySalesPercentage, &self.daily_sales_percentage),
            (FormField::MarketShare, &self.market_share),
            (FormField::Political, &self.political),
            (FormField::Marketing, &self.marketing),
            (FormField::Budget, &self.budget),
            (FormField::Machineries, &self.machineries),
            (FormField::Region, &self.region),
        ]
        .into_iter()
        .map(|(field, value)| (field, value.clone()))
        .collect()
    }
}

pub async fn predict(settings: &ClientSettings, args: &PredictArgs) -> Result<SummaryCards> {
    info!("Requesting prediction from {}", settings.endpoint);
    debug!(?args, "prediction arguments");

    let client = PredictionClient::from_settings(settings)?;
    let mut session = PredictionSession::new(client);
    session.fill(&args.to_form_input());

    match session.submit().await {
        Ok(_) => {
            let cards = SummaryCards::from_result(session.state().result.as_ref());
            println!("{}", cards);
            Ok(cards)
        }
        Err(e) => {
            error!("Prediction failed: {}", e);
            Err(anyhow!(e.user_message()))
        }
    }
}
