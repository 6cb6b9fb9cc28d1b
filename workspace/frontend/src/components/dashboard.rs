mod chart;
mod form;
mod stats;
mod view;

pub use chart::PredictionTrendChart;
pub use form::PredictionForm;
pub use stats::SummaryStats;
pub use view::Dashboard;
