//! Request pipelines behind the HTTP handlers

pub mod advice;
pub mod air;
pub mod alerts;
pub mod daily;

pub use advice::{AdviceRequest, AdviceService};
pub use air::AirService;
pub use alerts::AlertService;
pub use daily::DailyForecastService;
