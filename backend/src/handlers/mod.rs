//! HTTP handlers

pub mod advice;
pub mod air;
pub mod alerts;
pub mod health;
pub mod params;
pub mod weather;

pub use advice::get_advice;
pub use air::get_air_quality;
pub use alerts::get_alerts;
pub use health::health_check;
pub use weather::get_daily_forecast;
