//! Domain models for Wearcast

mod air;
mod alert;
mod coverage;
mod forecast;
mod parameter;
mod photo;
mod sample;
mod trip;

pub use air::*;
pub use alert::*;
pub use coverage::*;
pub use forecast::*;
pub use parameter::*;
pub use photo::*;
pub use sample::*;
pub use trip::*;
