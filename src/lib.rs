#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// #![warn(clippy::cargo)]

pub mod batch;
pub mod calibration;
pub mod correction;
pub mod math;
pub mod report;
pub mod sensor;

pub use calibration::{AdcConversion, Calibration, Settings};
pub use correction::{CorrectionCoefficients, Environment};
pub use report::Report;

pub type Result<T> = ::std::result::Result<T, Box<dyn ::std::error::Error>>;
