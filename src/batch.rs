//! Evaluate a file of already acquired readings in one pass

use std::io::{Read, Write};

use log::{debug, warn};
use num_traits::Float;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::calibration::{validate_raw, Settings};
use crate::correction::Environment;
use crate::report::Report;
use crate::Result;

/// One input row: a converter count with optional ambient conditions
#[derive(Deserialize)]
struct Row<E> {
    adc_value: E,
    temperature: Option<E>,
    humidity: Option<E>,
}

/// A reading together with everything reported for it
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Evaluated<E> {
    pub adc_value: E,
    pub raw: E,
    pub temperature: E,
    pub humidity: E,
    pub rzero: E,
    pub corrected_rzero: E,
    pub resistance: E,
    pub ppm: E,
    pub corrected_ppm: E,
}

impl<E: Float> Evaluated<E> {
    fn new(adc_value: E, raw: E, environment: Environment<E>, report: Report<E>) -> Self {
        Self {
            adc_value,
            raw,
            temperature: environment.temperature,
            humidity: environment.humidity,
            rzero: report.rzero,
            corrected_rzero: report.corrected_rzero,
            resistance: report.resistance,
            ppm: report.ppm,
            corrected_ppm: report.corrected_ppm,
        }
    }

    pub fn report(&self) -> Report<E> {
        Report {
            rzero: self.rzero,
            corrected_rzero: self.corrected_rzero,
            resistance: self.resistance,
            ppm: self.ppm,
            corrected_ppm: self.corrected_ppm,
        }
    }
}

/// Evaluate every row of a CSV document with an `adc_value` column
///
/// Optional `temperature` and `humidity` columns override the environment in `settings` row by
/// row; empty cells fall back to it. Readings outside the 10 bit scale are evaluated anyway and
/// logged, so the output lines up with the input.
///
/// # Errors
/// Returns an error if the document is not valid CSV or a cell is not a number.
pub fn evaluate_csv<E, R>(reader: R, settings: &Settings<E>) -> Result<Vec<Evaluated<E>>>
where
    E: Float + DeserializeOwned + std::fmt::Display,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut evaluated = vec![];
    for (line, result) in rdr.deserialize().enumerate() {
        let row: Row<E> = result?;
        let environment = Environment {
            temperature: row.temperature.unwrap_or(settings.environment.temperature),
            humidity: row.humidity.unwrap_or(settings.environment.humidity),
        };
        let raw = settings.adc.to_raw(row.adc_value);
        if let Err(e) = validate_raw(raw) {
            warn!("row {}: {}", line + 1, e);
        }
        let report = Report::evaluate(raw, &environment, &settings.calibration);
        evaluated.push(Evaluated::new(row.adc_value, raw, environment, report));
    }
    debug!("evaluated {} readings", evaluated.len());

    Ok(evaluated)
}

/// Write evaluated readings as CSV with a header row
///
/// # Errors
/// Returns an error if serialisation or the underlying writer fails.
pub fn write_csv<E: Serialize, W: Write>(writer: W, rows: &[Evaluated<E>]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
