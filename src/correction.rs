use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::math::constant;

/// Ambient conditions at the time of a reading
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, bound(deserialize = "E: Float + Deserialize<'de>"))]
pub struct Environment<E> {
    /// Air temperature in degrees Celsius
    pub temperature: E,
    /// Relative humidity in percent
    pub humidity: E,
}

impl<E: Float> Default for Environment<E> {
    /// Typical indoor conditions, used when no temperature or humidity sensor is available
    fn default() -> Self {
        Self {
            temperature: constant(22.),
            humidity: constant(65.),
        }
    }
}

/// Coefficients of the empirical temperature and humidity dependence model
///
/// Below 20 degrees Celsius the sensor response is modelled as quadratic in temperature with a
/// linear humidity offset about 33 %RH,
///
/// $$
///     f = a t^2 - b t + c - (h - 33) d,
/// $$
///
/// and at or above 20 degrees as linear in both variables,
///
/// $$
///     f = e t + f h + g.
/// $$
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, bound(deserialize = "E: Float + Deserialize<'de>"))]
pub struct CorrectionCoefficients<E> {
    pub a: E,
    pub b: E,
    pub c: E,
    pub d: E,
    pub e: E,
    pub f: E,
    pub g: E,
}

impl<E: Float> Default for CorrectionCoefficients<E> {
    fn default() -> Self {
        Self {
            a: constant(0.000_35),
            b: constant(0.027_18),
            c: constant(1.395_38),
            d: constant(0.001_8),
            e: constant(-0.003_333_333),
            f: constant(-0.001_923_077),
            g: constant(1.130_128_205),
        }
    }
}

/// Temperature at which the model switches from the quadratic to the linear branch
pub const BRANCH_TEMPERATURE: f64 = 20.;

/// Humidity about which the low temperature branch is linearised
const REFERENCE_HUMIDITY: f64 = 33.;

/// Compute the factor by which the sensor resistance is scaled by ambient conditions
///
/// The two branches do not meet at 20 degrees Celsius. The step is part of the empirical fit
/// and is kept as is.
pub fn correction_factor<E: Float>(
    environment: &Environment<E>,
    coefficients: &CorrectionCoefficients<E>,
) -> E {
    let t = environment.temperature;
    let h = environment.humidity;
    let CorrectionCoefficients { a, b, c, d, e, f, g } = *coefficients;

    if t < constant(BRANCH_TEMPERATURE) {
        a * t * t - b * t + c - (h - constant(REFERENCE_HUMIDITY)) * d
    } else {
        e * t + f * h + g
    }
}
