//! Formula chain from a raw MQ135 reading to CO2 concentration
//!
//! Every function here is pure. Nothing is validated: a zero reading gives an infinite
//! resistance, a non-positive resistance ratio gives NaN, and both propagate to the caller.

use num_traits::Float;

use crate::correction::{correction_factor, CorrectionCoefficients, Environment};
use crate::math::constant;

/// Full scale of the 10 bit reading the divider formula is written for
pub const FULL_SCALE: f64 = 1023.;

/// Sensor resistance in kOhm from a 10 bit scale reading and the load resistance
///
/// The sensor and the load resistor form a voltage divider, so
/// $R_s = (1023 / v - 1) R_L$.
pub fn resistance<E: Float>(raw: E, rload: E) -> E {
    (constant::<E>(FULL_SCALE) / raw - E::one()) * rload
}

/// Sensor resistance in kOhm scaled for ambient temperature and humidity
pub fn corrected_resistance<E: Float>(
    raw: E,
    rload: E,
    environment: &Environment<E>,
    coefficients: &CorrectionCoefficients<E>,
) -> E {
    resistance(raw, rload) / correction_factor(environment, coefficients)
}

/// CO2 concentration in ppm, assuming CO2 is the only gas present
///
/// Uses the power law fit $\mathrm{ppm} = A (R_s / R_0)^{-B}$.
pub fn ppm<E: Float>(para: E, rzero: E, parb: E, raw: E, rload: E) -> E {
    power_law(para, rzero, parb, resistance(raw, rload))
}

/// CO2 concentration in ppm from the temperature and humidity corrected resistance
#[allow(clippy::too_many_arguments)]
pub fn corrected_ppm<E: Float>(
    para: E,
    rzero: E,
    parb: E,
    raw: E,
    rload: E,
    environment: &Environment<E>,
    coefficients: &CorrectionCoefficients<E>,
) -> E {
    power_law(
        para,
        rzero,
        parb,
        corrected_resistance(raw, rload, environment, coefficients),
    )
}

/// Resistance $R_0$ the sensor would need for the current reading to equal `atmoco2`
///
/// This is the inverse of [`ppm`] and is used to calibrate a physical unit in outdoor air.
pub fn r_zero<E: Float>(raw: E, rload: E, atmoco2: E, para: E, parb: E) -> E {
    inverse_power_law(resistance(raw, rload), atmoco2, para, parb)
}

/// Calibration resistance $R_0$ computed from the corrected resistance
#[allow(clippy::too_many_arguments)]
pub fn corrected_r_zero<E: Float>(
    raw: E,
    rload: E,
    atmoco2: E,
    para: E,
    parb: E,
    environment: &Environment<E>,
    coefficients: &CorrectionCoefficients<E>,
) -> E {
    inverse_power_law(
        corrected_resistance(raw, rload, environment, coefficients),
        atmoco2,
        para,
        parb,
    )
}

fn power_law<E: Float>(para: E, rzero: E, parb: E, resistance: E) -> E {
    para * (resistance / rzero).powf(-parb)
}

fn inverse_power_law<E: Float>(resistance: E, atmoco2: E, para: E, parb: E) -> E {
    resistance * (atmoco2 / para).powf(parb.recip())
}
