use std::fmt;

use num_traits::Float;
use serde::Serialize;

use crate::calibration::Calibration;
use crate::correction::Environment;

/// The values reported for one reading
///
/// Values are kept at full precision. Rounding happens only when the report is displayed, to
/// the nearest integer with ties going to the even neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Report<E> {
    pub rzero: E,
    pub corrected_rzero: E,
    pub resistance: E,
    pub ppm: E,
    pub corrected_ppm: E,
}

impl<E: Float> Report<E> {
    /// Evaluate every quantity for the 10 bit scale reading `raw`
    pub fn evaluate(raw: E, environment: &Environment<E>, calibration: &Calibration<E>) -> Self {
        Self {
            rzero: calibration.r_zero(raw),
            corrected_rzero: calibration.corrected_r_zero(raw, environment),
            resistance: calibration.resistance(raw),
            ppm: calibration.ppm(raw),
            corrected_ppm: calibration.corrected_ppm(raw, environment),
        }
    }
}

impl<E: Float + fmt::Display> fmt::Display for Report<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MQ135 Gas Sensor:")?;
        writeln!(f, "\tMQ135 RZero: {}", round_half_even(self.rzero))?;
        writeln!(f, "\tCorrected RZero: {}", round_half_even(self.corrected_rzero))?;
        writeln!(f, "\tResistance: {}", round_half_even(self.resistance))?;
        writeln!(f, "\tPPM: {}", round_half_even(self.ppm))?;
        write!(f, "\tCorrected PPM: {} ppm", round_half_even(self.corrected_ppm))
    }
}

#[allow(clippy::float_cmp)]
fn round_half_even<E: Float>(x: E) -> E {
    let two = E::one() + E::one();
    if (x - x.trunc()).abs() == two.recip() {
        (x / two).round() * two
    } else {
        x.round()
    }
}
