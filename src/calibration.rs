use std::fs;
use std::path::Path;

use log::debug;
use num_traits::Float;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::correction::{correction_factor, CorrectionCoefficients, Environment};
use crate::math::{constant, rescale};
use crate::sensor::{self, FULL_SCALE};
use crate::Result;

/// Constants describing one physical MQ135 unit and its circuit
///
/// The defaults are the generic datasheet values. `rzero` in particular should be replaced by the
/// value measured for a specific sensor, see [`Calibration::r_zero`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, bound(deserialize = "E: Float + Deserialize<'de>"))]
pub struct Calibration<E> {
    /// Load resistance on the board in kOhm
    pub rload: E,
    /// Sensor resistance at the atmospheric CO2 level in kOhm
    pub rzero: E,
    /// Prefactor of the ppm power law
    pub para: E,
    /// Exponent of the ppm power law
    pub parb: E,
    /// Atmospheric CO2 level in ppm used when calibrating
    pub atmoco2: E,
    pub correction: CorrectionCoefficients<E>,
}

impl<E: Float> Default for Calibration<E> {
    fn default() -> Self {
        Self {
            rload: constant(10.),
            rzero: constant(76.63),
            para: constant(116.602_068_2),
            parb: constant(2.769_034_857),
            atmoco2: constant(397.13),
            correction: CorrectionCoefficients::default(),
        }
    }
}

impl<E: Float> Calibration<E> {
    pub fn correction_factor(&self, environment: &Environment<E>) -> E {
        correction_factor(environment, &self.correction)
    }

    pub fn resistance(&self, raw: E) -> E {
        sensor::resistance(raw, self.rload)
    }

    pub fn corrected_resistance(&self, raw: E, environment: &Environment<E>) -> E {
        sensor::corrected_resistance(raw, self.rload, environment, &self.correction)
    }

    pub fn ppm(&self, raw: E) -> E {
        sensor::ppm(self.para, self.rzero, self.parb, raw, self.rload)
    }

    pub fn corrected_ppm(&self, raw: E, environment: &Environment<E>) -> E {
        sensor::corrected_ppm(
            self.para,
            self.rzero,
            self.parb,
            raw,
            self.rload,
            environment,
            &self.correction,
        )
    }

    /// The `rzero` this unit would need for `raw` to read exactly `atmoco2`
    ///
    /// Take the reading after the sensor has burned in, in outdoor air.
    pub fn r_zero(&self, raw: E) -> E {
        sensor::r_zero(raw, self.rload, self.atmoco2, self.para, self.parb)
    }

    pub fn corrected_r_zero(&self, raw: E, environment: &Environment<E>) -> E {
        sensor::corrected_r_zero(
            raw,
            self.rload,
            self.atmoco2,
            self.para,
            self.parb,
            environment,
            &self.correction,
        )
    }

    /// A copy of this calibration anchored on `rzero`
    #[must_use]
    pub fn with_rzero(mut self, rzero: E) -> Self {
        self.rzero = rzero;
        self
    }
}

/// Mapping from the native range of an external converter onto the 10 bit scale
///
/// The defaults describe an ADS1115 on a Raspberry Pi, which reads 0..26690 with a fixed offset
/// of 565 counts.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, bound(deserialize = "E: Float + Deserialize<'de>"))]
pub struct AdcConversion<E> {
    /// Counts subtracted from every reading before rescaling
    pub offset: E,
    pub input_low: E,
    pub input_high: E,
    pub output_low: E,
    pub output_high: E,
}

impl<E: Float> Default for AdcConversion<E> {
    fn default() -> Self {
        Self {
            offset: constant(565.),
            input_low: E::zero(),
            input_high: constant(26_690.),
            output_low: E::zero(),
            output_high: constant(FULL_SCALE),
        }
    }
}

impl<E: Float> AdcConversion<E> {
    /// Convert a converter count into the reading expected by the sensor formulas
    pub fn to_raw(&self, adc_value: E) -> E {
        rescale(
            adc_value - self.offset,
            self.input_low,
            self.input_high,
            self.output_low,
            self.output_high,
        )
    }
}

/// Everything a caller needs to evaluate readings from one sensor unit
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, bound(deserialize = "E: Float + Deserialize<'de>"))]
pub struct Settings<E> {
    pub calibration: Calibration<E>,
    pub adc: AdcConversion<E>,
    /// Conditions assumed when no temperature or humidity is measured
    pub environment: Environment<E>,
}

impl<E: Float> Default for Settings<E> {
    fn default() -> Self {
        Self {
            calibration: Calibration::default(),
            adc: AdcConversion::default(),
            environment: Environment::default(),
        }
    }
}

impl<E: Float + DeserializeOwned> Settings<E> {
    /// Read settings from a TOML file
    ///
    /// Any table or key missing from the file takes its default value, so an empty file is
    /// valid.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML for these settings.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(format!("settings file {} not found", path.display()).into());
        }
        let contents = fs::read_to_string(path)?;
        let settings = Self::from_toml(&contents)?;
        debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from a TOML document
    ///
    /// # Errors
    /// Returns an error if `contents` is not valid TOML for these settings.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Check that `raw` is a usable 10 bit scale reading
///
/// The sensor formulas accept anything and propagate infinities and NaN. Callers that would
/// rather reject such readings up front can call this first.
///
/// # Errors
/// Returns an error if `raw` is not finite, not positive, or above full scale.
pub fn validate_raw<E: Float + std::fmt::Display>(raw: E) -> Result<E> {
    if !raw.is_finite() {
        return Err(format!("reading {raw} is not finite").into());
    }
    if raw <= E::zero() {
        return Err(format!("reading {raw} must be positive").into());
    }
    if raw > constant(FULL_SCALE) {
        return Err(format!("reading {raw} is above full scale {FULL_SCALE}").into());
    }
    Ok(raw)
}
