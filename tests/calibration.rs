use std::path::PathBuf;

use proptest::prelude::*;
use serde::Serialize;
use tempdir::TempDir;

use mq135::calibration::{AdcConversion, Calibration, Settings};
use mq135::correction::Environment;
use mq135::Result;

fn write_settings<T: Serialize>(test_name: &str, settings: &T) -> Result<(TempDir, PathBuf)> {
    let tmp_dir = TempDir::new(test_name)?;
    let path = tmp_dir.path().join("sensor.toml");
    std::fs::write(&path, toml::to_string(settings)?)?;
    Ok((tmp_dir, path))
}

#[test]
fn settings_written_to_disk_are_read_back() -> Result<()> {
    let settings = Settings {
        calibration: Calibration {
            rload: 20.,
            rzero: 41.7,
            ..Calibration::default()
        },
        adc: AdcConversion {
            offset: 0.,
            input_high: 4095.,
            ..AdcConversion::default()
        },
        environment: Environment {
            temperature: 18.5,
            humidity: 55.,
        },
    };

    let (_tmp_dir, path) = write_settings("settings_written_to_disk_are_read_back", &settings)?;
    let loaded: Settings<f64> = Settings::from_file(&path)?;

    assert_eq!(loaded, settings);
    Ok(())
}

#[test]
fn partial_file_keeps_datasheet_defaults() -> Result<()> {
    let tmp_dir = TempDir::new("partial_file_keeps_datasheet_defaults")?;
    let path = tmp_dir.path().join("sensor.toml");
    std::fs::write(&path, "[calibration]\nrzero = 88.2\n")?;

    let loaded: Settings<f64> = Settings::from_file(&path)?;

    approx::assert_relative_eq!(loaded.calibration.rzero, 88.2);
    approx::assert_relative_eq!(loaded.calibration.para, 116.602_068_2);
    approx::assert_relative_eq!(loaded.calibration.atmoco2, 397.13);
    assert_eq!(loaded.adc, AdcConversion::default());
    assert_eq!(loaded.environment, Environment::default());
    Ok(())
}

#[test]
fn missing_settings_file_is_an_error() -> Result<()> {
    let tmp_dir = TempDir::new("missing_settings_file_is_an_error")?;
    let result = Settings::<f64>::from_file(&tmp_dir.path().join("absent.toml"));

    assert!(result.is_err());
    Ok(())
}

#[test]
fn calibrating_a_unit_anchors_it_at_the_atmospheric_level() -> Result<()> {
    // Take an outdoor reading, derive the unit's rzero, then store it as that unit's settings
    let outdoor_adc_value = 2750.;
    let datasheet: Settings<f64> = Settings::default();
    let raw = datasheet.adc.to_raw(outdoor_adc_value);
    let environment = Environment::default();

    let unit = Settings {
        calibration: datasheet
            .calibration
            .with_rzero(datasheet.calibration.corrected_r_zero(raw, &environment)),
        ..datasheet
    };
    let (_tmp_dir, path) =
        write_settings("calibrating_a_unit_anchors_it_at_the_atmospheric_level", &unit)?;
    let loaded: Settings<f64> = Settings::from_file(&path)?;

    approx::assert_relative_eq!(
        loaded.calibration.corrected_ppm(raw, &environment),
        397.13,
        max_relative = 1e-9
    );
    Ok(())
}

proptest! {
    #[test]
    fn rzero_and_ppm_are_inverse(resistance in 0.5f64..500.) {
        let calibration: Calibration<f64> = Calibration::default();
        // Choose the reading whose divider resistance is exactly `resistance`
        let raw = 1023. / (resistance / calibration.rload + 1.);
        approx::assert_relative_eq!(calibration.resistance(raw), resistance, max_relative = 1e-12);

        let anchored = calibration.with_rzero(calibration.r_zero(raw));
        prop_assert!((anchored.ppm(raw) - calibration.atmoco2).abs() <= 1e-9 * calibration.atmoco2);
    }
}
