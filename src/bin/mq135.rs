use std::env;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use log::{info, warn};

use mq135::batch;
use mq135::calibration::validate_raw;
use mq135::{Environment, Report, Result, Settings};

const USAGE: &str = "usage: mq135 [ADC_VALUE] [TEMPERATURE] [HUMIDITY]\n       \
                     MQ135_BATCH=<readings.csv> mq135";

/// Reading used when no converter value is given on the command line
const DEFAULT_ADC_VALUE: f64 = 3300.;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let settings: Settings<f64> = match env::var_os("MQ135_SETTINGS") {
        Some(path) => {
            let path = PathBuf::from(path);
            info!("loading settings from {}", path.display());
            Settings::from_file(&path)?
        }
        None => Settings::default(),
    };

    let args = env::args().skip(1).collect::<Vec<_>>();

    if let Some(path) = env::var_os("MQ135_BATCH") {
        check_batch_args(&args)?;
        let path = PathBuf::from(path);
        info!("evaluating readings in {}", path.display());
        let rows = batch::evaluate_csv(File::open(&path)?, &settings)?;
        return batch::write_csv(io::stdout().lock(), &rows);
    }

    let (adc_value, environment) = parse_args(&args, &settings.environment)?;

    let raw = settings.adc.to_raw(adc_value);
    if let Err(e) = validate_raw(raw) {
        warn!("{e}");
    }

    let report = Report::evaluate(raw, &environment, &settings.calibration);
    println!("\n{report}");

    Ok(())
}

/// Readings come from the batch file, so any positional argument is a mistake
fn check_batch_args(args: &[String]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(format!("unexpected arguments {args:?} in batch mode\n{USAGE}").into())
    }
}

/// Converter value and ambient conditions from the positional arguments
///
/// Missing arguments fall back to [`DEFAULT_ADC_VALUE`] and the conditions in `defaults`.
fn parse_args(args: &[String], defaults: &Environment<f64>) -> Result<(f64, Environment<f64>)> {
    if args.len() > 3 {
        return Err(USAGE.into());
    }
    let arg = |index: usize, default: f64| -> Result<f64> {
        args.get(index).map_or(Ok(default), |value| {
            value
                .parse::<f64>()
                .map_err(|e| format!("invalid argument {value:?}: {e}\n{USAGE}").into())
        })
    };

    let adc_value = arg(0, DEFAULT_ADC_VALUE)?;
    let environment = Environment {
        temperature: arg(1, defaults.temperature)?,
        humidity: arg(2, defaults.humidity)?,
    };
    Ok((adc_value, environment))
}
