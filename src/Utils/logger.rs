use crate::calculator::engine::{Graph2D, Surface};
use crate::calculator::errors::CalcError;
use chrono::Local;
use csv::Writer;
use log::info;
use simplelog::*;
use std::fs::File;
use std::path::Path;

/// Log level by name (`debug` to `error`, or `off`); anything else is a configuration error.
pub fn level_from_str(level: &str) -> Result<LevelFilter, CalcError> {
    match level.trim().to_lowercase().as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" => Ok(LevelFilter::Off),
        other => Err(CalcError::Config(format!(
            "loglevel must be debug, info, warn, error or off, got '{}'",
            other
        ))),
    }
}

/// Default log file name, `log_<date>_<time>.txt`.
pub fn timestamped_log_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Terminal logger, plus a file logger when `log_file` is given.
///
/// A second call keeps the logger of the first one; that is not an error.
pub fn init_logger(level: &str, log_file: Option<&str>) -> Result<(), CalcError> {
    let level = level_from_str(level)?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));
    if let Some(name) = log_file {
        let file = File::create(name)?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    if CombinedLogger::init(loggers).is_ok() {
        info!("logger initialized at level {}", level);
    }
    Ok(())
}

/// Two columns: `x` and `f(x)`. Gaps are written as `NaN`.
pub fn save_graph_to_csv<P: AsRef<Path>>(path: P, graph: &Graph2D) -> Result<(), CalcError> {
    let mut writer = Writer::from_path(path.as_ref())?;
    writer.write_record(["x", "f(x)"])?;
    for (x, y) in graph.xs.iter().zip(graph.ys.iter()) {
        writer.write_record([x.to_string(), y.to_string()])?;
    }
    writer.flush()?;
    info!("graph of '{}' saved to {}", graph.expression, path.as_ref().display());
    Ok(())
}

/// Grid layout: the header row holds the x values, every following row starts with
/// its y value followed by the z values of that row.
pub fn save_surface_to_csv<P: AsRef<Path>>(path: P, surface: &Surface) -> Result<(), CalcError> {
    let mut writer = Writer::from_path(path.as_ref())?;
    let mut header = vec!["y\\x".to_string()];
    header.extend(surface.xs.iter().map(|x| x.to_string()));
    writer.write_record(&header)?;
    for (i, row) in surface.z.row_iter().enumerate() {
        let mut record = vec![surface.ys[i].to_string()];
        record.extend(row.iter().map(|z| z.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    info!("surface of '{}' saved to {}", surface.expression, path.as_ref().display());
    Ok(())
}
