use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};
use std::fmt::Arguments;
use std::fs;
use std::path::Path;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "experiment.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Installs the experiment logger: coloured lines on stderr and plain lines appended to
/// `logs/experiment.log`, both at the level named by `RUST_LOG` (`info` when unset or invalid).
///
/// Call once from `main` before the experiment starts. A missing or unwritable `logs/`
/// directory only disables the file output.
pub fn init() {
    let log_file_path = Path::new(LOG_DIR).join(LOG_FILE);
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    let console = Dispatch::new()
        .format(move |out, message, record| write_line(out, message, record, colors.color(record.level())))
        .chain(std::io::stderr());

    let mut dispatch = Dispatch::new().level(level_from_env()).level_for("serde", LevelFilter::Warn).chain(console);

    match fs::create_dir_all(LOG_DIR).and_then(|_| fern::log_file(&log_file_path)) {
        Ok(file) => {
            dispatch = dispatch.chain(Dispatch::new().format(|out, message, record| write_line(out, message, record, record.level())).chain(file));
        }
        Err(e) => eprintln!("Experiment log '{}' unavailable, logging to stderr only: {}", log_file_path.display(), e),
    }

    if let Err(e) = dispatch.apply() {
        eprintln!("Failed to install the experiment logger: {}", e);
        return;
    }

    log::info!("Logger initialized, writing to stderr and '{}'.", log_file_path.display());
}

fn level_from_env() -> LevelFilter {
    std::env::var("RUST_LOG").ok().and_then(|level| level.parse().ok()).unwrap_or(LevelFilter::Info)
}

fn write_line(out: FormatCallback<'_>, message: &Arguments<'_>, record: &Record<'_>, level: impl std::fmt::Display) {
    out.finish(format_args!("[{} {} {}] {}", Local::now().format(TIMESTAMP_FORMAT), level, record.target(), message))
}
