use anyhow::Context;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::path::Path;

fn config() -> Config {
    ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build()
}

/// Initialize terminal logging at `level`, plus a DEBUG level log file when
/// `file` is given. Call once, before any game starts.
pub fn init(level: LevelFilter, file: Option<&Path>) -> anyhow::Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));
    if let Some(path) = file {
        let file = File::create(path)
            .with_context(|| format!("create log file {}", path.display()))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, config(), file));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}
