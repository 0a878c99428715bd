use std::any::Any;
use std::ops::Deref;
use std::panic;
use std::path::Path;

use anyhow::Result;
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Logs go to a file; the terminal belongs to the game.
pub fn setup(path: &Path, debug: bool) -> Result<()> {
    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{l} {d(%H:%M:%S.%3f)} {f}:{L} {m}{n}",
        )))
        .build(path)?;

    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let config = Config::builder()
        .appender(Appender::builder().build("file-appender", Box::new(file_appender)))
        .build(Root::builder().appender("file-appender").build(level))?;

    log4rs::init_config(config)?;

    // Only once the file is live; the player sees the panic after the terminal is restored
    panic::set_hook(Box::new(|panic_info| {
        let (filename, line) = panic_info
            .location()
            .map(|loc| (loc.file(), loc.line()))
            .unwrap_or(("<unknown>", 0));

        log::error!("A panic occurred at {}:{}: {}", filename, line, panic_cause(panic_info.payload()));
    }));

    Ok(())
}

/// Message carried by a panic payload.
pub fn panic_cause(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<String>()
        .map(String::deref)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("<cause unknown>")
}
