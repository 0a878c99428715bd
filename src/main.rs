mod app;
mod board;
mod config;
mod difficulty;
mod error;
mod game;
mod input;
mod logging;
mod menu;
mod render;
mod scores;
mod snake;
mod state;
mod term;

use std::panic::{self, AssertUnwindSafe};

use anyhow::anyhow;
use clap::Parser;

use app::App;
use config::{Args, Settings};
use scores::{MemoryStorage, ScoreStorage, ScoreStore, YamlFileStorage};
use term::TermGuard;

fn main() {
    let settings = Settings::from_args(Args::parse());

    if let Err(e) = logging::setup(&settings.log_file, settings.debug) {
        eprintln!("Logging disabled: {e:#}");
    }
    log::info!("Starting with {:?}", settings);

    let storage: Box<dyn ScoreStorage> = match &settings.scores_file {
        Some(path) => Box::new(YamlFileStorage::new(path.clone())),
        None => Box::new(MemoryStorage::default()),
    };
    let scores = ScoreStore::new(storage);

    let result = catch_crash(|| {
        // Dropping the guard restores the terminal before anything is printed
        let guard = TermGuard::acquire();
        let mut input = guard.input();
        let mut screen = guard.screen();
        let result = App::new(&mut input, &mut screen, &settings, scores).run();
        result
    });

    match result {
        Ok(()) => println!("Thanks for playing!"),
        Err(e) => {
            log::error!("{e:#}");
            println!("An error occurred: {e:#}");
        }
    }
}

/// Runs `play`, turning a panic into an error. Unwinding drops the terminal
/// guard first, so the caller can report it on a restored screen.
fn catch_crash<F: FnOnce() -> anyhow::Result<()>>(play: F) -> anyhow::Result<()> {
    match panic::catch_unwind(AssertUnwindSafe(play)) {
        Ok(result) => result,
        Err(payload) => Err(anyhow!("the game crashed: {}", logging::panic_cause(payload.as_ref()))),
    }
}
