// main.rs
use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;

use labyrinth_of_fear::app::{TerminalInput, run_on};
use labyrinth_of_fear::audio_manager::open_sound_board;
use labyrinth_of_fear::config::Args;
use labyrinth_of_fear::core::game::Game;
use labyrinth_of_fear::render::terminal::TerminalSurface;

fn init_logging(args: &Args) -> Result<()> {
    let file = File::create(&args.log_file)
        .with_context(|| format!("cannot create log file {}", args.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.to_config(crossterm::terminal::size().ok());
    log::info!(
        "screen {}x{}, map {}x{}, {} enemies",
        config.screen_width,
        config.screen_height,
        config.map_width,
        config.map_height,
        config.enemy_count
    );

    let mut game = Game::new(config.clone()).context("cannot set up the first session")?;
    let mut audio = open_sound_board(&config.assets_dir);

    let mut surface = TerminalSurface::new();
    let result = run_on(&mut game, &mut TerminalInput, &mut surface, audio.as_mut());
    result.map_err(Into::into)
}
