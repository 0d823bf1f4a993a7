//! Frame driver: input polling, frame timing, pacing.
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

use crate::audio_manager::SoundBoard;
use crate::core::game::{Game, Phase};
use crate::core::process_events::{Action, action_for_key};
use crate::error::Result;
use crate::render::casters::Projection;
use crate::render::framebuffer::Framebuffer;
use crate::render::render3d::Renderer;
use crate::render::screens::draw_phase;
use crate::render::terminal::TerminalSurface;

pub trait InputSource {
    /// Next action. With `wait` false this must not block.
    fn next_action(&mut self, wait: bool) -> Result<Option<Action>>;
}

pub trait FrameSink {
    fn present(&mut self, fb: &Framebuffer) -> Result<()>;
}

/// A sink that has to be taken over before the first frame and handed back afterwards.
pub trait Surface: FrameSink {
    fn enter(&mut self) -> Result<()>;
    fn exit(&mut self) -> Result<()>;
}

pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn next_action(&mut self, wait: bool) -> Result<Option<Action>> {
        if !wait && !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(action_for_key(key)),
            _ => Ok(None),
        }
    }
}

impl FrameSink for TerminalSurface {
    fn present(&mut self, fb: &Framebuffer) -> Result<()> {
        self.draw(fb)
    }
}

impl Surface for TerminalSurface {
    fn enter(&mut self) -> Result<()> {
        TerminalSurface::enter(self)
    }

    fn exit(&mut self) -> Result<()> {
        TerminalSurface::exit(self)
    }
}

/// Wall-clock time between loop iterations.
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }

    /// Time since the previous tick, and the new tick instant.
    pub fn tick(&mut self) -> (Duration, Instant) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        (elapsed, now)
    }

    /// Forget time spent outside the play loop, e.g. on a menu.
    pub fn restart(&mut self) {
        self.last = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Take over `surface`, run the game, then always stop the audio and restore the surface,
/// even when entering it failed halfway. The first error wins.
pub fn run_on<S: Surface>(
    game: &mut Game,
    input: &mut dyn InputSource,
    surface: &mut S,
    audio: &mut dyn SoundBoard,
) -> Result<()> {
    let mut result = surface.enter();
    if result.is_ok() {
        result = run(game, input, surface, audio);
    }
    audio.release_all();
    if let Err(e) = surface.exit() {
        log::warn!("terminal restore failed: {e}");
        if result.is_ok() {
            result = Err(e);
        }
    }
    if let Err(e) = &result {
        log::error!("game loop failed: {e}");
    }
    result
}

/// Run until the player chooses to exit.
pub fn run(
    game: &mut Game,
    input: &mut dyn InputSource,
    sink: &mut dyn FrameSink,
    audio: &mut dyn SoundBoard,
) -> Result<()> {
    let config = game.config().clone();
    let mut fb = Framebuffer::new(config.screen_width, config.screen_height);
    let mut renderer = Renderer::new(Projection::from_config(&config));
    let mut clock = FrameClock::new();
    let mut frames: u64 = 0;

    loop {
        let phase = game.phase();
        if phase == Phase::Exit {
            break;
        }

        if !phase.is_realtime() {
            draw_phase(&mut fb, phase);
            sink.present(&fb)?;
            let action = input.next_action(true)?;
            game.update(action, Duration::ZERO, Instant::now(), audio)?;
            clock.restart();
            continue;
        }

        let (elapsed, now) = clock.tick();
        let action = input.next_action(false)?;
        game.update(action, elapsed, now, audio)?;
        if game.phase() != Phase::Playing {
            continue;
        }

        renderer.render_play(&mut fb, game.session(), elapsed);
        sink.present(&fb)?;
        frames += 1;
        if frames % 600 == 0 {
            log::trace!("{frames} frames rendered");
        }
        thread::sleep(config.frame_interval);
    }
    log::info!("leaving after {frames} play frames");
    Ok(())
}
