//! Top-level phases: menu, instructions, play, victory, defeat.
//!
//! Every transition happens inside one bounded loop. Finishing a game
//! (either way) waits for the acknowledgment key, then replaces the whole
//! session and goes back to the menu.
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::audio_manager::{Cue, SoundBoard};
use crate::config::GameConfig;
use crate::core::process_events::{Action, Footsteps, MovementHold};
use crate::core::session::{FrameEvent, GameSession};
use crate::error::Result;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Exit,
    Instructions,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Start, MenuItem::Exit, MenuItem::Instructions];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Start => "START",
            MenuItem::Exit => "EXIT",
            MenuItem::Instructions => "INSTRUCTIONS",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    MainMenu { selected: usize },
    Instructions,
    Playing,
    Victory,
    Defeat,
    Exit,
}

impl Phase {
    /// Only play runs against the clock; every other phase just waits for a key.
    pub fn is_realtime(self) -> bool {
        self == Phase::Playing
    }
}

pub struct Game {
    config: GameConfig,
    phase: Phase,
    session: GameSession,
    seeds: StdRng,
    hold: MovementHold,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut seeds = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = GameSession::generate(&config, StdRng::seed_from_u64(seeds.next_u64()))?;
        let hold = MovementHold::new(config.footstep_hold);
        Ok(Self { config, phase: Phase::MainMenu { selected: 0 }, session, seeds, hold })
    }

    /// Start from an already built session, e.g. a fixed test map.
    pub fn with_session(config: GameConfig, session: GameSession) -> Self {
        let seeds = StdRng::seed_from_u64(config.seed.unwrap_or_default());
        let hold = MovementHold::new(config.footstep_hold);
        Self { config, phase: Phase::MainMenu { selected: 0 }, session, seeds, hold }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Feed one iteration of input. `elapsed` is the raw time since the previous iteration.
    pub fn update(
        &mut self,
        action: Option<Action>,
        elapsed: Duration,
        now: Instant,
        audio: &mut dyn SoundBoard,
    ) -> Result<()> {
        if action == Some(Action::Quit) {
            audio.release_all();
            self.set_phase(Phase::Exit);
            return Ok(());
        }
        match self.phase {
            Phase::MainMenu { selected } => self.on_menu(selected, action, audio),
            Phase::Instructions => {
                if action == Some(Action::Select) {
                    self.set_phase(Phase::MainMenu { selected: 0 });
                }
            }
            Phase::Playing => self.on_play(action, elapsed, now, audio)?,
            Phase::Victory | Phase::Defeat => {
                if action == Some(Action::Select) {
                    audio.release_all();
                    self.reset()?;
                    self.set_phase(Phase::MainMenu { selected: 0 });
                }
            }
            Phase::Exit => {}
        }
        Ok(())
    }

    fn on_menu(&mut self, selected: usize, action: Option<Action>, audio: &mut dyn SoundBoard) {
        let count = MenuItem::ALL.len();
        match action {
            Some(Action::MenuUp) => {
                self.phase = Phase::MainMenu { selected: (selected + count - 1) % count };
            }
            Some(Action::MenuDown) => {
                self.phase = Phase::MainMenu { selected: (selected + 1) % count };
            }
            Some(Action::Select) => match MenuItem::ALL[selected % count] {
                MenuItem::Start => {
                    audio.start_loop(Cue::Music);
                    self.set_phase(Phase::Playing);
                }
                MenuItem::Exit => {
                    audio.release_all();
                    self.set_phase(Phase::Exit);
                }
                MenuItem::Instructions => self.set_phase(Phase::Instructions),
            },
            _ => {}
        }
    }

    fn on_play(
        &mut self,
        action: Option<Action>,
        elapsed: Duration,
        now: Instant,
        audio: &mut dyn SoundBoard,
    ) -> Result<()> {
        let moved = action.is_some_and(Action::is_movement);
        match self.hold.observe(moved, now) {
            Some(Footsteps::Start) => audio.start_loop(Cue::Footsteps),
            Some(Footsteps::Stop) => audio.stop_loop(Cue::Footsteps),
            None => {}
        }

        let step = self.config.step_elapsed(elapsed);
        match self.session.step(action, step, &self.config)? {
            FrameEvent::Continue => {}
            FrameEvent::Victory => {
                self.finish(audio);
                audio.play_once(Cue::Door);
                self.set_phase(Phase::Victory);
            }
            FrameEvent::Defeat => {
                self.finish(audio);
                audio.play_once(Cue::Jumpscare);
                audio.play_once(Cue::Scream);
                self.set_phase(Phase::Defeat);
            }
        }
        Ok(())
    }

    fn finish(&mut self, audio: &mut dyn SoundBoard) {
        self.hold.reset();
        audio.stop_loop(Cue::Footsteps);
    }

    /// New map, new player, new enemies.
    fn reset(&mut self) -> Result<()> {
        self.session = GameSession::generate(&self.config, StdRng::seed_from_u64(self.seeds.next_u64()))?;
        self.hold.reset();
        Ok(())
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::info!("phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
    }
}
