//! One play-through: the maze, the player and the enemies chasing them.
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::core::enemy::{Enemy, populate_enemies, update_enemies};
use crate::core::maze::Maze;
use crate::core::player::{MoveOutcome, Player, Step, Turn};
use crate::core::process_events::Action;
use crate::error::Result;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    Continue,
    /// The player walked into the door.
    Victory,
    /// An enemy shares the player's cell after the enemy update.
    Defeat,
}

pub struct GameSession {
    pub maze: Maze,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    rng: StdRng,
}

impl GameSession {
    /// Fresh map, player on a random floor cell, enemies topped up around them.
    pub fn generate(config: &GameConfig, mut rng: StdRng) -> Result<Self> {
        let maze = Maze::generate(config.map_width, config.map_height, config.wall_probability, &mut rng)?;
        let (row, col) = maze.random_floor_cell(&mut rng, &[])?;
        let player = Player::at_cell(row, col);
        let mut enemies = Vec::with_capacity(config.enemy_count);
        populate_enemies(&mut enemies, &maze, (row, col), config.enemy_count, &mut rng)?;
        log::info!(
            "new session: {}x{} map, door at {:?}, player at ({row}, {col}), {} enemies",
            maze.width(),
            maze.height(),
            maze.door(),
            enemies.len()
        );
        Self::from_parts(maze, player, enemies, rng)
    }

    /// Session over a prepared maze; the overlay is stamped right away.
    pub fn from_parts(maze: Maze, player: Player, enemies: Vec<Enemy>, rng: StdRng) -> Result<Self> {
        let mut session = Self { maze, player, enemies, rng };
        session.rebuild_overlay()?;
        Ok(session)
    }

    /// One simulation step: player input, enemy update, overlay rebuild, capture check.
    pub fn step(&mut self, action: Option<Action>, elapsed: f32, config: &GameConfig) -> Result<FrameEvent> {
        match action {
            Some(Action::TurnLeft) => self.player.turn(Turn::Left, elapsed, config.turn_speed),
            Some(Action::TurnRight) => self.player.turn(Turn::Right, elapsed, config.turn_speed),
            Some(Action::Forward) => {
                let outcome = self.player.try_move(&self.maze, Step::Forward, elapsed, config.move_speed)?;
                if outcome == MoveOutcome::ReachedDoor {
                    return Ok(FrameEvent::Victory);
                }
            }
            Some(Action::Backward) => {
                self.player.try_move(&self.maze, Step::Backward, elapsed, config.move_speed)?;
            }
            _ => {}
        }

        update_enemies(
            &mut self.enemies,
            &self.maze,
            elapsed,
            config.enemy_speed,
            config.wander_chance,
            &mut self.rng,
        )?;
        self.rebuild_overlay()?;

        if self.enemy_caught_player() {
            log::trace!("caught at {:?}", self.player.cell());
            return Ok(FrameEvent::Defeat);
        }
        Ok(FrameEvent::Continue)
    }

    /// Reset the working grid and stamp every enemy on it.
    pub fn rebuild_overlay(&mut self) -> Result<()> {
        self.maze.reset_overlay_from_baseline();
        for enemy in &self.enemies {
            let (row, col) = enemy.cell();
            self.maze.stamp_enemy(row, col)?;
        }
        Ok(())
    }

    pub fn enemy_caught_player(&self) -> bool {
        let cell = self.player.cell();
        self.enemies.iter().any(|e| e.cell() == cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::maze::Cell;
    use rand::SeedableRng;

    fn config() -> GameConfig {
        GameConfig { map_width: 20, map_height: 15, enemy_count: 6, ..GameConfig::default() }
    }

    #[test]
    fn generated_session_starts_on_distinct_floor_cells() {
        let session = GameSession::generate(&config(), StdRng::seed_from_u64(42)).unwrap();
        let (pr, pc) = session.player.cell();
        assert_eq!(session.maze.baseline_at(pr, pc).unwrap(), Cell::Floor);
        assert_eq!(session.enemies.len(), 6);
        for e in &session.enemies {
            let (r, c) = e.cell();
            assert_eq!(session.maze.baseline_at(r, c).unwrap(), Cell::Floor);
            assert_ne!((r, c), (pr, pc));
            assert_eq!(session.maze.cell_at(r, c).unwrap(), Cell::Enemy);
        }
    }

    #[test]
    fn defeat_when_enemy_reaches_player_cell() {
        let maze = Maze::from_rows(&["######", "#...D#", "######"]).unwrap();
        let player = Player::new(1.5, 1.5, 0.0);
        let enemies = vec![Enemy::new(2.1, 1.5, -1.0, 0.0)];
        let cfg = GameConfig { wander_chance: 0.0, ..GameConfig::default() };
        let mut session = GameSession::from_parts(maze, player, enemies, StdRng::seed_from_u64(0)).unwrap();

        assert_eq!(session.step(None, 0.01, &cfg).unwrap(), FrameEvent::Continue);
        assert_eq!(session.step(None, 0.1, &cfg).unwrap(), FrameEvent::Defeat);
    }

    #[test]
    fn victory_short_circuits_the_enemy_update() {
        let maze = Maze::from_rows(&["#####", "#.D.#", "#####"]).unwrap();
        // heading pi/2 faces +x
        let player = Player::new(1.5, 1.5, std::f32::consts::FRAC_PI_2);
        let enemies = vec![Enemy::new(3.5, 1.5, 0.0, 0.0)];
        let mut session = GameSession::from_parts(maze, player, enemies, StdRng::seed_from_u64(0)).unwrap();
        let cfg = GameConfig::default();
        assert_eq!(session.step(Some(Action::Forward), 0.1, &cfg).unwrap(), FrameEvent::Victory);
        assert_eq!(session.player.x, 1.5);
    }
}
