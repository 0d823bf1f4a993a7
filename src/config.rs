//! Game tunables and the command line that overrides them.
use std::f32::consts::PI;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Every constant the simulation and renderer read.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub screen_width: usize,
    pub screen_height: usize,
    pub map_width: usize,
    pub map_height: usize,
    pub wall_probability: f64,
    pub enemy_count: usize,
    /// Horizontal field of view in radians.
    pub fov: f32,
    /// Render horizon in map units.
    pub depth: f32,
    pub ray_step: f32,
    /// Radians per second.
    pub turn_speed: f32,
    /// Map units per second.
    pub move_speed: f32,
    pub enemy_speed: f32,
    /// Per-enemy, per-frame chance to pick a new heading.
    pub wander_chance: f64,
    pub frame_interval: Duration,
    /// Upper bound on the elapsed time fed to one simulation step, in seconds.
    /// Keeps every step under half a cell so nothing can tunnel through the border.
    pub max_elapsed: f32,
    /// How long a movement key counts as held after its last key event.
    pub footstep_hold: Duration,
    pub seed: Option<u64>,
    pub assets_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 240,
            screen_height: 120,
            map_width: 40,
            map_height: 60,
            wall_probability: 0.2,
            enemy_count: 13,
            fov: PI / 3.0,
            depth: 16.0,
            ray_step: 0.1,
            turn_speed: 2.0,
            move_speed: 5.0,
            enemy_speed: 2.0,
            wander_chance: 0.02,
            frame_interval: Duration::from_millis(16),
            max_elapsed: 0.1,
            footstep_hold: Duration::from_millis(150),
            seed: None,
            assets_dir: PathBuf::from("songs"),
        }
    }
}

impl GameConfig {
    /// Clamp a raw frame time to what one simulation step may consume.
    pub fn step_elapsed(&self, raw: Duration) -> f32 {
        raw.as_secs_f32().clamp(0.0, self.max_elapsed)
    }
}

/// Command line for the terminal game.
#[derive(Debug, Parser)]
#[command(name = "labyrinth_of_fear", about = "Find the door. Avoid what walks the halls.")]
pub struct Args {
    /// Screen width in terminal columns. Defaults to the current terminal width.
    #[arg(long, value_name = "COLUMNS", value_parser = clap::value_parser!(u16).range(16..))]
    pub width: Option<u16>,
    /// Screen height in terminal rows. Defaults to the current terminal height.
    #[arg(long, value_name = "ROWS", value_parser = clap::value_parser!(u16).range(8..))]
    pub height: Option<u16>,
    /// Number of map columns, border included.
    #[arg(long = "map-width", value_name = "CELLS", default_value_t = 40,
        value_parser = clap::value_parser!(u16).range(3..=512))]
    pub map_width: u16,
    /// Number of map rows, border included.
    #[arg(long = "map-height", value_name = "CELLS", default_value_t = 60,
        value_parser = clap::value_parser!(u16).range(3..=512))]
    pub map_height: u16,
    /// Probability that an interior cell is a wall.
    #[arg(long = "walls", value_name = "PROBABILITY", default_value_t = 0.2, value_parser = parse_probability)]
    pub wall_probability: f64,
    /// Number of enemies roaming the maze.
    #[arg(long, value_name = "COUNT", default_value_t = 13)]
    pub enemies: usize,
    /// Seed for map generation and enemy behaviour.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Directory holding the sound cues.
    #[arg(long, value_name = "DIR", default_value = "songs")]
    pub assets: PathBuf,
    /// File receiving the log output; the terminal itself is taken by the game.
    #[arg(long = "log-file", value_name = "PATH", default_value = "labyrinth.log")]
    pub log_file: PathBuf,
}

impl Args {
    /// Build the game configuration, falling back to `terminal` for the screen size.
    pub fn to_config(&self, terminal: Option<(u16, u16)>) -> GameConfig {
        let defaults = GameConfig::default();
        let (term_w, term_h) = terminal
            .map(|(w, h)| (w as usize, h as usize))
            .unwrap_or((defaults.screen_width, defaults.screen_height));
        GameConfig {
            screen_width: self.width.map(usize::from).unwrap_or(term_w),
            screen_height: self.height.map(usize::from).unwrap_or(term_h),
            map_width: self.map_width as usize,
            map_height: self.map_height as usize,
            wall_probability: self.wall_probability,
            enemy_count: self.enemies,
            seed: self.seed,
            assets_dir: self.assets.clone(),
            ..defaults
        }
    }
}

fn parse_probability(value: &str) -> Result<f64, String> {
    let p: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("probability must be between 0 and 1, got {p}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_game() {
        let config = GameConfig::default();
        assert_eq!((config.screen_width, config.screen_height), (240, 120));
        assert_eq!((config.map_width, config.map_height), (40, 60));
        assert_eq!(config.enemy_count, 13);
        assert!((config.fov - PI / 3.0).abs() < 1e-6);
    }

    #[test]
    fn screen_size_falls_back_to_terminal() {
        let args = Args::parse_from(["labyrinth_of_fear", "--height", "50"]);
        let config = args.to_config(Some((100, 40)));
        assert_eq!(config.screen_width, 100);
        assert_eq!(config.screen_height, 50);
    }

    #[test]
    fn rejects_probability_out_of_range() {
        assert!(Args::try_parse_from(["labyrinth_of_fear", "--walls", "1.5"]).is_err());
        assert!(Args::try_parse_from(["labyrinth_of_fear", "--walls", "abc"]).is_err());
    }

    #[test]
    fn step_elapsed_is_clamped() {
        let config = GameConfig::default();
        assert_eq!(config.step_elapsed(Duration::from_secs(3)), config.max_elapsed);
        assert!((config.step_elapsed(Duration::from_millis(16)) - 0.016).abs() < 1e-6);
    }
}
