//! Enemy movement: axis-by-axis wall sliding plus random wandering.
use rand::Rng;

use crate::core::maze::{Maze, cell_of};
use crate::error::Result;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    /// Heading; not normalised, its magnitude scales the step.
    pub dx: f32,
    pub dy: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, dx: f32, dy: f32) -> Self {
        Self { x, y, dx, dy }
    }

    pub fn cell(&self) -> (isize, isize) {
        cell_of(self.x, self.y)
    }

    /// Advance one frame. Each axis is tried on its own so enemies slide along walls;
    /// a blocked axis reverses that component of the heading.
    pub fn advance(&mut self, maze: &Maze, elapsed: f32, speed: f32) -> Result<()> {
        let nx = self.x + self.dx * elapsed * speed;
        let ny = self.y + self.dy * elapsed * speed;

        let (row, _) = cell_of(self.x, self.y);
        let (_, col) = cell_of(nx, ny);
        if maze.in_bounds(row, col) && !maze.is_wall(row, col)? {
            self.x = nx;
        } else {
            self.dx = -self.dx;
        }

        let (_, col) = cell_of(self.x, self.y);
        let (row, _) = cell_of(nx, ny);
        if maze.in_bounds(row, col) && !maze.is_wall(row, col)? {
            self.y = ny;
        } else {
            self.dy = -self.dy;
        }
        Ok(())
    }

    pub fn reroll_heading<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.dx = rng.gen_range(-1.0..=1.0);
        self.dy = rng.gen_range(-1.0..=1.0);
    }
}

/// Move every enemy, then give each a `wander_chance` to pick a fresh heading.
pub fn update_enemies<R: Rng + ?Sized>(
    enemies: &mut [Enemy],
    maze: &Maze,
    elapsed: f32,
    speed: f32,
    wander_chance: f64,
    rng: &mut R,
) -> Result<()> {
    for enemy in enemies.iter_mut() {
        enemy.advance(maze, elapsed, speed)?;
        if rng.gen_bool(wander_chance.clamp(0.0, 1.0)) {
            enemy.reroll_heading(rng);
        }
    }
    Ok(())
}

/// Top up `enemies` to `target` on free floor cells, away from `player` and from each other.
pub fn populate_enemies<R: Rng + ?Sized>(
    enemies: &mut Vec<Enemy>,
    maze: &Maze,
    player: (usize, usize),
    target: usize,
    rng: &mut R,
) -> Result<()> {
    let mut taken: Vec<(usize, usize)> = Vec::with_capacity(target + 1);
    taken.push(player);
    taken.extend(enemies.iter().map(|e| {
        let (r, c) = e.cell();
        (r.max(0) as usize, c.max(0) as usize)
    }));

    while enemies.len() < target {
        let (row, col) = maze.random_floor_cell(rng, &taken)?;
        taken.push((row, col));
        let mut enemy = Enemy::new(col as f32 + 0.5, row as f32 + 0.5, 0.0, 0.0);
        enemy.reroll_heading(rng);
        enemies.push(enemy);
    }
    log::debug!("{} enemies placed", enemies.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // 8x8 room with a wall at row 5, column 6
    fn room() -> Maze {
        Maze::from_rows(&[
            "########",
            "#......#",
            "#......#",
            "#.....D#",
            "#......#",
            "#.....##",
            "#......#",
            "########",
        ])
        .unwrap()
    }

    #[test]
    fn horizontal_block_reverses_dx_only() {
        let maze = room();
        let mut e = Enemy::new(5.0, 5.0, 1.0, 0.5);
        e.advance(&maze, 0.5, 2.0).unwrap();
        assert_eq!(e.dx, -1.0);
        assert_eq!(e.x, 5.0);
        assert_eq!(e.dy, 0.5);
        assert!((e.y - 5.5).abs() < 1e-6);
    }

    #[test]
    fn vertical_block_reverses_dy() {
        let maze = room();
        let mut e = Enemy::new(3.5, 1.2, 0.0, -1.0);
        e.advance(&maze, 0.5, 2.0).unwrap();
        assert_eq!(e.dy, 1.0);
        assert_eq!(e.y, 1.2);
    }

    #[test]
    fn enemies_may_cross_the_door() {
        let maze = room();
        let mut e = Enemy::new(5.5, 3.5, 1.0, 0.0);
        e.advance(&maze, 0.5, 2.0).unwrap();
        assert_eq!(e.cell(), (3, 6));
        assert_eq!(e.dx, 1.0);
    }

    #[test]
    fn populate_avoids_player_door_and_walls() {
        let maze = room();
        let mut rng = StdRng::seed_from_u64(11);
        let mut enemies = Vec::new();
        populate_enemies(&mut enemies, &maze, (1, 1), 10, &mut rng).unwrap();
        assert_eq!(enemies.len(), 10);
        let mut cells: Vec<_> = enemies.iter().map(Enemy::cell).collect();
        for &(r, c) in &cells {
            assert_eq!(maze.baseline_at(r, c).unwrap(), crate::core::maze::Cell::Floor);
            assert_ne!((r, c), (1, 1));
        }
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 10);
    }

    #[test]
    fn zero_wander_chance_keeps_heading() {
        let maze = room();
        let mut rng = StdRng::seed_from_u64(5);
        let mut enemies = vec![Enemy::new(2.5, 2.5, 0.25, 0.0)];
        for _ in 0..20 {
            update_enemies(&mut enemies, &maze, 0.016, 2.0, 0.0, &mut rng).unwrap();
        }
        assert_eq!(enemies[0].dy, 0.0);
        assert!(enemies[0].dx.abs() == 0.25);
    }
}
