use crate::core::maze::{Cell, Maze, cell_of};
use crate::error::Result;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Heading in radians; 0 faces +y, growing turns left.
    pub a: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Forward,
    Backward,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Blocked,
    /// Forward step whose target cell is the door; the position is left untouched.
    ReachedDoor,
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self { x, y, a: angle }
    }

    /// Player standing in the middle of grid cell `(row, col)`, facing +y.
    pub fn at_cell(row: usize, col: usize) -> Self {
        Self::new(col as f32 + 0.5, row as f32 + 0.5, 0.0)
    }

    pub fn cell(&self) -> (isize, isize) {
        cell_of(self.x, self.y)
    }

    pub fn turn(&mut self, turn: Turn, elapsed: f32, speed: f32) {
        match turn {
            Turn::Left => self.a += speed * elapsed,
            Turn::Right => self.a -= speed * elapsed,
        }
    }

    /// Step along (or against) the heading; walls block, the door ends the game going forward.
    pub fn try_move(&mut self, maze: &Maze, step: Step, elapsed: f32, speed: f32) -> Result<MoveOutcome> {
        let sign = match step {
            Step::Forward => 1.0,
            Step::Backward => -1.0,
        };
        let nx = self.x + sign * self.a.sin() * speed * elapsed;
        let ny = self.y + sign * self.a.cos() * speed * elapsed;
        let (row, col) = cell_of(nx, ny);
        let target = maze.baseline_at(row, col)?;

        if step == Step::Forward && target == Cell::Door {
            return Ok(MoveOutcome::ReachedDoor);
        }
        if target == Cell::Wall {
            return Ok(MoveOutcome::Blocked);
        }
        self.x = nx;
        self.y = ny;
        Ok(MoveOutcome::Moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn corridor() -> Maze {
        Maze::from_rows(&["#####", "#..D#", "#####"]).unwrap()
    }

    #[test]
    fn forward_into_door_is_reported_without_moving() {
        let maze = corridor();
        // heading pi/2 faces +x
        let mut p = Player::new(2.5, 1.5, FRAC_PI_2);
        let outcome = p.try_move(&maze, Step::Forward, 0.2, 5.0).unwrap();
        assert_eq!(outcome, MoveOutcome::ReachedDoor);
        assert_eq!((p.x, p.y), (2.5, 1.5));
    }

    #[test]
    fn backward_onto_door_is_an_ordinary_move() {
        let maze = corridor();
        let mut p = Player::new(2.5, 1.5, -FRAC_PI_2);
        let outcome = p.try_move(&maze, Step::Backward, 0.2, 5.0).unwrap();
        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(p.cell(), (1, 3));
    }

    #[test]
    fn walls_block_both_directions() {
        let maze = corridor();
        let mut p = Player::new(1.5, 1.5, 0.0);
        assert_eq!(p.try_move(&maze, Step::Forward, 0.2, 5.0).unwrap(), MoveOutcome::Blocked);
        assert_eq!(p.try_move(&maze, Step::Backward, 0.2, 5.0).unwrap(), MoveOutcome::Blocked);
        assert_eq!((p.x, p.y), (1.5, 1.5));
    }

    #[test]
    fn turning_scales_with_elapsed_time() {
        let mut p = Player::new(1.5, 1.5, 0.0);
        p.turn(Turn::Left, 0.5, 2.0);
        assert!((p.a - 1.0).abs() < 1e-6);
        p.turn(Turn::Right, 0.25, 2.0);
        assert!((p.a - 0.5).abs() < 1e-6);
    }
}
