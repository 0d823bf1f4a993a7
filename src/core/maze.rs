//! Maze generation plus the per-frame overlay grid.
//!
//! The maze keeps two grids: the baseline produced at generation time and a
//! working copy that is reset from it every frame before enemies are stamped.
//! Ray casting runs on many threads at once and leaves trace marks on the
//! working copy, so its cells are atomics. Trace and enemy marks only ever
//! replace floor cells, which keeps wall/door/enemy reads race-free.
use std::sync::atomic::{AtomicU8, Ordering};

use rand::Rng;

use crate::error::{GameError, Result};

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall = b'#',
    Floor = b'.',
    Door = b'D',
    Enemy = b'E',
    Trace = b'*',
}

impl Cell {
    pub fn symbol(self) -> char {
        self as u8 as char
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Floor),
            'D' => Some(Cell::Door),
            'E' => Some(Cell::Enemy),
            '*' => Some(Cell::Trace),
            _ => None,
        }
    }

    #[inline]
    fn from_byte(b: u8) -> Self {
        match b {
            b'#' => Cell::Wall,
            b'D' => Cell::Door,
            b'E' => Cell::Enemy,
            b'*' => Cell::Trace,
            _ => Cell::Floor,
        }
    }

    /// Open ground for the purpose of ray marching; traces are floor that a ray already crossed.
    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, Cell::Floor | Cell::Trace)
    }
}

/// Grid cell holding the continuous position `(x, y)`: `x` picks the column, `y` the row.
#[inline]
pub fn cell_of(x: f32, y: f32) -> (isize, isize) {
    (y.floor() as isize, x.floor() as isize)
}

pub struct Maze {
    width: usize,
    height: usize,
    baseline: Vec<Cell>,
    working: Vec<AtomicU8>,
    door: Option<(usize, usize)>,
}

impl Maze {
    /// Bordered grid with random interior walls and exactly one door.
    pub fn generate<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        wall_probability: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if width < 3 || height < 3 {
            return Err(GameError::InvalidMap(format!(
                "a {height}x{width} grid has no interior"
            )));
        }
        let p = wall_probability.clamp(0.0, 1.0);
        let mut cells = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                let border = row == 0 || col == 0 || row == height - 1 || col == width - 1;
                let cell = if border || rng.gen_bool(p) { Cell::Wall } else { Cell::Floor };
                cells.push(cell);
            }
        }
        // The door may land on a wall; it simply replaces it.
        let door = (rng.gen_range(1..height - 1), rng.gen_range(1..width - 1));
        cells[door.0 * width + door.1] = Cell::Door;
        Ok(Self::with_cells(width, height, cells, Some(door)))
    }

    /// Fixed map from text rows. The border must be walls and at most one `D` may exist.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width < 3 || height < 3 {
            return Err(GameError::InvalidMap("map must be at least 3x3".into()));
        }
        let mut cells = Vec::with_capacity(width * height);
        let mut doors = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return Err(GameError::InvalidMap(format!("row {row} is not {width} cells wide")));
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = match Cell::from_symbol(ch) {
                    Some(c @ (Cell::Wall | Cell::Floor | Cell::Door)) => c,
                    _ => {
                        return Err(GameError::InvalidMap(format!(
                            "unexpected symbol {ch:?} at ({row}, {col})"
                        )));
                    }
                };
                let border = row == 0 || col == 0 || row == height - 1 || col == width - 1;
                if border && cell != Cell::Wall {
                    return Err(GameError::InvalidMap(format!("border cell ({row}, {col}) is open")));
                }
                if cell == Cell::Door {
                    doors.push((row, col));
                }
                cells.push(cell);
            }
        }
        match doors.as_slice() {
            [] => Ok(Self::with_cells(width, height, cells, None)),
            [door] => Ok(Self::with_cells(width, height, cells, Some(*door))),
            _ => Err(GameError::InvalidMap(format!("expected at most one door, found {}", doors.len()))),
        }
    }

    fn with_cells(width: usize, height: usize, baseline: Vec<Cell>, door: Option<(usize, usize)>) -> Self {
        let working = baseline.iter().map(|&c| AtomicU8::new(c as u8)).collect();
        Self { width, height, baseline, working, door }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(row, col)` of the door; generated maps always have one.
    pub fn door(&self) -> Option<(usize, usize)> {
        self.door
    }

    pub fn baseline(&self) -> &[Cell] {
        &self.baseline
    }

    #[inline]
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    #[inline]
    fn index(&self, row: isize, col: isize) -> Result<usize> {
        if self.in_bounds(row, col) {
            Ok(row as usize * self.width + col as usize)
        } else {
            Err(GameError::OutOfBounds { row, col, width: self.width, height: self.height })
        }
    }

    /// Current working-grid cell, overlays included.
    pub fn cell_at(&self, row: isize, col: isize) -> Result<Cell> {
        let i = self.index(row, col)?;
        Ok(Cell::from_byte(self.working[i].load(Ordering::Relaxed)))
    }

    /// Cell as generated, ignoring overlays.
    pub fn baseline_at(&self, row: isize, col: isize) -> Result<Cell> {
        let i = self.index(row, col)?;
        Ok(self.baseline[i])
    }

    pub fn is_wall(&self, row: isize, col: isize) -> Result<bool> {
        Ok(self.baseline_at(row, col)? == Cell::Wall)
    }

    /// Drop every overlay mark; the working grid equals the baseline afterwards.
    pub fn reset_overlay_from_baseline(&mut self) {
        for (slot, &cell) in self.working.iter_mut().zip(&self.baseline) {
            *slot.get_mut() = cell as u8;
        }
    }

    /// Mark an enemy on the working grid. Only floor is overwritten; returns whether it was.
    pub fn stamp_enemy(&mut self, row: isize, col: isize) -> Result<bool> {
        let i = self.index(row, col)?;
        let slot = self.working[i].get_mut();
        if Cell::from_byte(*slot).is_open() {
            *slot = Cell::Enemy as u8;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Leave a ray-trace mark. Callable from concurrent ray casts; only floor is replaced.
    pub fn mark_trace(&self, row: isize, col: isize) {
        if let Ok(i) = self.index(row, col) {
            let _ = self.working[i].compare_exchange(
                Cell::Floor as u8,
                Cell::Trace as u8,
                Ordering::Relaxed,
                Ordering::Relaxed,
            );
        }
    }

    /// Snapshot of one working-grid row.
    pub fn working_row(&self, row: usize) -> impl Iterator<Item = Cell> + '_ {
        let start = row.min(self.height) * self.width;
        let end = (row + 1).min(self.height) * self.width;
        self.working[start..end]
            .iter()
            .map(|c| Cell::from_byte(c.load(Ordering::Relaxed)))
    }

    pub fn working_snapshot(&self) -> Vec<Cell> {
        (0..self.height).flat_map(|r| self.working_row(r)).collect()
    }

    /// Rejection-sample an interior floor cell (never the door) outside `exclude`.
    pub fn random_floor_cell<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        exclude: &[(usize, usize)],
    ) -> Result<(usize, usize)> {
        let attempts = 64 * self.width * self.height;
        for _ in 0..attempts {
            let row = rng.gen_range(1..self.height - 1);
            let col = rng.gen_range(1..self.width - 1);
            if self.baseline[row * self.width + col] == Cell::Floor && !exclude.contains(&(row, col)) {
                return Ok((row, col));
            }
        }
        Err(GameError::NoFreeCell { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn open_room() -> Maze {
        Maze::from_rows(&["#####", "#...#", "#..D#", "#...#", "#####"]).unwrap()
    }

    #[test]
    fn generated_border_is_wall() {
        let mut rng = StdRng::seed_from_u64(7);
        let maze = Maze::generate(12, 9, 0.3, &mut rng).unwrap();
        for row in 0..9isize {
            for col in 0..12isize {
                if row == 0 || col == 0 || row == 8 || col == 11 {
                    assert_eq!(maze.baseline_at(row, col).unwrap(), Cell::Wall);
                }
            }
        }
    }

    #[test]
    fn door_is_placed_even_in_a_solid_map() {
        let mut rng = StdRng::seed_from_u64(1);
        let maze = Maze::generate(6, 6, 1.0, &mut rng).unwrap();
        let doors = maze.baseline().iter().filter(|&&c| c == Cell::Door).count();
        assert_eq!(doors, 1);
        let (r, c) = maze.door().unwrap();
        assert_eq!(maze.baseline_at(r as isize, c as isize).unwrap(), Cell::Door);
    }

    #[test]
    fn cell_at_rejects_outside_coordinates() {
        let maze = open_room();
        assert!(matches!(maze.cell_at(-1, 2), Err(GameError::OutOfBounds { .. })));
        assert!(matches!(maze.cell_at(2, 5), Err(GameError::OutOfBounds { .. })));
        assert_eq!(maze.cell_at(4, 4).unwrap(), Cell::Wall);
    }

    #[test]
    fn stamps_only_land_on_floor() {
        let mut maze = open_room();
        assert!(maze.stamp_enemy(1, 1).unwrap());
        assert!(!maze.stamp_enemy(2, 3).unwrap());
        assert!(!maze.stamp_enemy(0, 0).unwrap());
        assert_eq!(maze.cell_at(1, 1).unwrap(), Cell::Enemy);
        assert_eq!(maze.cell_at(2, 3).unwrap(), Cell::Door);

        maze.mark_trace(1, 1);
        maze.mark_trace(0, 2);
        maze.mark_trace(3, 3);
        assert_eq!(maze.cell_at(1, 1).unwrap(), Cell::Enemy);
        assert_eq!(maze.cell_at(0, 2).unwrap(), Cell::Wall);
        assert_eq!(maze.cell_at(3, 3).unwrap(), Cell::Trace);
    }

    #[test]
    fn reset_overlay_is_idempotent() {
        let mut maze = open_room();
        maze.stamp_enemy(1, 2).unwrap();
        maze.mark_trace(3, 1);
        maze.reset_overlay_from_baseline();
        let first = maze.working_snapshot();
        maze.reset_overlay_from_baseline();
        let second = maze.working_snapshot();
        assert_eq!(first, maze.baseline());
        assert_eq!(second, maze.baseline());
    }

    #[test]
    fn from_rows_validates_shape() {
        assert!(Maze::from_rows(&["###", "#.#"]).is_err());
        assert!(Maze::from_rows(&["####", "#DD#", "####"]).is_err(), "two doors");
        assert!(Maze::from_rows(&["###", "#.#", "###"]).unwrap().door().is_none());
        assert!(Maze::from_rows(&["###", "#D.", "###"]).is_err(), "open border");
        assert!(Maze::from_rows(&["####", "#D#", "####"]).is_err(), "ragged");
    }

    #[test]
    fn random_floor_cell_respects_exclusions() {
        let maze = Maze::from_rows(&["#####", "#.#D#", "#####"]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(maze.random_floor_cell(&mut rng, &[]).unwrap(), (1, 1));
        assert!(matches!(
            maze.random_floor_cell(&mut rng, &[(1, 1)]),
            Err(GameError::NoFreeCell { .. })
        ));
    }
}
