//! Frame compositor: parallel column casts, status line, minimap, player marker.
use std::time::Duration;

use rayon::prelude::*;

use crate::core::maze::Maze;
use crate::core::player::Player;
use crate::core::session::GameSession;
use crate::render::casters::{Projection, render_column};
use crate::render::framebuffer::Framebuffer;

pub const PLAYER_GLYPH: char = 'P';

/// Owns the column-major scratch buffer the ray casts write into.
/// Column `x` occupies `columns[x * height..(x + 1) * height]`, so every
/// task gets a disjoint slice and no allocation happens per frame.
pub struct Renderer {
    proj: Projection,
    columns: Vec<char>,
}

impl Renderer {
    pub fn new(proj: Projection) -> Self {
        let columns = vec![' '; proj.screen_width * proj.screen_height];
        Self { proj, columns }
    }

    /// Cast every column in parallel into the scratch buffer.
    pub fn cast_columns(&mut self, maze: &Maze, player: &Player) {
        let (w, h) = (self.proj.screen_width, self.proj.screen_height);
        if w == 0 || h == 0 {
            return;
        }
        let proj = self.proj;
        self.columns
            .par_chunks_mut(h)
            .enumerate()
            .for_each(|(x, column)| {
                render_column(maze, player, x, &proj, column);
            });
    }

    /// Copy the scratch columns into the row-major screen by absolute index.
    fn merge_columns(&self, fb: &mut Framebuffer) {
        let (w, h) = (self.proj.screen_width, self.proj.screen_height);
        for (x, column) in self.columns.chunks(h.max(1)).enumerate().take(w) {
            for (y, &glyph) in column.iter().enumerate() {
                if let Some(i) = column_index(x, y, w, h) {
                    if let Some(slot) = fb.buffer.get_mut(i) {
                        *slot = glyph;
                    }
                }
            }
        }
    }

    /// Compose one play frame. `elapsed` is the raw frame time shown as FPS.
    pub fn render_play(&mut self, fb: &mut Framebuffer, session: &GameSession, elapsed: Duration) {
        fb.clear();
        self.cast_columns(&session.maze, &session.player);
        self.merge_columns(fb);

        // the status line overwrites the top row of the view
        fb.put_at_offset(0, &status_line(&session.player, elapsed));
        draw_minimap(fb, &session.maze);

        let (row, col) = session.player.cell();
        if row >= 0 && col >= 0 {
            fb.set(col as usize, row as usize + 1, PLAYER_GLYPH);
        }
    }
}

/// Absolute screen index of row `y` in column `x`.
#[inline]
pub fn column_index(x: usize, y: usize, width: usize, height: usize) -> Option<usize> {
    (x < width && y < height).then(|| y * width + x)
}

/// Frames per second implied by one frame time; 0 stands in for a zero or broken measurement.
pub fn instantaneous_fps(elapsed: Duration) -> u32 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 && secs.is_finite() {
        (1.0 / secs).min(u32::MAX as f64) as u32
    } else {
        0
    }
}

pub fn status_line(player: &Player, elapsed: Duration) -> String {
    format!(
        "X: {:.2}, Y: {:.2}, FOV: {:.2}, FPS: {}",
        player.x,
        player.y,
        player.a,
        instantaneous_fps(elapsed)
    )
}

/// Working grid drawn from screen row 1 down, clipped to the screen.
fn draw_minimap(fb: &mut Framebuffer, maze: &Maze) {
    for row in 0..maze.height() {
        for (col, cell) in maze.working_row(row).enumerate() {
            fb.set(col, row + 1, cell.symbol());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_sentinel_for_zero_elapsed() {
        assert_eq!(instantaneous_fps(Duration::ZERO), 0);
        assert_eq!(instantaneous_fps(Duration::from_millis(20)), 50);
    }

    #[test]
    fn column_index_is_row_major() {
        assert_eq!(column_index(3, 2, 10, 5), Some(23));
        assert_eq!(column_index(10, 0, 10, 5), None);
        assert_eq!(column_index(0, 5, 10, 5), None);
    }

    #[test]
    fn status_line_reports_position_and_heading() {
        let player = Player::new(3.25, 4.5, 1.0);
        let line = status_line(&player, Duration::from_millis(16));
        assert_eq!(line, "X: 3.25, Y: 4.50, FOV: 1.00, FPS: 62");
    }
}
