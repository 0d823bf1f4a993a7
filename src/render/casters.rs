//! Per-column ray marching and glyph shading.
use crate::config::GameConfig;
use crate::core::maze::{Cell, Maze, cell_of};
use crate::core::player::Player;

pub const EDGE_GLYPH: char = '|';
const WALL_GLYPHS: [char; 4] = ['\u{2588}', '\u{2593}', '\u{2592}', '\u{2591}'];
const ENEMY_GLYPHS: [char; 3] = ['E', 'e', 'f'];
const DOOR_GLYPHS: [char; 3] = ['D', 'd', 'o'];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Impact {
    Wall,
    Door,
    Enemy,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersect {
    pub distance: f32,
    /// `None` when the ray ran out at the render horizon.
    pub impact: Option<Impact>,
    /// Ray passes next to a wall-cell corner.
    pub boundary: bool,
}

/// Screen geometry and marching constants.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub screen_width: usize,
    pub screen_height: usize,
    pub fov: f32,
    pub depth: f32,
    pub step: f32,
}

impl Projection {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            screen_width: config.screen_width,
            screen_height: config.screen_height,
            fov: config.fov,
            depth: config.depth,
            step: config.ray_step,
        }
    }

    /// Column 0 looks `fov/2` to the left of the heading, the last column to the right.
    #[inline]
    pub fn ray_angle(&self, heading: f32, x: usize) -> f32 {
        heading + self.fov * (0.5 - x as f32 / self.screen_width as f32)
    }
}

/// March from the player along `angle` until something solid or the horizon.
/// Floor cells crossed on the way get a trace mark on the working grid.
pub fn cast_ray(maze: &Maze, player: &Player, angle: f32, proj: &Projection) -> Intersect {
    let (rx, ry) = (angle.sin(), angle.cos());
    let mut d = 0.0;

    while d < proj.depth {
        d += proj.step;
        let (row, col) = cell_of(player.x + rx * d, player.y + ry * d);
        let Ok(cell) = maze.cell_at(row, col) else {
            return Intersect { distance: proj.depth, impact: Some(Impact::Wall), boundary: false };
        };
        match cell {
            Cell::Wall => {
                return Intersect {
                    distance: d,
                    impact: Some(Impact::Wall),
                    boundary: on_cell_edge(player, rx, ry, row, col, d),
                };
            }
            Cell::Door => return Intersect { distance: d, impact: Some(Impact::Door), boundary: false },
            Cell::Enemy => return Intersect { distance: d, impact: Some(Impact::Enemy), boundary: false },
            Cell::Floor | Cell::Trace => maze.mark_trace(row, col),
        }
    }
    Intersect { distance: d, impact: None, boundary: false }
}

/// Of the four corners of the hit cell, take the two nearest the player and test
/// whether the ray passes within `0.03 / distance` radians of either.
fn on_cell_edge(player: &Player, rx: f32, ry: f32, row: isize, col: isize, distance: f32) -> bool {
    let mut corners: [(f32, f32); 4] = [(f32::INFINITY, -1.0); 4];
    let mut n = 0;
    for tx in 0..2 {
        for ty in 0..2 {
            let vx = (col + tx) as f32 - player.x;
            let vy = (row + ty) as f32 - player.y;
            let module = (vx * vx + vy * vy).sqrt();
            // standing exactly on the corner gives no direction to compare against
            if module <= f32::EPSILON {
                continue;
            }
            corners[n] = (module, (rx * vx + ry * vy) / module);
            n += 1;
        }
    }
    let corners = &mut corners[..n];
    corners.sort_by(|a, b| a.0.total_cmp(&b.0));
    let bound = 0.03 / distance;
    corners
        .iter()
        .take(2)
        .any(|&(_, cos)| cos.clamp(-1.0, 1.0).acos() < bound)
}

/// Glyph for the solid part of a column.
pub fn wall_shade(hit: &Intersect, depth: f32) -> char {
    let d = hit.distance;
    let tiered = |glyphs: [char; 3]| {
        if d < 5.0 {
            glyphs[0]
        } else if d < 10.0 {
            glyphs[1]
        } else if d < 15.0 {
            glyphs[2]
        } else {
            ' '
        }
    };
    match hit.impact {
        Some(Impact::Enemy) => tiered(ENEMY_GLYPHS),
        Some(Impact::Door) => tiered(DOOR_GLYPHS),
        _ if hit.boundary => EDGE_GLYPH,
        _ if d <= depth / 4.0 => WALL_GLYPHS[0],
        _ if d < depth / 3.0 => WALL_GLYPHS[1],
        _ if d < depth / 2.0 => WALL_GLYPHS[2],
        _ if d < depth => WALL_GLYPHS[3],
        _ => ' ',
    }
}

/// Floor gradient for row `y`; depends only on the row, not on the ray.
pub fn floor_shade(y: usize, screen_height: usize) -> char {
    let half = screen_height as f32 / 2.0;
    let b = 1.0 - (y as f32 - half) / half;
    if b < 0.25 {
        '#'
    } else if b < 0.5 {
        'x'
    } else if b < 0.75 {
        '.'
    } else if b < 0.9 {
        '-'
    } else {
        ' '
    }
}

/// Cast column `x` and fill `out` (one glyph per screen row, top to bottom).
pub fn render_column(maze: &Maze, player: &Player, x: usize, proj: &Projection, out: &mut [char]) -> Intersect {
    let hit = cast_ray(maze, player, proj.ray_angle(player.a, x), proj);
    let h = proj.screen_height as f32;
    let ceiling = (h / 2.0 - h / hit.distance) as i64;
    let floor = proj.screen_height as i64 - ceiling;
    let shade = wall_shade(&hit, proj.depth);

    for (y, slot) in out.iter_mut().enumerate().take(proj.screen_height) {
        let yi = y as i64;
        *slot = if yi < ceiling {
            ' '
        } else if yi > ceiling && yi <= floor {
            shade
        } else {
            floor_shade(y, proj.screen_height)
        };
    }
    hit
}
