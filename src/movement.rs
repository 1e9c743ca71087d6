//! Movement resolution: one noisy tilt sample in, at most one cell step out.

use crate::maze::{Maze, Pos};

pub const TILT_DEADZONE: f32 = 0.4;

/// Resolves a raw 2-axis tilt reading against the current cell's walls.
/// Readings under the deadzone are dropped; otherwise only the stronger axis
/// is attempted, and a walled-off step leaves the position where it was.
pub fn resolve_step(maze: &Maze, pos: Pos, tilt_x: f32, tilt_y: f32) -> Pos {
    let abs_x = tilt_x.abs();
    let abs_y = tilt_y.abs();
    if abs_x < TILT_DEADZONE && abs_y < TILT_DEADZONE {
        return pos;
    }

    let cell = maze.cell(pos.x, pos.y);
    let mut x = pos.x as isize;
    let mut y = pos.y as isize;

    if abs_x > abs_y {
        if tilt_x > 0.0 && !cell.right {
            x += 1;
        } else if tilt_x < 0.0 && !cell.left {
            x -= 1;
        }
    } else if tilt_y < 0.0 && !cell.top {
        y -= 1;
    } else if tilt_y > 0.0 && !cell.bottom {
        y += 1;
    }

    // Border cells keep their outward walls, so the clamp is a backstop for
    // callers that hand in a position this function never produced.
    Pos {
        x: x.clamp(0, maze.width() as isize - 1) as usize,
        y: y.clamp(0, maze.height() as isize - 1) as usize,
    }
}
