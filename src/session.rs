use rand::Rng;

use crate::maze::{self, Maze, Pos};
use crate::movement;

/// One play session: an immutable maze plus the player position threaded
/// through movement resolution. The last sample is kept for the status line.
pub struct Session {
    pub maze: Maze,
    pub player: Pos,
    pub last_tilt: (f32, f32),
}

impl Session {
    pub fn new(rng: &mut impl Rng, width: usize, height: usize) -> Self {
        Self {
            maze: maze::generate(rng, width, height),
            player: Pos { x: 0, y: 0 },
            last_tilt: (0.0, 0.0),
        }
    }

    pub fn apply_sample(&mut self, tilt_x: f32, tilt_y: f32) {
        self.last_tilt = (tilt_x, tilt_y);
        self.player = movement::resolve_step(&self.maze, self.player, tilt_x, tilt_y);
    }

    pub fn restart(&mut self, rng: &mut impl Rng) {
        self.maze = maze::generate(rng, self.maze.width(), self.maze.height());
        self.player = Pos { x: 0, y: 0 };
        self.last_tilt = (0.0, 0.0);
    }
}
