use crossterm::event::KeyCode;
use std::time::{Duration, Instant};

pub const TILT_MAGNITUDE: f32 = 0.8;
pub const KEY_HOLD_MS: u64 = 160;

/// Stand-in for a tilt sensor: recently held keys pin the matching axis at
/// `TILT_MAGNITUDE`, released keys decay to level within `KEY_HOLD_MS`.
/// A level axis reads 0.0 and falls under the movement deadzone downstream.
pub struct KeyboardTilt {
    last_seen: [Option<Instant>; 4],
}

impl KeyboardTilt {
    pub fn new() -> Self {
        Self {
            last_seen: [None; 4],
        }
    }

    pub fn press(&mut self, code: KeyCode) {
        let idx = match code {
            KeyCode::Up | KeyCode::Char('k') => 0,
            KeyCode::Down | KeyCode::Char('j') => 1,
            KeyCode::Left | KeyCode::Char('h') => 2,
            KeyCode::Right | KeyCode::Char('l') => 3,
            _ => return,
        };
        self.last_seen[idx] = Some(Instant::now());
    }

    pub fn sample(&self) -> (f32, f32) {
        let now = Instant::now();
        let held = |idx: usize| {
            self.last_seen[idx]
                .map(|t| now.duration_since(t) <= Duration::from_millis(KEY_HOLD_MS))
                .unwrap_or(false)
        };

        let mut tilt_x = 0.0;
        let mut tilt_y = 0.0;
        if held(0) {
            tilt_y -= TILT_MAGNITUDE;
        }
        if held(1) {
            tilt_y += TILT_MAGNITUDE;
        }
        if held(2) {
            tilt_x -= TILT_MAGNITUDE;
        }
        if held(3) {
            tilt_x += TILT_MAGNITUDE;
        }
        (tilt_x, tilt_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_keyboard_reads_level() {
        let tilt = KeyboardTilt::new();
        assert_eq!(tilt.sample(), (0.0, 0.0));
    }

    #[test]
    fn held_key_tilts_its_axis() {
        let mut tilt = KeyboardTilt::new();
        tilt.press(KeyCode::Right);
        assert_eq!(tilt.sample(), (TILT_MAGNITUDE, 0.0));

        tilt.press(KeyCode::Char('k'));
        assert_eq!(tilt.sample(), (TILT_MAGNITUDE, -TILT_MAGNITUDE));
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut tilt = KeyboardTilt::new();
        tilt.press(KeyCode::Left);
        tilt.press(KeyCode::Right);
        let (tilt_x, tilt_y) = tilt.sample();
        assert_eq!(tilt_x, 0.0);
        assert_eq!(tilt_y, 0.0);
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let mut tilt = KeyboardTilt::new();
        tilt.press(KeyCode::Char('x'));
        tilt.press(KeyCode::Enter);
        assert_eq!(tilt.sample(), (0.0, 0.0));
    }
}
