use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

mod maze;
mod movement;
mod render;
mod session;
mod tilt;

use render::Renderer;
use session::Session;
use tilt::KeyboardTilt;

const DEFAULT_GRID_W: usize = 10;
const DEFAULT_GRID_H: usize = 10;
const DEFAULT_TICK_MS: u64 = 120;
const DEFAULT_RENDER_FPS: u64 = 60;

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let (grid_w, grid_h, tick_ms, render_fps) = read_settings();
    let mut session = Session::new(&mut rng, grid_w, grid_h);
    let mut tilt = KeyboardTilt::new();
    let mut renderer = Renderer::new(grid_w, grid_h);
    let mut last_tick = Instant::now();
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('r') => session.restart(&mut rng),
                        code => tilt.press(code),
                    },
                    _ => {}
                }
            }
        }

        // One sample per tick, resolved in arrival order; rendering runs at
        // its own cadence in between.
        if last_tick.elapsed() >= Duration::from_millis(tick_ms) {
            last_tick = Instant::now();
            let (tilt_x, tilt_y) = tilt.sample();
            session.apply_sample(tilt_x, tilt_y);
        }
        render::render(stdout, &session, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn read_settings() -> (usize, usize, u64, u64) {
    let grid_w = std::env::var("TILTMAZE_COLS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_GRID_W);
    let grid_h = std::env::var("TILTMAZE_ROWS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_GRID_H);
    let tick_ms = std::env::var("TILTMAZE_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    let render_fps = std::env::var("TILTMAZE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS);
    (grid_w, grid_h, tick_ms, render_fps)
}
