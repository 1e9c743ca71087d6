use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Stdout, Write};
use unicode_width::UnicodeWidthStr;

use crate::maze::{Maze, Pos};
use crate::session::Session;

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Wall,
    Floor,
}

#[derive(Clone, Copy, PartialEq)]
struct ScreenCell {
    glyph: Glyph,
    color: Color,
}

pub struct Renderer {
    last: Vec<ScreenCell>,
    last_hud: String,
    last_status: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
    cols: usize,
    rows: usize,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        // The maze is drawn doubled out: cell (x, y) sits at display
        // (2x + 1, 2y + 1), with walls on the even rows and columns between.
        let cols = width * 2 + 1;
        let rows = height * 2 + 1;
        Self {
            last: vec![
                ScreenCell {
                    glyph: Glyph::Floor,
                    color: Color::Reset,
                };
                cols * rows
            ],
            last_hud: String::new(),
            last_status: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
            cols,
            rows,
        }
    }
}

pub fn render(stdout: &mut Stdout, session: &Session, renderer: &mut Renderer) -> io::Result<()> {
    let needed_h = (renderer.rows + 2) as u16;
    let needed_w = (renderer.cols * CELL_W) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    let hud = format!(
        "Tilt Maze {}x{}  (arrows/hjkl: tilt, r: new maze, q: quit)",
        session.maze.width(),
        session.maze.height()
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    let (tilt_x, tilt_y) = session.last_tilt;
    let status = format!("tilt x: {:+.2}  y: {:+.2}", tilt_x, tilt_y);
    if renderer.needs_full || status != renderer.last_status {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y + renderer.rows as u16))?;
        stdout.queue(SetForegroundColor(Color::DarkGrey))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&status))?;
        stdout.queue(ResetColor)?;
        renderer.last_status = status;
    }

    for gy in 0..renderer.rows {
        for gx in 0..renderer.cols {
            let cell = screen_cell_for(session, gx, gy);
            let idx = gy * renderer.cols + gx;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_screen_cell(stdout, renderer, gx, gy, cell)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn screen_cell_for(session: &Session, gx: usize, gy: usize) -> ScreenCell {
    if gx % 2 == 1 && gy % 2 == 1 {
        let pos = Pos {
            x: gx / 2,
            y: gy / 2,
        };
        if pos == session.player {
            return ScreenCell {
                glyph: Glyph::Player,
                color: Color::Red,
            };
        }
        return ScreenCell {
            glyph: Glyph::Floor,
            color: Color::Reset,
        };
    }
    if wall_segment(&session.maze, gx, gy) {
        ScreenCell {
            glyph: Glyph::Wall,
            color: Color::White,
        }
    } else {
        ScreenCell {
            glyph: Glyph::Floor,
            color: Color::Reset,
        }
    }
}

// Maps a display-grid position onto the wall flags of the bordering cell.
// Posts (even/even) are always drawn; a perfect maze cannot leave one
// floating free of every adjacent wall segment.
fn wall_segment(maze: &Maze, gx: usize, gy: usize) -> bool {
    match (gx % 2, gy % 2) {
        (0, 0) => true,
        (0, 1) => {
            let y = gy / 2;
            if gx == 0 {
                maze.cell(0, y).left
            } else {
                maze.cell(gx / 2 - 1, y).right
            }
        }
        (1, 0) => {
            let x = gx / 2;
            if gy == 0 {
                maze.cell(x, 0).top
            } else {
                maze.cell(x, gy / 2 - 1).bottom
            }
        }
        _ => false,
    }
}

fn draw_screen_cell(
    stdout: &mut Stdout,
    renderer: &Renderer,
    gx: usize,
    gy: usize,
    cell: ScreenCell,
) -> io::Result<()> {
    let (text, color) = match cell.glyph {
        Glyph::Player => ("🔴", cell.color),
        Glyph::Wall => ("██", cell.color),
        Glyph::Floor => ("  ", cell.color),
    };
    let x_pos = renderer.origin_x + (gx * CELL_W) as u16;
    let y_pos = renderer.origin_y + gy as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}
