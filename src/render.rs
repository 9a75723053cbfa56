//! Terminal view of a session.
//!
//! The maze is drawn on a `(2N+1)²` lattice: cells sit on odd coordinates,
//! the walls between them on the mixed ones and wall corners on even ones.
//! Each lattice tile takes `CELL_W` columns.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::grid::{Grid, Pos};
use crate::session::Session;

pub const CELL_W: usize = 2;
const HUD_ROWS: usize = 2;
const HELP: &str = "arrows/wasd/hjkl: move  n: new game  q: quit";
const PLAYING: &str = "Find the path to the green circle";
const WON: &str = "Congratulations! You won";
/// Move counts up to this many digits fit the status line unclipped.
const MOVES_DIGITS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
}

/// Wall/floor lattice of `grid`, indexed `[ly][lx]`.
pub fn lattice(grid: &Grid) -> Vec<Vec<Tile>> {
    let n = grid.size();
    let side = 2 * n + 1;
    let mut out = vec![vec![Tile::Wall; side]; side];
    for y in 0..n {
        for x in 0..n {
            let cell = grid.cell(Pos::new(x, y));
            let (lx, ly) = (2 * x + 1, 2 * y + 1);
            out[ly][lx] = Tile::Floor;
            // Right and bottom cover every interior wall; the outer rim
            // stays solid.
            if !cell.right && x + 1 < n {
                out[ly][lx + 1] = Tile::Floor;
            }
            if !cell.bottom && y + 1 < n {
                out[ly + 1][lx] = Tile::Floor;
            }
        }
    }
    out
}

/// Columns and rows needed to show a maze of `size` cells plus the HUD.
///
/// The width covers both the lattice and the widest status or help line.
pub fn view_dims(size: usize) -> (u16, u16) {
    let side = 2 * size + 1;
    let width = lattice_w(size).max(hud_w(size));
    (width as u16, (side + HUD_ROWS) as u16)
}

pub fn status_line(session: &Session) -> String {
    let msg = if session.is_won() { WON } else { PLAYING };
    format_status(msg, session.grid().size(), session.moves())
}

fn format_status(msg: &str, n: usize, moves: impl std::fmt::Display) -> String {
    format!("{msg}  Size: {n}x{n}  Moves: {moves}")
}

fn lattice_w(size: usize) -> usize {
    (2 * size + 1) * CELL_W
}

fn hud_w(size: usize) -> usize {
    let widest = PLAYING.width().max(WON.width());
    let status = format_status(&" ".repeat(widest), size, "9".repeat(MOVES_DIGITS));
    status.width().max(HELP.width())
}

/// Longest prefix of `text` that fits in `cols` terminal columns.
fn clip(text: &str, cols: usize) -> &str {
    let mut used = 0;
    for (i, ch) in text.char_indices() {
        used += ch.width().unwrap_or(0);
        if used > cols {
            return &text[..i];
        }
    }
    text
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Glyph {
    Wall,
    Floor,
    Player,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Paint {
    glyph: Glyph,
    color: Color,
}

pub struct Renderer {
    last: Vec<Paint>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
    maze_x: u16,
    color: bool,
}

impl Renderer {
    pub fn new(size: usize, color: bool) -> Self {
        let side = 2 * size + 1;
        Self {
            last: vec![
                Paint {
                    glyph: Glyph::Floor,
                    color: Color::Reset,
                };
                side * side
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
            maze_x: 0,
            color,
        }
    }

    /// Forces the next `render` to redraw everything, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn render<W: Write>(&mut self, out: &mut W, session: &Session) -> io::Result<()> {
        let (term_w, term_h) = terminal::size()?;
        self.render_sized(out, session, term_w, term_h)
    }

    fn render_sized<W: Write>(
        &mut self,
        out: &mut W,
        session: &Session,
        term_w: u16,
        term_h: u16,
    ) -> io::Result<()> {
        let size = session.grid().size();
        let side = 2 * size + 1;
        if self.last.len() != side * side {
            *self = Renderer::new(size, self.color);
        }
        let (needed_w, needed_h) = view_dims(size);

        out.queue(MoveTo(0, 0))?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        let maze_x = origin_x + (needed_w - lattice_w(size) as u16) / 2;
        if origin_x != self.origin_x || origin_y != self.origin_y || maze_x != self.maze_x {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.maze_x = maze_x;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
            out.queue(MoveTo(self.origin_x, self.origin_y + side as u16))?;
            out.queue(Print(HELP))?;
        }

        let hud = status_line(session);
        if self.needs_full || hud != self.last_hud {
            let hud_color = if session.is_won() {
                Color::Green
            } else {
                Color::White
            };
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            self.queue_color(out, hud_color)?;
            out.queue(Print(clip(&hud, needed_w as usize)))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        let tiles = lattice(session.grid());
        let player = lattice_pos(session.position());
        let exit = lattice_pos(session.grid().exit());
        for (ly, row) in tiles.iter().enumerate() {
            for (lx, &tile) in row.iter().enumerate() {
                let paint = paint_for(tile, Pos::new(lx, ly), player, exit);
                let idx = ly * side + lx;
                if self.needs_full || paint != self.last[idx] {
                    self.last[idx] = paint;
                    self.draw_tile(out, lx, ly, paint)?;
                }
            }
        }
        self.needs_full = false;

        out.flush()
    }

    fn draw_tile<W: Write>(&self, out: &mut W, lx: usize, ly: usize, paint: Paint) -> io::Result<()> {
        let text = match paint.glyph {
            Glyph::Wall => "██",
            Glyph::Floor => "  ",
            Glyph::Player => "●",
            Glyph::Exit => "◎",
        };
        let x_pos = self.maze_x + (lx * CELL_W) as u16;
        let y_pos = self.origin_y + ly as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        self.queue_color(out, paint.color)?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                out.queue(Print(' '))?;
            }
        }
        out.queue(ResetColor)?;
        Ok(())
    }

    fn queue_color<W: Write>(&self, out: &mut W, color: Color) -> io::Result<()> {
        if self.color {
            out.queue(SetForegroundColor(color))?;
        }
        Ok(())
    }
}

fn lattice_pos(pos: Pos) -> Pos {
    Pos::new(2 * pos.x + 1, 2 * pos.y + 1)
}

fn paint_for(tile: Tile, at: Pos, player: Pos, exit: Pos) -> Paint {
    if at == player {
        return Paint {
            glyph: Glyph::Player,
            color: Color::Blue,
        };
    }
    if at == exit {
        return Paint {
            glyph: Glyph::Exit,
            color: Color::Green,
        };
    }
    match tile {
        Tile::Wall => Paint {
            glyph: Glyph::Wall,
            color: Color::Grey,
        },
        Tile::Floor => Paint {
            glyph: Glyph::Floor,
            color: Color::Reset,
        },
    }
}
