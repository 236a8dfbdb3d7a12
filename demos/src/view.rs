//! Terminal rendering of a board and its overlay.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};

use escape_core::{Cell, Grid, Position};

use crate::{Mark, Overlay};

const EMPTY: Color = rgb(0x3C, 0x3C, 0x3C);
const WALL: Color = rgb(0x61, 0x61, 0x61);
const HAZARD: Color = rgb(0xFF, 0x98, 0x00);
const START: Color = rgb(0x4C, 0xAF, 0x50);
const END: Color = rgb(0xF4, 0x43, 0x36);
const PATH: Color = rgb(0x00, 0xBC, 0xD4);
const VISITED: Color = rgb(0x4A, 0x5A, 0x6A);

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

/// Background colour of a square. Start and End always keep their own
/// colour; elsewhere a mark wins over the terrain.
fn cell_color(cell: Cell, mark: Option<Mark>) -> Color {
    match (cell, mark) {
        (Cell::Start, _) => START,
        (Cell::End, _) => END,
        (_, Some(Mark::Path)) => PATH,
        (_, Some(Mark::Visited)) => VISITED,
        (Cell::Wall, None) => WALL,
        (Cell::Hazard, None) => HAZARD,
        (Cell::Empty, None) => EMPTY,
    }
}

/// Glyph used by the plain-text renderer.
fn cell_glyph(cell: Cell, mark: Option<Mark>) -> char {
    match (cell, mark) {
        (Cell::Start | Cell::End, _) => cell.glyph(),
        (_, Some(Mark::Path)) => 'o',
        (_, Some(Mark::Visited)) => '+',
        (c, None) => c.glyph(),
    }
}

/// Render the board as text: map glyphs, with `+` for visited and `o` for
/// route cells.
pub fn render_plain(grid: &Grid, overlay: &Overlay) -> String {
    let mut out = String::with_capacity(grid.len() + grid.rows() as usize);
    for row in 0..grid.rows() {
        if row > 0 {
            out.push('\n');
        }
        for col in 0..grid.cols() {
            let p = Position::new(row, col);
            let cell = grid.get(p).unwrap_or_default();
            out.push(cell_glyph(cell, overlay.get(p)));
        }
    }
    out
}

/// Paint the board at the top-left of the terminal, two columns per square.
pub fn draw<W: Write>(out: &mut W, grid: &Grid, overlay: &Overlay) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0))?;
    for row in 0..grid.rows() {
        queue!(out, cursor::MoveTo(0, row as u16))?;
        for col in 0..grid.cols() {
            let p = Position::new(row, col);
            let cell = grid.get(p).unwrap_or_default();
            queue!(
                out,
                SetBackgroundColor(cell_color(cell, overlay.get(p))),
                Print("  ")
            )?;
        }
        queue!(out, ResetColor)?;
    }
    queue!(out, cursor::MoveTo(0, grid.rows() as u16))?;
    out.flush()
}

/// Clear the screen before the first frame.
pub fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    out.flush()
}
