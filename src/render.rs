use std::{collections::HashSet, fmt, io::Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    maze::{Cell, Coord},
    session::{Phase, Session},
};

/// What gets drawn in one slot of the wall array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Cell(Cell),
    /// Current carving position
    Cursor,
    /// Part of the revealed solution
    Route,
    Entrance,
    Exit,
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Glyph::Cell(cell) => return write!(f, "{}", cell),
            Glyph::Cursor => "🟪".with(Color::Magenta),
            Glyph::Route => "🟨".with(Color::Yellow),
            Glyph::Entrance => "🟩".with(Color::Green),
            Glyph::Exit => "🟥".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Cell::CELL_WIDTH as usize,
                "Each glyph must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Picks the glyph for every slot of the session's grid, row by row.
pub fn glyph_rows(session: &Session) -> Vec<Vec<Glyph>> {
    let grid = session.grid();
    let route: HashSet<Coord> = session.visible_solution().iter().copied().collect();
    let cursor = (session.phase() == Phase::Generating).then(|| session.carver().cursor());

    grid.rows()
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(|(x, &cell)| {
                    let coord = (x as u16, y as u16);
                    if Some(coord) == cursor {
                        Glyph::Cursor
                    } else if route.contains(&coord) {
                        Glyph::Route
                    } else if cell.is_open() && coord == grid.entrance() {
                        Glyph::Entrance
                    } else if cell.is_open() && coord == grid.exit() {
                        Glyph::Exit
                    } else {
                        Glyph::Cell(cell)
                    }
                })
                .collect()
        })
        .collect()
}

/// Draws the maze and the session status, top-left aligned.
pub fn draw<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    out.queue(terminal::Clear(ClearType::All))?;
    for (y, row) in glyph_rows(session).iter().enumerate() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        for glyph in row {
            out.queue(style::Print(glyph))?;
        }
    }

    let mut line = session.grid().array_height();
    for text in session.info().lines() {
        out.queue(cursor::MoveTo(0, line))?;
        out.queue(style::PrintStyledContent(
            text.with(Color::Green).attribute(Attribute::Bold),
        ))?;
        line += 1;
    }
    out.queue(cursor::MoveTo(0, line))?;
    out.queue(style::PrintStyledContent(
        "Enter: generate  s: solve  space: instant  g: animation  f: animate path  v: show path  1-3: algorithm  +/-: size  Esc: quit"
            .with(Color::Blue),
    ))?;
    out.flush()
}
