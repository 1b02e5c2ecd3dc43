/// Presentation layer: full-redraw terminal renderer.
///
/// How it works:
///   1. `compose_frame` turns a board snapshot + status into text lines
///   2. `render` clears the screen and writes every line
///   3. All commands are batched with `queue!`, flushed once at the end
///
/// The board is small and turn-based, so every frame is a full redraw.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::config::CellSpacing;
use crate::sim::snapshot::{self, BoardSnapshot, Status};
use crate::sim::world::GameState;

pub const DEAD_BANNER: &str = "***** DEAD *****";
pub const WON_BANNER: &str = "***** YOU WON *****";

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(4096, io::stdout()),
        }
    }

    /// Raw mode stays on until `cleanup`, so Ctrl-C arrives as a key
    /// even while a frame is being drawn.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &GameState) -> io::Result<()> {
        let board = snapshot::render_snapshot(world);
        let status = snapshot::status(world);
        let lines = compose_frame(&board, &status, world.config.board.spacing);

        queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        for (row, line) in lines.iter().enumerate() {
            queue!(self.writer, MoveTo(0, row as u16))?;
            let color = line_color(line);
            if color != Color::Reset {
                queue!(self.writer, SetForegroundColor(color), Print(line), ResetColor)?;
            } else {
                queue!(self.writer, Print(line))?;
            }
        }
        self.writer.flush()
    }
}

fn line_color(line: &str) -> Color {
    match line {
        DEAD_BANNER => Color::Red,
        WON_BANNER => Color::Green,
        _ => Color::Reset,
    }
}

// ── Compose: build frame text ──

/// Bordered board followed by the status panel.
pub fn compose_frame(board: &BoardSnapshot, status: &Status, spacing: CellSpacing) -> Vec<String> {
    let cell_w = match spacing {
        CellSpacing::Compact => 1,
        CellSpacing::Spaced => 2,
    };
    let border = format!("+{}+", "-".repeat(board.width * cell_w));

    let mut lines = Vec::with_capacity(board.height + 10);
    lines.push(border.clone());
    for row in board.rows() {
        let mut line = String::with_capacity(board.width * cell_w + 2);
        line.push('|');
        for &glyph in row {
            line.push(glyph);
            if spacing == CellSpacing::Spaced {
                line.push(' ');
            }
        }
        line.push('|');
        lines.push(line);
    }
    lines.push(border);

    lines.push(format!("       level: {}", status.level));
    lines.push(format!("u k i  left: {}", status.baddies_left));
    lines.push("h   l  q=quit".to_string());
    match status.teleports {
        Some(n) => lines.push(format!("n j m  t=teleport [{n}]")),
        None => lines.push("n j m".to_string()),
    }
    if let Some(n) = status.zaps {
        lines.push(format!("       z=zap [{n}]"));
    }
    if status.dead {
        lines.push(DEAD_BANNER.to_string());
        lines.push("r=restart".to_string());
    }
    if status.won {
        lines.push(WON_BANNER.to_string());
    }
    if !status.message.is_empty() {
        lines.push(status.message.clone());
    }
    lines
}
