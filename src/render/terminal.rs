//! Flushes a framebuffer to the real terminal, one full redraw per frame.
use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal,
};

use crate::error::Result;
use crate::render::framebuffer::Framebuffer;

pub struct TerminalSurface {
    stdout: io::Stdout,
    line: String,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self { stdout: io::stdout(), line: String::new() }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, fb: &Framebuffer) -> Result<()> {
        for (y, row) in fb.rows().enumerate() {
            self.line.clear();
            self.line.extend(row.iter());
            self.stdout.queue(cursor::MoveTo(0, y as u16))?;
            self.stdout.queue(Print(&self.line))?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}
