use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

use crate::actor::{Actor, Color};
use crate::error::GameError;
use crate::point::{Field, Point};
use crate::services::Video;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

const SEGMENT_CHAR: char = '█';

/// Columns taken by the left and right border.
pub const BORDER_COLUMNS: TermInt = 2;
/// Rows taken by the score line and the top and bottom border.
pub const CHROME_ROWS: TermInt = 4;

/// Crossterm-backed keyboard and video. The field is drawn inside a border,
/// one terminal cell per grid cell, below a line reserved for scores.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    field: Field,
}

impl TermManager {
    pub fn size() -> Result<Coords, GameError> {
        Ok(terminal::size()?)
    }

    pub fn new(field: Field) -> Result<Self, GameError> {
        let (width, height) = Self::size()?;
        Ok(TermManager { width, height, stdout: stdout(), field })
    }

    pub fn setup(&mut self) -> Result<(), GameError> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)?;
        terminal::enable_raw_mode()?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), GameError> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent, GameError> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Drains every key event that arrived since the last call.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>, GameError> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    /// Shows `lines` in a padded box centred on the field.
    pub fn show_message(&mut self, lines: &[&str]) -> Result<(), GameError> {
        self.queue_box(self.field.center(), lines, Color::Yellow)?;
        self.flush_buffer()
    }

    /// Writes a line just below the bottom border.
    pub fn show_status(&mut self, text: &str) -> Result<(), GameError> {
        let row = self.field.rows() as TermInt + CHROME_ROWS - 1;
        if row < self.height {
            queue!(self.stdout, cursor::MoveTo(1, row), style::ResetColor, style::Print(text))?;
        }
        self.flush_buffer()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self) -> Result<(), GameError> {
        let width = self.field.columns() as TermInt + BORDER_COLUMNS;
        let top = 1;
        let bottom = top + self.field.rows() as TermInt + 1;

        queue!(self.stdout, style::ResetColor)?;
        for x in 0..width {
            let ch = if x == 0 || x == width - 1 {'+'} else {'-'};
            self.print_at((x, top), ch)?;
            self.print_at((x, bottom), ch)?;
        }

        for y in top + 1..bottom {
            self.print_at((0, y), '|')?;
            self.print_at((width - 1, y), '|')?;
        }

        Ok(())
    }

    /// Maps a field position to its terminal cell, if that cell is on screen.
    fn to_screen(&self, p: Point) -> Option<Coords> {
        let x = p.x.div_euclid(self.field.cell_size) + 1;
        let y = p.y.div_euclid(self.field.cell_size) + 2;

        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            None
        } else {
            Some((x as TermInt, y as TermInt))
        }
    }

    fn queue_text(&mut self, at: Point, text: &str, color: Color) -> Result<(), GameError> {
        if let Some((x, y)) = self.to_screen(at) {
            let room = self.width.saturating_sub(x) as usize;
            let text: String = text.chars().take(room).collect();
            queue!(self.stdout, cursor::MoveTo(x, y), style::SetForegroundColor(term_color(color)), style::Print(text))?;
        }
        Ok(())
    }

    fn queue_box(&mut self, center: Point, lines: &[&str], color: Color) -> Result<(), GameError> {
        let (cx, cy) = match self.to_screen(center) {
            Some(c) => c,
            None => (self.width / 2, self.height / 2),
        };

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let top_left = (cx.saturating_sub(msg_width / 2), cy.saturating_sub(msg_height / 2));

        queue!(self.stdout, style::SetForegroundColor(term_color(color)))?;

        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            queue!(self.stdout, cursor::MoveTo(top_left.0, *y), style::Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<(), GameError> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }
}

impl Video for TermManager {
    fn clear_buffer(&mut self) -> Result<(), GameError> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        self.draw_borders()
    }

    fn draw_actor(&mut self, actor: &Actor) -> Result<(), GameError> {
        match actor {
            Actor::Segment(segment) => {
                if let Some((x, y)) = self.to_screen(segment.position) {
                    queue!(self.stdout, style::SetForegroundColor(term_color(segment.color)))?;
                    self.print_at((x, y), SEGMENT_CHAR)?;
                }
                Ok(())
            }
            Actor::ScoreDisplay(score) => self.queue_text(score.position, &score.text(), score.color),
            Actor::Message(message) => self.queue_text(message.position, &message.text, message.color),
        }
    }

    fn draw_actors(&mut self, actors: &[Actor], overlay: bool) -> Result<(), GameError> {
        if !overlay {
            for actor in actors {
                self.draw_actor(actor)?;
            }
            return Ok(());
        }

        let first = match actors.first() {
            Some(actor) => actor,
            None => return Ok(()),
        };
        let lines: Vec<&str> = actors
            .iter()
            .filter_map(|a| match a {
                Actor::Message(m) => Some(m.text.as_str()),
                _ => None,
            })
            .collect();
        self.queue_box(first.position(), &lines, first.color())
    }

    fn flush_buffer(&mut self) -> Result<(), GameError> {
        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn term_color(color: Color) -> style::Color {
    match color {
        Color::Red => style::Color::Red,
        Color::Green => style::Color::Green,
        Color::White => style::Color::White,
        Color::Yellow => style::Color::Yellow,
    }
}
