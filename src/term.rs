use std::io::{self, stdout, BufRead, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, PrintStyledContent, Stylize};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::error::TermError;
use crate::input::{InputSource, Key};
use crate::render::{Frame, Renderer, Tint, RAINBOW_LEN};
use crate::snake::{Direction, Position};

const FALLBACK_SIZE: (u16, u16) = (80, 24);

const RAINBOW: [Color; RAINBOW_LEN] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// Holds the terminal in raw mode on the alternate screen.
///
/// Entering happens in [`TermGuard::acquire`] and leaving in `Drop`, so the
/// terminal is restored on every exit path, including errors and Ctrl+C. If
/// raw mode is unavailable (no tty) the guard is inert and the input half
/// runs disabled: polls return nothing and prompts read whole lines.
pub struct TermGuard {
    raw: bool,
}

impl TermGuard {
    pub fn acquire() -> Self {
        let raw = match terminal::enable_raw_mode() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Raw mode unavailable, input disabled: {}", e);
                false
            }
        };

        if raw {
            if let Err(e) = execute!(stdout(), EnterAlternateScreen, cursor::Hide) {
                log::warn!("Could not enter alternate screen: {}", e);
            }
        }

        TermGuard { raw }
    }

    pub fn input(&self) -> TermInput {
        TermInput { raw: self.raw }
    }

    pub fn screen(&self) -> TermScreen {
        TermScreen { out: stdout() }
    }
}

impl Drop for TermGuard {
    fn drop(&mut self) {
        if !self.raw {
            return;
        }

        if terminal::disable_raw_mode().is_err() {
            log::error!("Failed to disable raw mode");
        }

        if execute!(stdout(), cursor::Show, LeaveAlternateScreen).is_err() {
            log::error!("Failed to restore screen");
        }
    }
}

pub struct TermInput {
    raw: bool,
}

impl TermInput {
    fn read_line_key(&self) -> Key {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => Key::Interrupt,
            Ok(_) => line.trim().chars().next().map_or(Key::Enter, Key::Char),
        }
    }
}

impl InputSource for TermInput {
    fn poll_key(&mut self) -> Option<Key> {
        if !self.raw {
            return None;
        }

        match poll(Duration::ZERO) {
            Ok(true) => match read() {
                Ok(Event::Key(ev)) => decode_key(&ev),
                Ok(_) => None,
                Err(e) => {
                    log::warn!("Reading key failed: {}", e);
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                log::warn!("Polling input failed: {}", e);
                None
            }
        }
    }

    fn wait_for_any_key(&mut self) -> Key {
        if !self.raw {
            return self.read_line_key();
        }

        loop {
            match read() {
                Ok(Event::Key(ev)) => {
                    if let Some(key) = decode_key(&ev) {
                        return key;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("Reading key failed: {}", e);
                    return Key::Interrupt;
                }
            }
        }
    }
}

/// Draws centred text, clearing the whole screen first.
pub struct TermScreen<W = Stdout> {
    out: W,
}

impl<W: Write> TermScreen<W> {
    /// Board rows of `frame` are coloured cell by cell; all other lines are printed as is.
    fn draw_lines(&mut self, lines: &[String], frame: Option<&Frame<'_>>) -> Result<(), TermError> {
        let (cols, rows) = self.viewport();
        let height = lines.len() as u16;
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        let top = rows.saturating_sub(height) / 2;
        let left = cols.saturating_sub(width) / 2;

        queue!(self.out, terminal::Clear(ClearType::All))?;

        for (i, line) in lines.iter().enumerate() {
            queue!(self.out, cursor::MoveTo(left, top + i as u16))?;

            match frame {
                Some(frame) if frame.grid_rows().contains(&i) => {
                    let row = (i - frame.grid_rows().start) as i32;
                    for (col, ch) in line.chars().enumerate() {
                        self.print_cell(ch, frame.tint_at(Position::new(row, col as i32)))?;
                    }
                }
                _ => queue!(self.out, Print(line))?,
            }
        }

        self.out.flush()?;
        Ok(())
    }

    fn print_cell(&mut self, ch: char, tint: Tint) -> io::Result<()> {
        let content = match tint {
            Tint::Plain => return queue!(self.out, Print(ch)),
            Tint::Corner => ch.with(Color::White).attribute(Attribute::Bold),
            Tint::Wall => ch.with(Color::DarkGrey),
            Tint::Head { highlighted: true } => ch.with(Color::Green).on(Color::DarkGreen).attribute(Attribute::Bold),
            Tint::Head { highlighted: false } | Tint::Body { bright: true } => {
                ch.with(Color::Green).attribute(Attribute::Bold)
            }
            Tint::Body { bright: false } => ch.with(Color::Green),
            Tint::Food => ch.with(Color::Red).attribute(Attribute::Bold),
            Tint::Rainbow(i) => ch.with(RAINBOW[i % RAINBOW_LEN]).attribute(Attribute::Bold),
        };

        queue!(self.out, PrintStyledContent(content))
    }
}

impl<W: Write> Renderer for TermScreen<W> {
    fn render_frame(&mut self, frame: &Frame<'_>) -> Result<(), TermError> {
        self.draw_lines(&frame.compose(), Some(frame))
    }

    fn show_screen(&mut self, lines: &[String]) -> Result<(), TermError> {
        self.draw_lines(lines, None)
    }

    fn viewport(&self) -> (u16, u16) {
        terminal::size().unwrap_or(FALLBACK_SIZE)
    }
}

/// Maps a crossterm key press to a [`Key`]. Releases and repeats are dropped.
fn decode_key(ev: &KeyEvent) -> Option<Key> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    let key = match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Arrow(Direction::Up),
        KeyCode::Down => Key::Arrow(Direction::Down),
        KeyCode::Left => Key::Arrow(Direction::Left),
        KeyCode::Right => Key::Arrow(Direction::Right),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        _ => return None,
    };

    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::render::Hud;
    use crate::snake::Snake;

    #[test]
    fn ctrl_c_is_interrupt() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(decode_key(&ev), Some(Key::Interrupt));

        let plain = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(decode_key(&plain), Some(Key::Char('c')));
    }

    #[test]
    fn arrows_decode_to_directions() {
        let ev = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(decode_key(&ev), Some(Key::Arrow(Direction::Left)));
    }

    #[test]
    fn releases_are_ignored() {
        let ev = KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(decode_key(&ev), None);
    }

    #[test]
    fn only_board_cells_are_coloured() {
        let board = Board::new(10, 20);
        let snake = Snake::new(Position::new(5, 10), 3, Direction::Right);
        let hud = Hud { score: 0, level: 1, length: 3, foods_eaten: 0 };
        let frame = Frame { board: &board, snake: &snake, food: Position::new(2, 3), hud, paused: false };
        let lines = frame.compose();

        let mut screen = TermScreen { out: Vec::new() };
        screen.render_frame(&frame).unwrap();
        let out = String::from_utf8(screen.out).unwrap();

        // Text lines come out verbatim, board rows are broken up by colour codes
        assert!(out.contains(&lines[0]));
        assert!(out.contains(&lines[1]));
        assert!(out.contains(lines.last().unwrap()));
        assert!(!out.contains(&lines[2]));
        assert!(!out.contains(&lines[7]));
    }

    #[test]
    fn screens_are_printed_plain() {
        let lines = vec!["Score * o @".to_string()];
        let mut screen = TermScreen { out: Vec::new() };
        screen.show_screen(&lines).unwrap();
        assert!(String::from_utf8(screen.out).unwrap().contains("Score * o @"));
    }

    #[test]
    fn disabled_input_never_polls() {
        let mut input = TermInput { raw: false };
        assert_eq!(input.poll_key(), None);
    }
}
