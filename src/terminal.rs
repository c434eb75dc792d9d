use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Back buffer plus the terminal it is flushed to
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Slot>>,
    alternate_screen: bool,
}

/// One character position in the back buffer
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

/// ANSI SGR foreground sequence for a crossterm color
pub fn ansi_fg(color: Color) -> Option<String> {
    let code = match color {
        Color::Rgb { r, g, b } => return Some(format!("\x1b[38;2;{};{};{}m", r, g, b)),
        Color::AnsiValue(v) => return Some(format!("\x1b[38;5;{}m", v)),
        Color::Black => 30,
        Color::DarkRed => 31,
        Color::DarkGreen => 32,
        Color::DarkYellow => 33,
        Color::DarkBlue => 34,
        Color::DarkMagenta => 35,
        Color::DarkCyan => 36,
        Color::Grey => 37,
        Color::DarkGrey => 90,
        Color::Red => 91,
        Color::Green => 92,
        Color::Yellow => 93,
        Color::Blue => 94,
        Color::Magenta => 95,
        Color::Cyan => 96,
        Color::White => 97,
        _ => return None,
    };
    Some(format!("\x1b[{}m", code))
}

impl Terminal {
    /// Take over the real terminal; with `alternate_screen` also enter raw mode
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        Ok(Self {
            width,
            height,
            buffer: vec![vec![Slot::default(); width as usize]; height as usize],
            alternate_screen,
        })
    }

    /// Buffer-only terminal of a fixed size, for printing a frame to a stream
    pub fn offscreen(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            buffer: vec![vec![Slot::default(); width as usize]; height as usize],
            alternate_screen: false,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Adopt new dimensions; the buffer is cleared
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = vec![vec![Slot::default(); width as usize]; height as usize];
    }

    /// Clear the back buffer
    pub fn clear(&mut self) {
        for slot in self.buffer.iter_mut().flatten() {
            *slot = Slot::default();
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Slot> {
        self.buffer.get(y as usize)?.get(x as usize)
    }

    /// Set a character at position; out-of-bounds writes are dropped
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Slot { ch, fg, bold };
        }
    }

    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    /// Flush the back buffer to the screen
    pub fn present(&self) -> io::Result<()> {
        let mut out = stdout().lock();

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;
            for slot in row {
                if slot.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                match slot.fg {
                    Some(color) => queue!(out, SetForegroundColor(color), Print(slot.ch), ResetColor)?,
                    None => queue!(out, Print(slot.ch))?,
                }
                if slot.bold {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                }
            }
        }

        out.flush()
    }

    /// Check for keypress (non-blocking), returns (code, modifiers)
    pub fn check_key(&self) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(Duration::from_millis(0))? {
            if let Event::Key(key) = read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(Some((key.code, key.modifiers)));
                }
            }
        }
        Ok(None)
    }

    pub fn sleep(&self, seconds: f32) {
        std::thread::sleep(Duration::from_secs_f32(seconds.max(0.0)));
    }

    /// Write the buffer as plain text with ANSI colors, one line per row.
    ///
    /// Escape sequences are only emitted where the style changes, so runs of
    /// same-styled text stay contiguous. Blanks never change the style.
    pub fn write_ansi<W: Write>(&self, out: &mut W) -> io::Result<()> {
        const PLAIN: (Option<Color>, bool) = (None, false);

        for row in &self.buffer {
            let line_end = row.iter().rposition(|s| s.ch != ' ').map_or(0, |i| i + 1);
            let mut style = PLAIN;
            for slot in &row[..line_end] {
                let wanted = (slot.fg, slot.bold);
                if slot.ch != ' ' && wanted != style {
                    if style != PLAIN {
                        write!(out, "\x1b[0m")?;
                    }
                    if slot.bold {
                        write!(out, "\x1b[1m")?;
                    }
                    if let Some(seq) = slot.fg.and_then(ansi_fg) {
                        write!(out, "{}", seq)?;
                    }
                    style = wanted;
                }
                write!(out, "{}", slot.ch)?;
            }
            if style != PLAIN {
                write!(out, "\x1b[0m")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}
