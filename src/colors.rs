use crate::cell::ColorTag;
use crossterm::event::KeyCode;
use crossterm::style::Color;

/// Scheme that uses the fixed semantic palette instead of a themed ramp
pub const MONO_SCHEME: u8 = 7;

/// Shared color scheme state
#[derive(Clone, Copy)]
pub struct ColorState {
    pub scheme: u8,
}

impl ColorState {
    pub fn new(default_scheme: u8) -> Self {
        Self { scheme: default_scheme.min(9) }
    }

    /// Handle color scheme key input. Returns true if key was handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('!') => self.scheme = 1,  // Shift+1: fire
            KeyCode::Char('@') => self.scheme = 2,  // Shift+2: ice
            KeyCode::Char('#') => self.scheme = 3,  // Shift+3: pink
            KeyCode::Char('$') => self.scheme = 4,  // Shift+4: gold
            KeyCode::Char('%') => self.scheme = 5,  // Shift+5: electric
            KeyCode::Char('^') => self.scheme = 6,  // Shift+6: lava
            KeyCode::Char('&') => self.scheme = 7,  // Shift+7: mono
            KeyCode::Char('*') => self.scheme = 8,  // Shift+8: rainbow
            KeyCode::Char('(') => self.scheme = 9,  // Shift+9: neon
            KeyCode::Char(')') => self.scheme = 0,  // Shift+0: green
            _ => return false,
        }
        true
    }

    pub fn is_mono(&self) -> bool {
        self.scheme == MONO_SCHEME
    }
}

/// Four colours per scheme, dimmest first. Index is the scheme number.
const RAMPS: [[Color; 4]; 10] = [
    [Color::DarkGreen, Color::Green, Color::Green, Color::AnsiValue(10)],
    [Color::DarkRed, Color::Red, Color::DarkYellow, Color::Yellow],
    [Color::DarkBlue, Color::Blue, Color::DarkCyan, Color::Cyan],
    [Color::DarkMagenta, Color::AnsiValue(132), Color::Magenta, Color::AnsiValue(13)],
    [Color::AnsiValue(94), Color::DarkYellow, Color::Yellow, Color::AnsiValue(11)],
    [Color::AnsiValue(30), Color::DarkCyan, Color::Cyan, Color::AnsiValue(14)],
    [Color::AnsiValue(52), Color::DarkRed, Color::Red, Color::AnsiValue(9)],
    [Color::DarkGrey, Color::Grey, Color::White, Color::White],
    [Color::Red, Color::Yellow, Color::Green, Color::Cyan],
    [Color::DarkBlue, Color::Blue, Color::Magenta, Color::AnsiValue(13)],
];

fn ramp(scheme: u8) -> &'static [Color; 4] {
    &RAMPS[scheme as usize % RAMPS.len()]
}

/// Step on a scheme's ramp for a transition class, or `None` for classes
/// whose colour does not depend on the scheme.
fn ramp_step(tag: ColorTag) -> Option<usize> {
    match tag {
        ColorTag::JustDied => Some(0),
        ColorTag::Elder => Some(1),
        ColorTag::Alive => Some(2),
        ColorTag::Newborn => Some(3),
        ColorTag::Dead | ColorTag::Immortal | ColorTag::ImmortalNewborn => None,
    }
}

/// Terminal color for a cell's color class.
///
/// The mono scheme uses the semantic palette: grey dead cells, red fresh
/// deaths, bright green births, green survivors, dark green elders and
/// yellow immortals. Other schemes put the transition classes on their ramp.
pub fn tag_color(scheme: u8, tag: ColorTag) -> (Color, bool) {
    if scheme == MONO_SCHEME {
        return match tag {
            ColorTag::Dead => (Color::Grey, false),
            ColorTag::JustDied => (Color::DarkRed, false),
            ColorTag::Newborn => (Color::Green, true),
            ColorTag::Alive => (Color::DarkGreen, false),
            ColorTag::Elder => (Color::AnsiValue(22), false),
            ColorTag::Immortal => (Color::DarkYellow, false),
            ColorTag::ImmortalNewborn => (Color::Yellow, true),
        };
    }

    if let Some(step) = ramp_step(tag) {
        return (ramp(scheme)[step], tag == ColorTag::Newborn);
    }
    match tag {
        ColorTag::Dead => (Color::DarkGrey, false),
        ColorTag::Immortal => (Color::DarkYellow, true),
        _ => (Color::Yellow, true),
    }
}

/// Color of the status line
pub fn status_color(scheme: u8) -> Color {
    if scheme == MONO_SCHEME {
        Color::Yellow
    } else {
        ramp(scheme)[2]
    }
}
