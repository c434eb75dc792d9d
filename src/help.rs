use crate::terminal::Terminal;
use crossterm::style::Color;

pub const HELP_TEXT: &str = "\
LIFETERM
space   Pause / resume
+ / -   Faster / slower
s .     Single step (paused)
r       Reseed at random
!..)    Color scheme (Shift+1..0)
?       Toggle this help
q Esc   Quit";

/// Draw a centered box with `text` over whatever is in the back buffer.
pub fn draw_help(term: &mut Terminal, text: &str) {
    if text.is_empty() {
        return;
    }

    let (width, height) = term.size();
    let lines: Vec<&str> = text.lines().collect();
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_w = inner + 4;
    let box_h = lines.len() + 2;
    let left = (width as usize).saturating_sub(box_w) / 2;
    let top = (height as usize).saturating_sub(box_h) / 2;

    let border = Some(Color::White);
    let body = Some(Color::Grey);
    let (x0, y0) = (left as i32, top as i32);
    let (x1, y1) = ((left + box_w - 1) as i32, (top + box_h - 1) as i32);

    let rule = "─".repeat(box_w - 2);
    term.set(x0, y0, '┌', border, false);
    term.set_str(x0 + 1, y0, &rule, border, false);
    term.set(x1, y0, '┐', border, false);

    for (i, line) in lines.iter().enumerate() {
        let y = y0 + 1 + i as i32;
        term.set(x0, y, '│', border, false);
        term.set_str(x0 + 1, y, &format!(" {:<inner$} ", line, inner = inner), body, i == 0);
        term.set(x1, y, '│', border, false);
    }

    term.set(x0, y1, '└', border, false);
    term.set_str(x0 + 1, y1, &rule, border, false);
    term.set(x1, y1, '┘', border, false);
}
