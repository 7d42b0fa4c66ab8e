use crate::terminal::Terminal;
use crossterm::style::Color;

/// Key reference shown by `?`
pub const HELP: &str = "\
NETGLOBE
─────────────────
q/Esc  Quit
Space  Pause
?      Toggle help
r      New globe
↑/k    Tilt up
↓/j    Tilt down
+/-    Zoom in/out
z      Reset zoom
0-9    Time scale
⇧0-9   Color scheme";

/// Draw a centered box with `text` into the terminal buffer.
pub fn render_help_overlay(term: &mut Terminal, text: &str) {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return;
    }

    let (width, height) = term.size();
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = inner + 4;
    let box_height = lines.len() + 2;

    let x0 = (width as usize).saturating_sub(box_width) as i32 / 2;
    let y0 = (height as usize).saturating_sub(box_height) as i32 / 2;
    let border = Some(Color::White);
    let rule = "─".repeat(box_width - 2);

    term.set_str(x0, y0, &format!("┌{}┐", rule), border, false);
    for (i, line) in lines.iter().enumerate() {
        let y = y0 + 1 + i as i32;
        let pad = inner - line.chars().count();
        term.set(x0, y, '│', border, false);
        term.set_str(x0 + 1, y, &format!(" {}{} ", line, " ".repeat(pad)), Some(Color::Grey), false);
        term.set(x0 + box_width as i32 - 1, y, '│', border, false);
    }
    term.set_str(x0, y0 + box_height as i32 - 1, &format!("└{}┘", rule), border, false);
}
