use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_line(key: &str, pad: usize, what: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key.to_string(), Style::default().fg(Color::Magenta)),
        Span::raw(" ".repeat(pad)),
        Span::raw(what.to_string()),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        key_line("Esc / Ctrl-C", 3, "Quit"),
        key_line("q", 14, "Quit (when not typing text)"),
        key_line("Enter", 10, "Press the highlighted button"),
        key_line("?", 14, "Show this help (F1 while typing)"),
        Line::from(""),
        Line::from("Answer fields:"),
        key_line("0-9", 12, "Type a number"),
        key_line("↑/↓", 12, "Step the number by one"),
        key_line("Backspace", 6, "Delete the last character"),
        Line::from(""),
        Line::from("Final screen:"),
        key_line("y / t", 10, "Pick an answer"),
        Line::from(""),
        Line::from("Press any key to close this help."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
