//! Widgets for drawing a stage [`Screen`].

use crate::screen::{CheckState, Field, Metric, Notice, Screen, Section, Tone};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Info => Color::Cyan,
        Tone::Success => Color::Green,
        Tone::Warning => Color::Yellow,
        Tone::Error => Color::Red,
    }
}

pub fn notice_line(notice: &Notice) -> Line<'static> {
    let icon = match notice.tone {
        Tone::Info => "ℹ ",
        Tone::Success => "✔ ",
        Tone::Warning => "⚠ ",
        Tone::Error => "✖ ",
    };
    let style = Style::default().fg(tone_color(notice.tone));
    Line::from(vec![
        Span::styled(icon, style),
        Span::styled(notice.text.clone(), style),
    ])
}

/// Consecutive text-like sections are merged into one paragraph.
enum Part<'a> {
    Lines(Vec<Line<'static>>),
    Metrics(&'a [Metric]),
    Progress {
        done: usize,
        total: usize,
        caption: &'a str,
    },
    Code(&'a str),
}

fn push_lines(parts: &mut Vec<Part<'_>>, lines: Vec<Line<'static>>) {
    if let Some(Part::Lines(existing)) = parts.last_mut() {
        existing.extend(lines);
    } else {
        parts.push(Part::Lines(lines));
    }
}

fn parts(screen: &Screen) -> Vec<Part<'_>> {
    let mut parts = Vec::new();
    for section in &screen.sections {
        match section {
            Section::Notice(n) => push_lines(&mut parts, vec![notice_line(n)]),
            Section::Heading(h) => push_lines(
                &mut parts,
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        h.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                ],
            ),
            Section::Text(text) => push_lines(
                &mut parts,
                text.iter().map(|l| Line::from(format!("  {l}"))).collect(),
            ),
            Section::Checklist(items) => push_lines(
                &mut parts,
                items
                    .iter()
                    .map(|(state, item)| {
                        let (mark, color) = match state {
                            CheckState::Done => ("  ✔ ", Color::Green),
                            CheckState::Pending => ("  ⏳ ", Color::Yellow),
                        };
                        Line::from(vec![
                            Span::styled(mark, Style::default().fg(color)),
                            Span::raw(item.clone()),
                        ])
                    })
                    .collect(),
            ),
            Section::Celebration(text) => {
                let mut lines = vec![Line::from("")];
                lines.extend(text.iter().enumerate().map(|(i, l)| {
                    let style = if i == 0 || l.ends_with('?') {
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::LightMagenta)
                    };
                    Line::from(Span::styled(l.clone(), style)).centered()
                }));
                lines.push(Line::from(Span::styled("❤", Style::default().fg(Color::Red))).centered());
                push_lines(&mut parts, lines);
            }
            Section::Metrics(m) => parts.push(Part::Metrics(m)),
            Section::Progress {
                done,
                total,
                caption,
            } => parts.push(Part::Progress {
                done: *done,
                total: *total,
                caption,
            }),
            Section::Code(code) => parts.push(Part::Code(code)),
        }
    }
    parts
}

fn part_height(part: &Part<'_>, width: u16) -> u16 {
    match part {
        Part::Lines(lines) => lines.len() as u16,
        Part::Metrics(_) => 4,
        Part::Progress { .. } => 3,
        Part::Code(code) => {
            let usable = width.saturating_sub(2).max(1) as usize;
            (code.chars().count().div_ceil(usable) as u16).max(1) + 2
        }
    }
}

fn draw_metrics(area: Rect, f: &mut Frame, metrics: &[Metric]) {
    if metrics.is_empty() {
        return;
    }
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            metrics
                .iter()
                .map(|_| Constraint::Ratio(1, metrics.len() as u32))
                .collect::<Vec<_>>(),
        )
        .split(area);
    for (m, tile) in metrics.iter().zip(tiles.iter()) {
        let p = Paragraph::new(vec![
            Line::from(Span::styled(
                m.value.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                m.delta.clone(),
                Style::default().fg(Color::Green),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(m.label.clone()),
        );
        f.render_widget(p, *tile);
    }
}

/// Draw the body of a stage: notices, text, tiles, gauges.
pub fn draw_sections(area: Rect, f: &mut Frame, screen: &Screen) {
    let parts = parts(screen);
    let mut constraints: Vec<Constraint> = parts
        .iter()
        .map(|p| Constraint::Length(part_height(p, area.width)))
        .collect();
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (part, row) in parts.iter().zip(rows.iter()) {
        match part {
            Part::Lines(lines) => {
                f.render_widget(
                    Paragraph::new(lines.clone()).wrap(Wrap { trim: false }),
                    *row,
                );
            }
            Part::Metrics(m) => draw_metrics(*row, f, m),
            Part::Progress {
                done,
                total,
                caption,
            } => {
                let ratio = if *total == 0 {
                    0.0
                } else {
                    (*done as f64 / *total as f64).clamp(0.0, 1.0)
                };
                let gauge = Gauge::default()
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(caption.to_string()),
                    )
                    .gauge_style(Style::default().fg(Color::Cyan))
                    .ratio(ratio)
                    .label(format!("{done}/{total}"));
                f.render_widget(gauge, *row);
            }
            Part::Code(code) => {
                let p = Paragraph::new(Line::from(Span::styled(
                    code.to_string(),
                    Style::default().fg(Color::Yellow),
                )))
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL));
                f.render_widget(p, *row);
            }
        }
    }
}

/// Draw the input field (if any) and the button row.
pub fn draw_controls(area: Rect, f: &mut Frame, screen: &Screen, input: &str) {
    let controls = &screen.controls;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    if let Some(field) = controls.field.as_ref() {
        let label = match field {
            Field::Number { label, min, max } => format!("{label} ({min}-{max})"),
            Field::Text { label } => label.clone(),
        };
        let p = Paragraph::new(Line::from(vec![
            Span::raw(input.to_string()),
            Span::styled("▏", Style::default().fg(Color::Gray)),
        ]))
        .block(Block::default().borders(Borders::ALL).title(label));
        f.render_widget(p, rows[0]);
    }

    let mut spans = Vec::new();
    for (i, b) in controls.buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let key = match (i, controls.field.is_some()) {
            (0, true) => "Enter".to_string(),
            (0, false) => format!("Enter/{}", b.key),
            _ => b.key.to_string(),
        };
        spans.push(Span::styled(
            format!("[{key}]"),
            Style::default().fg(Color::Magenta),
        ));
        spans.push(Span::raw(format!(" {}", b.label)));
    }
    let target = if controls.field.is_some() { rows[1] } else { area };
    f.render_widget(Paragraph::new(Line::from(spans)), target);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Stage;
    use crate::screen::Metric;

    #[test]
    fn text_sections_merge_into_one_part() {
        let screen = Screen::new(Stage::Landing, "t")
            .with(Section::Notice(Notice::info("a")))
            .with(Section::Heading("b".into()))
            .with(Section::Metrics(vec![Metric::new("x", "1", "+")]))
            .with(Section::text(["c", "d"]));
        let parts = parts(&screen);
        assert_eq!(parts.len(), 3);
        assert!(matches!(&parts[0], Part::Lines(l) if l.len() == 3));
        assert!(matches!(parts[1], Part::Metrics(_)));
        assert!(matches!(&parts[2], Part::Lines(l) if l.len() == 2));
    }

    #[test]
    fn code_height_accounts_for_wrapping() {
        assert_eq!(part_height(&Part::Code("Pw=="), 40), 3);
        let long = "0".repeat(100);
        assert_eq!(part_height(&Part::Code(&long), 52), 4);
    }
}
