//! Plain-text rendering for line mode.
//!
//! Formats a [`Screen`] as human-readable lines; the TUI draws the same data
//! with widgets instead.

use crate::screen::{CheckState, Controls, Field, Notice, Screen, Section, Tone};

const BAR_WIDTH: usize = 20;

fn tone_tag(tone: Tone) -> &'static str {
    match tone {
        Tone::Info => "[i]",
        Tone::Success => "[ok]",
        Tone::Warning => "[!]",
        Tone::Error => "[x]",
    }
}

pub(crate) fn notice_line(notice: &Notice) -> String {
    format!("{} {}", tone_tag(notice.tone), notice.text)
}

fn progress_bar(done: usize, total: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (done * BAR_WIDTH) / total
    };
    format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        done,
        total
    )
}

fn controls_hint(controls: &Controls) -> Option<String> {
    let primary = controls.primary()?;
    let hint = match &controls.field {
        Some(Field::Number { label, min, max }) => {
            format!("{label} ({min}-{max}), then Enter to {}", primary.label)
        }
        Some(Field::Text { label }) => format!("{label}, then Enter to {}", primary.label),
        None if controls.buttons.len() == 1 => format!("Enter: {}", primary.label),
        None => controls
            .buttons
            .iter()
            .map(|b| format!("[{}] {}", b.key, b.label))
            .collect::<Vec<_>>()
            .join("   "),
    };
    Some(hint)
}

/// Render a screen as plain lines.
pub(crate) fn render_lines(screen: &Screen) -> Vec<String> {
    let mut lines = vec![String::new(), format!("== {} ==", screen.title)];

    for section in &screen.sections {
        match section {
            Section::Notice(n) => lines.push(notice_line(n)),
            Section::Heading(h) => {
                lines.push(String::new());
                lines.push(format!("## {h}"));
            }
            Section::Text(text) => lines.extend(text.iter().map(|l| format!("  {l}"))),
            Section::Checklist(items) => {
                for (state, item) in items {
                    let mark = match state {
                        CheckState::Done => "[x]",
                        CheckState::Pending => "[ ]",
                    };
                    lines.push(format!("  - {mark} {item}"));
                }
            }
            Section::Metrics(metrics) => lines.push(
                metrics
                    .iter()
                    .map(|m| format!("{}: {} ({})", m.label, m.value, m.delta))
                    .collect::<Vec<_>>()
                    .join("   "),
            ),
            Section::Progress {
                done,
                total,
                caption,
            } => {
                let bar = progress_bar(*done, *total);
                if caption.is_empty() {
                    lines.push(bar);
                } else {
                    lines.push(format!("{bar} {caption}"));
                }
            }
            Section::Code(code) => lines.push(format!("    {code}")),
            Section::Celebration(text) => {
                lines.push(String::new());
                lines.extend(text.iter().map(|l| format!("  * {l}")));
                lines.push(String::new());
            }
        }
    }

    if let Some(hint) = controls_hint(&screen.controls) {
        lines.push(format!("> {hint}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Stage;
    use crate::screen::{Button, Command, Metric};

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(0, 5), format!("[{}] 0/5", ".".repeat(20)));
        assert_eq!(
            progress_bar(3, 5),
            format!("[{}{}] 3/5", "#".repeat(12), ".".repeat(8))
        );
        assert_eq!(progress_bar(5, 5), format!("[{}] 5/5", "#".repeat(20)));
    }

    #[test]
    fn renders_sections_and_hint() {
        let screen = Screen::new(Stage::Connectivity, "Check")
            .with(Section::Notice(Notice::success("All good")))
            .with(Section::Metrics(vec![Metric::new("Latency", "12ms", "-3ms")]))
            .with_controls(Controls::button(Button::new(
                'r',
                "Retrieve Message",
                Command::Retrieve,
            )));
        let lines = render_lines(&screen);
        assert!(lines.contains(&"== Check ==".to_string()));
        assert!(lines.contains(&"[ok] All good".to_string()));
        assert!(lines.contains(&"Latency: 12ms (-3ms)".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("> Enter: Retrieve Message"));
    }

    #[test]
    fn multiple_buttons_list_their_keys() {
        let controls = Controls {
            field: None,
            buttons: vec![
                Button::new('y', "Yes", Command::Accept),
                Button::new('t', "Later", Command::Ponder),
            ],
        };
        assert_eq!(
            controls_hint(&controls).as_deref(),
            Some("[y] Yes   [t] Later")
        );
        assert_eq!(controls_hint(&Controls::none()), None);
    }
}
