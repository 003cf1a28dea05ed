use super::Verdict;
use crate::content::{APP_TITLE, LANDING_CHECKLIST};
use crate::model::{Action, Stage};
use crate::screen::{Button, CheckState, Command, Controls, Metric, Notice, Screen, Section};

pub(super) fn render() -> Screen {
    let checklist = LANDING_CHECKLIST
        .iter()
        .map(|(done, item)| {
            let state = if *done {
                CheckState::Done
            } else {
                CheckState::Pending
            };
            (state, item.to_string())
        })
        .collect();

    Screen::new(Stage::Landing, APP_TITLE)
        .with(Section::Notice(Notice::info(
            "Purpose: Verify system connectivity and user authentication protocols",
        )))
        .with(Section::Metrics(vec![
            Metric::new("System Status", "Online", "✓"),
            Metric::new("Protocol Version", "2.4.1", "Latest"),
        ]))
        .with(Section::Heading("Pre-Flight Checklist".into()))
        .with(Section::Checklist(checklist))
        .with(Section::Notice(Notice::warning(
            "User verification required to proceed with system diagnostics",
        )))
        .with_controls(Controls::button(Button::new(
            'b',
            "Begin Verification Process",
            Command::Begin,
        )))
}

pub(super) fn handle(action: &Action) -> Verdict {
    match action {
        Action::Begin => Verdict::Advance(None),
        _ => Verdict::Ignore,
    }
}
