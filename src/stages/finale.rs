use super::Verdict;
use crate::content::{ACCEPT_REPLY, FINALE, PONDER_REPLY};
use crate::model::{Action, Stage};
use crate::screen::{Button, Command, Controls, Notice, Screen, Section};

pub(super) fn render() -> Screen {
    Screen::new(Stage::Finale, "Surprise!")
        .with(Section::Celebration(
            FINALE.iter().map(|l| l.to_string()).collect(),
        ))
        .with_controls(Controls {
            field: None,
            buttons: vec![
                Button::new('y', "Yes! Absolutely!", Command::Accept),
                Button::new('t', "Let me think about it", Command::Ponder),
            ],
        })
}

/// Terminal stage: both choices only produce a reply.
pub(super) fn handle(action: &Action) -> Verdict {
    match action {
        Action::Accept => Verdict::Acknowledge(Notice::success(ACCEPT_REPLY)),
        Action::Ponder => Verdict::Acknowledge(Notice::info(PONDER_REPLY)),
        _ => Verdict::Ignore,
    }
}
