use super::Verdict;
use crate::content::{RIDDLE, RIDDLE_KEYWORD};
use crate::model::{Action, Stage};
use crate::screen::{Button, Command, Controls, Field, Notice, Screen, Section};

pub(super) fn render() -> Screen {
    Screen::new(Stage::Riddle, "Final Verification Step")
        .with(Section::text([
            "Security Protocol: Pattern Recognition",
            "One last verification before accessing the message...",
        ]))
        .with(Section::Heading("Solve this:".into()))
        .with(Section::text(
            std::iter::once("A riddle for you:").chain(RIDDLE),
        ))
        .with_controls(Controls {
            field: Some(Field::Text {
                label: "Your answer".into(),
            }),
            buttons: vec![Button::new('s', "Submit Answer", Command::Answer)],
        })
}

pub(super) fn handle(action: &Action) -> Verdict {
    let Action::Answer(answer) = action else {
        return Verdict::Ignore;
    };
    if answer.as_str().contains(RIDDLE_KEYWORD) {
        Verdict::Advance(Some(Notice::success(
            "Correct! Unlocking final message...",
        )))
    } else {
        Verdict::Reject(Notice::error("Not quite... Think about February 14th!"))
    }
}
