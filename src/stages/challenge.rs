use super::Verdict;
use crate::model::{Action, Guess, SessionState, Stage};
use crate::screen::{Button, Command, Controls, Field, Notice, Screen, Section};

pub(super) fn render(state: &SessionState) -> Screen {
    let question = state
        .captcha
        .as_ref()
        .map(|c| c.question.as_str())
        .unwrap_or("?");

    Screen::new(Stage::Challenge, "Security Verification")
        .with(Section::text([
            "Security Protocol: CAPTCHA v3.2",
            "Please complete the verification below to continue",
        ]))
        .with(Section::Heading("Verify you're human".into()))
        .with(Section::text([format!("Question: What is {question}?")]))
        .with_controls(Controls {
            field: Some(Field::Number {
                label: "Your answer".into(),
                min: Guess::MIN as u8,
                max: Guess::MAX as u8,
            }),
            buttons: vec![Button::new('v', "Verify", Command::Verify)],
        })
}

pub(super) fn handle(state: &SessionState, action: &Action) -> Verdict {
    let Action::Verify(guess) = action else {
        return Verdict::Ignore;
    };
    match state.captcha.as_ref() {
        Some(c) if c.answer == guess.value() => {
            Verdict::Advance(Some(Notice::success("Verification successful!")))
        }
        _ => Verdict::Reject(Notice::error("Incorrect answer. Please try again.")),
    }
}
