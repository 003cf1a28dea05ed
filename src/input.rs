//! Input boundary.
//!
//! Raw keystrokes and lines are turned into validated [`Action`]s here; the
//! stage handlers never see unparsed text.

use crate::model::{Action, Guess, RiddleAnswer};
use crate::screen::{Command, Controls, Field};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a number")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("Nothing to do here yet")]
    NoControl,
    #[error("Unknown choice '{0}'")]
    UnknownChoice(String),
}

/// Parse a numeric answer, clamping to the field's [0,100] bounds.
pub fn parse_guess(raw: &str) -> Result<Guess, InputError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(InputError::Empty);
    }
    match raw.parse::<i64>() {
        Ok(v) => Ok(Guess::clamped(v)),
        Err(_) => {
            // An integer too long for i64 still clamps toward its sign.
            let (negative, digits) = match raw.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, raw.strip_prefix('+').unwrap_or(raw)),
            };
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(InputError::NotANumber(raw.to_string()));
            }
            Ok(Guess::clamped(if negative { Guess::MIN } else { Guess::MAX }))
        }
    }
}

/// Build the action for `command`, pulling its payload from `field_text`.
pub fn build_action(command: Command, field_text: &str) -> Result<Action, InputError> {
    Ok(match command {
        Command::Begin => Action::Begin,
        Command::Verify => Action::Verify(parse_guess(field_text)?),
        Command::Retrieve => Action::Retrieve,
        Command::Read => Action::Read,
        Command::Answer => Action::Answer(RiddleAnswer::normalize(field_text)),
        Command::Accept => Action::Accept,
        Command::Ponder => Action::Ponder,
    })
}

/// Map one line of text-mode input to an action for the screen's controls.
///
/// With a field present the whole line is the field value. Otherwise an
/// empty line presses the primary button and a single character selects a
/// button by its shortcut key.
pub fn action_for_line(controls: &Controls, line: &str) -> Result<Action, InputError> {
    let primary = controls.primary().ok_or(InputError::NoControl)?;
    if controls.field.is_some() {
        return build_action(primary.command, line);
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return build_action(primary.command, "");
    }
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => controls
            .by_key(c)
            .ok_or_else(|| InputError::UnknownChoice(trimmed.to_string()))
            .and_then(|b| build_action(b.command, "")),
        _ => Err(InputError::UnknownChoice(trimmed.to_string())),
    }
}

/// Step a numeric field buffer up or down by one, clamped to the field bounds.
pub fn step_number(field: &Field, buffer: &str, delta: i64) -> String {
    let (min, max) = match field {
        Field::Number { min, max, .. } => (*min as i64, *max as i64),
        Field::Text { .. } => return buffer.to_string(),
    };
    let current = buffer.trim().parse::<i64>().unwrap_or(min);
    (current + delta).clamp(min, max).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Button;

    #[test]
    fn guess_parses_and_clamps() {
        assert_eq!(parse_guess("12").map(Guess::value), Ok(12));
        assert_eq!(parse_guess(" 7 ").map(Guess::value), Ok(7));
        assert_eq!(parse_guess("250").map(Guess::value), Ok(100));
        assert_eq!(parse_guess("-4").map(Guess::value), Ok(0));
        assert_eq!(
            parse_guess("99999999999999999999999").map(Guess::value),
            Ok(100)
        );
        assert_eq!(
            parse_guess("-99999999999999999999").map(Guess::value),
            Ok(0)
        );
        assert_eq!(
            parse_guess("+99999999999999999999").map(Guess::value),
            Ok(100)
        );
    }

    #[test]
    fn guess_rejects_garbage() {
        assert_eq!(parse_guess(""), Err(InputError::Empty));
        assert_eq!(parse_guess("   "), Err(InputError::Empty));
        assert_eq!(
            parse_guess("twelve"),
            Err(InputError::NotANumber("twelve".into()))
        );
        assert_eq!(parse_guess("1.5"), Err(InputError::NotANumber("1.5".into())));
    }

    #[test]
    fn riddle_answer_is_normalized() {
        let action = build_action(Command::Answer, "  VALENTINE ").unwrap();
        assert_eq!(
            action,
            Action::Answer(RiddleAnswer::normalize("valentine"))
        );
    }

    #[test]
    fn line_with_field_feeds_primary() {
        let controls = Controls {
            field: Some(Field::Number {
                label: "Your answer".into(),
                min: 0,
                max: 100,
            }),
            buttons: vec![Button::new('v', "Verify", Command::Verify)],
        };
        assert_eq!(
            action_for_line(&controls, "9"),
            Ok(Action::Verify(Guess::clamped(9)))
        );
        assert_eq!(action_for_line(&controls, ""), Err(InputError::Empty));
    }

    #[test]
    fn line_without_field_picks_button() {
        let controls = Controls {
            field: None,
            buttons: vec![
                Button::new('y', "Yes", Command::Accept),
                Button::new('t', "Think", Command::Ponder),
            ],
        };
        assert_eq!(action_for_line(&controls, ""), Ok(Action::Accept));
        assert_eq!(action_for_line(&controls, "t"), Ok(Action::Ponder));
        assert_eq!(
            action_for_line(&controls, "maybe"),
            Err(InputError::UnknownChoice("maybe".into()))
        );
        assert_eq!(
            action_for_line(&Controls::none(), ""),
            Err(InputError::NoControl)
        );
    }

    #[test]
    fn number_stepping_is_clamped() {
        let field = Field::Number {
            label: String::new(),
            min: 0,
            max: 100,
        };
        assert_eq!(step_number(&field, "", 1), "1");
        assert_eq!(step_number(&field, "100", 1), "100");
        assert_eq!(step_number(&field, "0", -1), "0");
        assert_eq!(step_number(&field, "41", 1), "42");
    }
}
