use crate::input;
use crate::model::{Action, SessionEvent};
use crate::screen::{Field, Notice, Screen};
use crossterm::event::{KeyCode, KeyModifiers};

/// Longest buffer accepted by the numeric field ("100").
const NUMBER_MAX_LEN: usize = 3;
const TEXT_MAX_LEN: usize = 120;

#[derive(Default)]
pub struct UiState {
    pub screen: Option<Screen>,
    /// Last inline message from the controller (gate result, reply).
    pub feedback: Option<Notice>,
    /// Contents of the current stage's input field.
    pub input: String,
    pub show_help: bool,
    /// Local status line, e.g. input validation errors.
    pub info: String,
}

/// What the UI loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    None,
    Send(Action),
    Quit,
}

impl UiState {
    /// Apply a controller event. Returns `false` once the session is over.
    pub fn apply(&mut self, ev: SessionEvent) -> bool {
        match ev {
            SessionEvent::Screen(screen) => {
                let stage_changed = self.screen.as_ref().map(|s| s.stage) != Some(screen.stage);
                if stage_changed {
                    self.input.clear();
                    self.info.clear();
                    self.feedback = None;
                }
                self.screen = Some(*screen);
            }
            SessionEvent::Feedback(notice) => {
                self.info.clear();
                self.feedback = Some(notice);
            }
            SessionEvent::Finished => return false,
        }
        true
    }

    fn field(&self) -> Option<&Field> {
        self.screen.as_ref().and_then(|s| s.controls.field.as_ref())
    }

    fn typing_text(&self) -> bool {
        matches!(self.field(), Some(Field::Text { .. }))
    }

    pub fn on_key(&mut self, modifiers: KeyModifiers, code: KeyCode) -> KeyOutcome {
        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => {
                return KeyOutcome::Quit
            }
            (_, KeyCode::Char('q')) if !self.typing_text() => return KeyOutcome::Quit,
            (_, KeyCode::F(1)) => {
                self.show_help = !self.show_help;
                return KeyOutcome::None;
            }
            (_, KeyCode::Char('?')) if !self.typing_text() => {
                self.show_help = !self.show_help;
                return KeyOutcome::None;
            }
            _ => {}
        }
        if self.show_help {
            self.show_help = false;
            return KeyOutcome::None;
        }

        let Some(screen) = self.screen.as_ref() else {
            return KeyOutcome::None;
        };
        let controls = &screen.controls;

        match code {
            KeyCode::Enter => {
                let Some(primary) = controls.primary() else {
                    return KeyOutcome::None;
                };
                match input::build_action(primary.command, &self.input) {
                    Ok(action) => {
                        self.info.clear();
                        KeyOutcome::Send(action)
                    }
                    Err(e) => {
                        self.info = e.to_string();
                        KeyOutcome::None
                    }
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                KeyOutcome::None
            }
            KeyCode::Up | KeyCode::Down => {
                if let Some(field @ Field::Number { .. }) = controls.field.as_ref() {
                    let delta = if code == KeyCode::Up { 1 } else { -1 };
                    self.input = input::step_number(field, &self.input, delta);
                }
                KeyOutcome::None
            }
            KeyCode::Char(c) => match controls.field.as_ref() {
                Some(Field::Number { .. }) => {
                    if c.is_ascii_digit() && self.input.len() < NUMBER_MAX_LEN {
                        self.input.push(c);
                    }
                    KeyOutcome::None
                }
                Some(Field::Text { .. }) => {
                    if self.input.chars().count() < TEXT_MAX_LEN {
                        self.input.push(c);
                    }
                    KeyOutcome::None
                }
                None => match controls.by_key(c) {
                    Some(button) => match input::build_action(button.command, "") {
                        Ok(action) => KeyOutcome::Send(action),
                        Err(e) => {
                            self.info = e.to_string();
                            KeyOutcome::None
                        }
                    },
                    None => KeyOutcome::None,
                },
            },
            _ => KeyOutcome::None,
        }
    }
}
