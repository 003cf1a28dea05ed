//! Stage handlers.
//!
//! Each stage module exposes a `render` function (state in, [`Screen`] out)
//! and, where the stage has a gate, a `handle` function that judges a
//! validated action. Only the controller applies the resulting [`Verdict`].

mod challenge;
mod connectivity;
mod finale;
mod landing;
mod reveal;
mod riddle;

use crate::model::{Action, PacingConfig, SessionState, Stage};
use crate::screen::{Notice, Screen};
use std::time::Duration;

/// Where the current stage's pacing animation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Pending,
    /// Zero-based index of the item being shown.
    Step(usize),
    Closing,
    Done,
}

/// Everything a stage needs to draw itself.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub state: &'a SessionState,
    pub playback: Playback,
}

/// Result of judging an action against the current stage's gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Advance(Option<Notice>),
    Reject(Notice),
    Acknowledge(Notice),
    Ignore,
}

/// A fixed pacing animation: `steps` items, `step_delay` apart, optionally
/// followed by a closing frame held for `settle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub stage: Stage,
    pub steps: usize,
    pub step_delay: Duration,
    pub closing: Option<Duration>,
}

pub fn render(view: &View<'_>) -> Screen {
    match view.state.stage {
        Stage::Landing => landing::render(),
        Stage::Challenge => challenge::render(view.state),
        Stage::Connectivity => connectivity::render(view),
        Stage::Reveal => reveal::render(view.playback),
        Stage::Riddle => riddle::render(),
        Stage::Finale => finale::render(),
    }
}

pub fn handle(state: &SessionState, action: &Action) -> Verdict {
    match state.stage {
        Stage::Landing => landing::handle(action),
        Stage::Challenge => challenge::handle(state, action),
        Stage::Connectivity => connectivity::handle(state, action),
        Stage::Reveal => reveal::handle(action),
        Stage::Riddle => riddle::handle(action),
        Stage::Finale => finale::handle(action),
    }
}

/// Whether the current stage plays an animation on entry.
pub fn animates(state: &SessionState) -> bool {
    match state.stage {
        Stage::Connectivity => !state.server_checked,
        Stage::Reveal => true,
        _ => false,
    }
}

/// The animation the current stage plays on fresh entry, if any.
pub fn script(state: &SessionState, pacing: &PacingConfig) -> Option<Script> {
    if !animates(state) {
        return None;
    }
    match state.stage {
        Stage::Connectivity => Some(connectivity::script(pacing)),
        Stage::Reveal => Some(reveal::script(pacing)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Captcha, Guess, RiddleAnswer};
    use crate::screen::Section;

    fn state_at(stage: Stage) -> SessionState {
        SessionState {
            stage,
            captcha: Some(Captcha {
                answer: 9,
                question: "4 + 5".into(),
            }),
            server_checked: stage > Stage::Connectivity,
        }
    }

    #[test]
    fn every_stage_renders_identically_twice() {
        for stage in Stage::ALL {
            let state = state_at(stage);
            for playback in [Playback::Pending, Playback::Step(2), Playback::Closing, Playback::Done] {
                let view = View {
                    state: &state,
                    playback,
                };
                let a = render(&view);
                let b = render(&view);
                assert_eq!(a, b);
                assert_eq!(a.stage, stage);
            }
        }
    }

    #[test]
    fn challenge_shows_question_and_judges_exact_sum() {
        let state = state_at(Stage::Challenge);
        let screen = render(&View {
            state: &state,
            playback: Playback::Pending,
        });
        assert!(screen
            .sections
            .contains(&Section::text(["Question: What is 4 + 5?"])));

        assert!(matches!(
            handle(&state, &Action::Verify(Guess::clamped(9))),
            Verdict::Advance(Some(_))
        ));
        for wrong in [0, 8, 10, 100] {
            assert!(matches!(
                handle(&state, &Action::Verify(Guess::clamped(wrong))),
                Verdict::Reject(_)
            ));
        }
        assert_eq!(handle(&state, &Action::Begin), Verdict::Ignore);
    }

    #[test]
    fn connectivity_requires_completed_scan() {
        let mut state = state_at(Stage::Connectivity);
        assert!(animates(&state));
        assert_eq!(handle(&state, &Action::Retrieve), Verdict::Ignore);
        let pending = render(&View {
            state: &state,
            playback: Playback::Pending,
        });
        assert!(pending.controls.buttons.is_empty());

        state.server_checked = true;
        assert!(!animates(&state));
        assert!(script(&state, &PacingConfig::default()).is_none());
        assert_eq!(handle(&state, &Action::Retrieve), Verdict::Advance(None));
    }

    #[test]
    fn reveal_offers_read_only_when_done() {
        let state = state_at(Stage::Reveal);
        let mid = render(&View {
            state: &state,
            playback: Playback::Step(1),
        });
        assert!(mid.controls.buttons.is_empty());
        assert!(mid.sections.contains(&Section::Code("WW91IGJl".into())));

        let done = render(&View {
            state: &state,
            playback: Playback::Done,
        });
        assert_eq!(done.controls.buttons.len(), 1);
        assert_eq!(done.progress(), Some((5, 5)));
        assert_eq!(
            script(&state, &PacingConfig::default()).map(|s| (s.steps, s.closing)),
            Some((5, None))
        );
    }

    #[test]
    fn riddle_accepts_keyword_anywhere() {
        let state = state_at(Stage::Riddle);
        for (raw, ok) in [
            ("I love Valentine", true),
            (" valentine ", true),
            ("VALENTINE", true),
            ("valentines day", true),
            ("birthday", false),
            ("val entine", false),
        ] {
            let verdict = handle(&state, &Action::Answer(RiddleAnswer::normalize(raw)));
            assert_eq!(matches!(verdict, Verdict::Advance(_)), ok, "{raw:?}");
        }
    }

    #[test]
    fn finale_only_acknowledges() {
        let state = state_at(Stage::Finale);
        assert!(matches!(handle(&state, &Action::Accept), Verdict::Acknowledge(_)));
        assert!(matches!(handle(&state, &Action::Ponder), Verdict::Acknowledge(_)));
        assert_eq!(handle(&state, &Action::Begin), Verdict::Ignore);
    }
}
