//! Stage controller: the single owner of a visitor's [`SessionState`].

use crate::model::{Action, Captcha, PacingConfig, SessionState, Stage};
use crate::screen::{Notice, Screen};
use crate::stages::{self, Playback, Script, Verdict, View};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// What happened to a submitted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Advanced {
        from: Stage,
        to: Stage,
        notice: Option<Notice>,
    },
    Rejected(Notice),
    Acknowledged(Notice),
    Ignored,
}

pub struct StageController {
    state: SessionState,
    playback: Playback,
    rng: StdRng,
}

impl StageController {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            state: SessionState::default(),
            playback: Playback::Pending,
            rng,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Recompute the current view. Never mutates anything.
    pub fn render(&self) -> Screen {
        stages::render(&View {
            state: &self.state,
            playback: self.playback,
        })
    }

    /// The animation that must play before the stage accepts input.
    pub fn pending_script(&self, pacing: &PacingConfig) -> Option<Script> {
        if self.playback == Playback::Done {
            return None;
        }
        stages::script(&self.state, pacing)
    }

    pub fn set_playback(&mut self, playback: Playback) {
        self.playback = playback;
    }

    /// Mark the current animation as played through.
    pub fn finish_playback(&mut self) {
        if self.state.stage == Stage::Connectivity && !self.state.server_checked {
            self.state.server_checked = true;
            tracing::info!("connectivity scan completed");
        }
        self.playback = Playback::Done;
    }

    pub fn handle(&mut self, action: Action) -> Outcome {
        let stage = self.state.stage;
        // Stages with an animation accept nothing until it has run through.
        if stages::animates(&self.state) && self.playback != Playback::Done {
            tracing::debug!(stage = stage.name(), ?action, "action during animation ignored");
            return Outcome::Ignored;
        }

        match stages::handle(&self.state, &action) {
            Verdict::Advance(notice) => match self.advance() {
                Some(to) => Outcome::Advanced {
                    from: stage,
                    to,
                    notice,
                },
                None => Outcome::Ignored,
            },
            Verdict::Reject(notice) => {
                tracing::info!(stage = stage.name(), "gate rejected input");
                Outcome::Rejected(notice)
            }
            Verdict::Acknowledge(notice) => Outcome::Acknowledged(notice),
            Verdict::Ignore => {
                tracing::debug!(stage = stage.name(), ?action, "action not applicable");
                Outcome::Ignored
            }
        }
    }

    fn advance(&mut self) -> Option<Stage> {
        let from = self.state.stage;
        let to = from.next()?;
        self.state.stage = to;
        self.playback = Playback::Pending;
        if to == Stage::Challenge && self.state.captcha.is_none() {
            self.state.captcha = Some(Captcha::generate(&mut self.rng));
        }
        tracing::info!(from = from.name(), to = to.name(), "stage advanced");
        Some(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Guess, RiddleAnswer};
    use crate::screen::Section;
    use proptest::prelude::*;

    fn play_through(ctl: &mut StageController) {
        if let Some(script) = ctl.pending_script(&PacingConfig::instant()) {
            for i in 0..script.steps {
                ctl.set_playback(Playback::Step(i));
            }
            if script.closing.is_some() {
                ctl.set_playback(Playback::Closing);
            }
            ctl.finish_playback();
        }
    }

    fn expected_sum(ctl: &StageController) -> u8 {
        ctl.state().captcha.as_ref().map(|c| c.answer).unwrap_or(0)
    }

    fn wrong_guess(ctl: &StageController) -> Guess {
        Guess::clamped(if expected_sum(ctl) == 2 { 3 } else { 2 })
    }

    #[test]
    fn starts_at_landing() {
        let ctl = StageController::new(Some(1));
        assert_eq!(ctl.state(), &SessionState::default());
        assert_eq!(ctl.state().stage, Stage::Landing);
        assert!(ctl.state().captcha.is_none());
    }

    #[test]
    fn full_walkthrough() {
        let mut ctl = StageController::new(Some(7));
        assert!(matches!(ctl.handle(Action::Begin), Outcome::Advanced { to: Stage::Challenge, .. }));

        let sum = expected_sum(&ctl);
        assert!((2..=20).contains(&sum));
        assert!(matches!(
            ctl.handle(Action::Verify(Guess::clamped(sum as i64))),
            Outcome::Advanced { to: Stage::Connectivity, notice: Some(_), .. }
        ));

        assert!(!ctl.state().server_checked);
        assert_eq!(ctl.handle(Action::Retrieve), Outcome::Ignored);
        play_through(&mut ctl);
        assert!(ctl.state().server_checked);
        assert!(matches!(ctl.handle(Action::Retrieve), Outcome::Advanced { to: Stage::Reveal, .. }));

        assert_eq!(ctl.handle(Action::Read), Outcome::Ignored);
        play_through(&mut ctl);
        assert!(matches!(ctl.handle(Action::Read), Outcome::Advanced { to: Stage::Riddle, .. }));

        assert!(matches!(
            ctl.handle(Action::Answer(RiddleAnswer::normalize("birthday"))),
            Outcome::Rejected(_)
        ));
        assert_eq!(ctl.state().stage, Stage::Riddle);
        assert!(matches!(
            ctl.handle(Action::Answer(RiddleAnswer::normalize("I love Valentine"))),
            Outcome::Advanced { to: Stage::Finale, .. }
        ));
    }

    #[test]
    fn wrong_sum_stays_on_challenge() {
        let mut ctl = StageController::new(Some(3));
        ctl.handle(Action::Begin);
        let before = ctl.state().clone();
        for _ in 0..5 {
            assert!(matches!(
                ctl.handle(Action::Verify(wrong_guess(&ctl))),
                Outcome::Rejected(_)
            ));
        }
        assert_eq!(ctl.state(), &before);
    }

    #[test]
    fn captcha_is_stable_across_renders() {
        let mut ctl = StageController::new(None);
        ctl.handle(Action::Begin);
        let captcha = ctl.state().captcha.clone();
        let first = ctl.render();
        for _ in 0..10 {
            assert_eq!(ctl.render(), first);
        }
        ctl.handle(Action::Verify(wrong_guess(&ctl)));
        assert_eq!(ctl.state().captcha, captcha);
        assert_eq!(ctl.render(), first);
    }

    #[test]
    fn riddle_normalization_cases() {
        for (input, accepted) in [
            ("I love Valentine", true),
            (" valentine ", true),
            ("VALENTINE", true),
            ("birthday", false),
            ("", false),
        ] {
            let mut ctl = StageController::new(Some(11));
            ctl.handle(Action::Begin);
            let sum = expected_sum(&ctl);
            ctl.handle(Action::Verify(Guess::clamped(sum as i64)));
            play_through(&mut ctl);
            ctl.handle(Action::Retrieve);
            play_through(&mut ctl);
            ctl.handle(Action::Read);
            assert_eq!(ctl.state().stage, Stage::Riddle);

            let outcome = ctl.handle(Action::Answer(RiddleAnswer::normalize(input)));
            assert_eq!(matches!(outcome, Outcome::Advanced { .. }), accepted, "{input:?}");
        }
    }

    #[test]
    fn finale_choices_change_nothing() {
        let mut ctl = StageController::new(Some(5));
        ctl.handle(Action::Begin);
        let sum = expected_sum(&ctl);
        ctl.handle(Action::Verify(Guess::clamped(sum as i64)));
        play_through(&mut ctl);
        ctl.handle(Action::Retrieve);
        play_through(&mut ctl);
        ctl.handle(Action::Read);
        ctl.handle(Action::Answer(RiddleAnswer::normalize("valentine")));
        assert_eq!(ctl.state().stage, Stage::Finale);

        let before = ctl.state().clone();
        let screen = ctl.render();
        assert!(matches!(ctl.handle(Action::Accept), Outcome::Acknowledged(_)));
        assert!(matches!(ctl.handle(Action::Ponder), Outcome::Acknowledged(_)));
        assert_eq!(ctl.state(), &before);
        assert_eq!(ctl.render(), screen);
    }

    #[test]
    fn scan_frames_cover_all_hosts() {
        let mut ctl = StageController::new(Some(2));
        ctl.handle(Action::Begin);
        let sum = expected_sum(&ctl);
        ctl.handle(Action::Verify(Guess::clamped(sum as i64)));

        let script = ctl
            .pending_script(&PacingConfig::default())
            .expect("scan pending");
        assert_eq!(script.steps, 5);
        let mut seen = Vec::new();
        for i in 0..script.steps {
            ctl.set_playback(Playback::Step(i));
            seen.push(ctl.render().progress());
            assert!(!ctl.state().server_checked);
        }
        assert_eq!(
            seen,
            (1..=5).map(|d| Some((d, 5))).collect::<Vec<_>>()
        );
        ctl.finish_playback();
        assert!(ctl.state().server_checked);
        assert!(ctl.pending_script(&PacingConfig::default()).is_none());
        assert!(ctl
            .render()
            .sections
            .iter()
            .any(|s| matches!(s, Section::Metrics(m) if m.len() == 3)));
    }

    fn any_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Begin),
            (0i64..=100).prop_map(|v| Action::Verify(Guess::clamped(v))),
            Just(Action::Retrieve),
            Just(Action::Read),
            prop::sample::select(vec!["valentine", "birthday", " Valentine's day ", "x"])
                .prop_map(|s| Action::Answer(RiddleAnswer::normalize(s))),
            Just(Action::Accept),
            Just(Action::Ponder),
        ]
    }

    proptest! {
        #[test]
        fn stage_only_moves_forward_by_one(
            seed in any::<u64>(),
            actions in prop::collection::vec((any_action(), any::<bool>()), 0..80),
        ) {
            let mut ctl = StageController::new(Some(seed));
            for (action, animate) in actions {
                if animate {
                    play_through(&mut ctl);
                }
                let before = ctl.state().clone();
                match ctl.handle(action) {
                    Outcome::Advanced { from, to, .. } => {
                        prop_assert_eq!(from, before.stage);
                        prop_assert_eq!(to.index(), from.index() + 1);
                        prop_assert_eq!(ctl.state().stage, to);
                    }
                    _ => prop_assert_eq!(ctl.state(), &before),
                }
                if ctl.state().stage >= Stage::Challenge {
                    prop_assert!(ctl.state().captcha.is_some());
                }
                if before.server_checked {
                    prop_assert!(ctl.state().server_checked);
                }
            }
        }
    }
}
