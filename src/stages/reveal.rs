use super::{Playback, Script, Verdict};
use crate::content::ENCRYPTED_CHUNKS;
use crate::model::{Action, PacingConfig, Stage};
use crate::screen::{Button, Command, Controls, Notice, Screen, Section};

pub(super) fn script(pacing: &PacingConfig) -> Script {
    Script {
        stage: Stage::Reveal,
        steps: ENCRYPTED_CHUNKS.len(),
        step_delay: pacing.reveal_step,
        closing: None,
    }
}

pub(super) fn render(playback: Playback) -> Screen {
    let total = ENCRYPTED_CHUNKS.len();
    let screen = Screen::new(Stage::Reveal, "Message Decryption").with(Section::Notice(
        Notice::warning("Encrypted message detected. Decrypting..."),
    ));

    match playback {
        Playback::Pending => screen.with(Section::Progress {
            done: 0,
            total,
            caption: String::new(),
        }),
        Playback::Step(i) => {
            let i = i.min(total - 1);
            screen
                .with(Section::Progress {
                    done: i + 1,
                    total,
                    caption: "Decrypting...".into(),
                })
                .with(Section::Code(ENCRYPTED_CHUNKS[i].into()))
        }
        Playback::Closing | Playback::Done => screen
            .with(Section::Progress {
                done: total,
                total,
                caption: "Decrypting...".into(),
            })
            .with(Section::Code(ENCRYPTED_CHUNKS[total - 1].into()))
            .with(Section::Notice(Notice::success("Decryption complete!")))
            .with_controls(Controls::button(Button::new(
                'r',
                "Read Message",
                Command::Read,
            ))),
    }
}

pub(super) fn handle(action: &Action) -> Verdict {
    match action {
        Action::Read => Verdict::Advance(None),
        _ => Verdict::Ignore,
    }
}
