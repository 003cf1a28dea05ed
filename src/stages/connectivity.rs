use super::{Playback, Script, Verdict, View};
use crate::content::SCAN_HOSTS;
use crate::model::{Action, PacingConfig, SessionState, Stage};
use crate::screen::{Button, Command, Controls, Metric, Notice, Screen, Section};

const TITLE: &str = "Server Connectivity Check";

pub(super) fn script(pacing: &PacingConfig) -> Script {
    Script {
        stage: Stage::Connectivity,
        steps: SCAN_HOSTS.len(),
        step_delay: pacing.scan_step,
        closing: Some(pacing.scan_settle),
    }
}

pub(super) fn render(view: &View<'_>) -> Screen {
    if view.state.server_checked {
        return report();
    }

    let total = SCAN_HOSTS.len();
    let screen = Screen::new(Stage::Connectivity, TITLE).with(Section::Notice(Notice::info(
        "Initiating connection to remote servers...",
    )));
    match view.playback {
        Playback::Step(i) => {
            let i = i.min(total - 1);
            screen.with(Section::Progress {
                done: i + 1,
                total,
                caption: format!("Pinging {}...", SCAN_HOSTS[i]),
            })
        }
        Playback::Closing => screen
            .with(Section::Progress {
                done: total,
                total,
                caption: format!("Pinging {}...", SCAN_HOSTS[total - 1]),
            })
            .with(Section::Notice(Notice::success(
                "All servers responding normally!",
            ))),
        Playback::Pending | Playback::Done => screen.with(Section::Progress {
            done: 0,
            total,
            caption: String::new(),
        }),
    }
}

fn report() -> Screen {
    Screen::new(Stage::Connectivity, TITLE)
        .with(Section::Notice(Notice::success(
            "Connection established successfully!",
        )))
        .with(Section::Heading("Connection Report".into()))
        .with(Section::Metrics(vec![
            Metric::new("Latency", "12ms", "-3ms"),
            Metric::new("Packet Loss", "0%", "0%"),
            Metric::new("Bandwidth", "1.2Gbps", "+0.3Gbps"),
        ]))
        .with(Section::Notice(Notice::info(
            "Notice: Special message detected from server...",
        )))
        .with_controls(Controls::button(Button::new(
            'r',
            "Retrieve Message",
            Command::Retrieve,
        )))
}

pub(super) fn handle(state: &SessionState, action: &Action) -> Verdict {
    match action {
        Action::Retrieve if state.server_checked => Verdict::Advance(None),
        _ => Verdict::Ignore,
    }
}
