//! Session lifecycle controller.
//!
//! Owns the stage controller, plays pacing animations as async suspend
//! points, and emits events for presentation layers.

use super::session::{Outcome, StageController};
use crate::model::{Action, SessionConfig, SessionEvent};
use crate::stages::{Playback, Script};
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::Duration;

/// Commands emitted by UI layers to drive the session.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    Act(Action),
    Quit,
}

/// Whether a wait ran out or the UI asked to stop.
enum Waited {
    Elapsed,
    Quit,
}

/// Sleep for `delay` while discarding anything the UI sends, except quit.
async fn hold(delay: Duration, cmd_rx: &mut UnboundedReceiver<UiCommand>) -> Waited {
    if delay.is_zero() {
        return Waited::Elapsed;
    }
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);
    loop {
        tokio::select! {
            _ = &mut sleep => return Waited::Elapsed,
            cmd = cmd_rx.recv() => match cmd {
                Some(UiCommand::Quit) | None => return Waited::Quit,
                Some(other) => {
                    tracing::debug!(?other, "command discarded while pacing");
                }
            },
        }
    }
}

fn emit_screen(ctl: &StageController, event_tx: &UnboundedSender<SessionEvent>) {
    let screen = ctl.render();
    tracing::trace!(stage = screen.stage.name(), progress = ?screen.progress(), "screen");
    let _ = event_tx.send(SessionEvent::Screen(Box::new(screen)));
}

/// Play one scripted animation to completion.
async fn play(
    script: Script,
    ctl: &mut StageController,
    event_tx: &UnboundedSender<SessionEvent>,
    cmd_rx: &mut UnboundedReceiver<UiCommand>,
) -> Waited {
    tracing::info!(stage = script.stage.name(), steps = script.steps, "animation started");
    for i in 0..script.steps {
        ctl.set_playback(Playback::Step(i));
        emit_screen(ctl, event_tx);
        if let Waited::Quit = hold(script.step_delay, cmd_rx).await {
            return Waited::Quit;
        }
    }
    if let Some(settle) = script.closing {
        ctl.set_playback(Playback::Closing);
        emit_screen(ctl, event_tx);
        if let Waited::Quit = hold(settle, cmd_rx).await {
            return Waited::Quit;
        }
    }
    ctl.finish_playback();
    emit_screen(ctl, event_tx);
    Waited::Elapsed
}

/// Drive one session from the landing screen until the UI quits.
pub(crate) async fn run_controller(
    cfg: &SessionConfig,
    event_tx: UnboundedSender<SessionEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let mut ctl = StageController::new(cfg.seed);
    emit_screen(&ctl, &event_tx);

    loop {
        if let Some(script) = ctl.pending_script(&cfg.pacing) {
            if let Waited::Quit = play(script, &mut ctl, &event_tx, &mut cmd_rx).await {
                break;
            }
            continue;
        }

        let action = match cmd_rx.recv().await {
            Some(UiCommand::Act(action)) => action,
            Some(UiCommand::Quit) | None => break,
        };

        // Every action is answered with a screen once the stage is ready again.
        match ctl.handle(action) {
            Outcome::Advanced { from, to, notice } => {
                if let Some(notice) = notice {
                    let _ = event_tx.send(SessionEvent::Feedback(notice));
                }
                if let Waited::Quit = hold(cfg.pacing.settle_after(from), &mut cmd_rx).await {
                    break;
                }
                tracing::debug!(stage = to.name(), step = to.index() + 1, "entering stage");
                emit_screen(&ctl, &event_tx);
            }
            Outcome::Rejected(notice) | Outcome::Acknowledged(notice) => {
                let _ = event_tx.send(SessionEvent::Feedback(notice));
                emit_screen(&ctl, &event_tx);
            }
            Outcome::Ignored => emit_screen(&ctl, &event_tx),
        }
    }

    tracing::info!(stage = ctl.state().stage.name(), "session ended");
    let _ = event_tx.send(SessionEvent::Finished);
    Ok(())
}
