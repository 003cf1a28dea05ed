//! Line-oriented presentation layer.
//!
//! Prints each screen the controller emits and turns stdin lines into
//! actions. With `--json` every event is printed as one JSON object per line.

use crate::cli::{build_config, Cli};
use crate::input;
use crate::model::{SessionConfig, SessionEvent, Stage};
use crate::orchestrator::{run_controller, UiCommand};
use crate::screen::Screen;
use crate::text_render;
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

/// Format one controller event for output.
fn event_lines(ev: &SessionEvent, json: bool) -> Result<Vec<String>> {
    if json {
        return Ok(vec![serde_json::to_string(ev).context("serialize event")?]);
    }
    Ok(match ev {
        SessionEvent::Screen(screen) => text_render::render_lines(screen),
        SessionEvent::Feedback(notice) => vec![text_render::notice_line(notice)],
        SessionEvent::Finished => vec!["Session closed.".into()],
    })
}

pub(crate) async fn run_text(args: Cli) -> Result<()> {
    let cfg = build_config(&args);
    let (out_tx, out_handle) = spawn_output_writer();
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());

    let res = drive_lines(&cfg, args.json, stdin, &out_tx).await;

    drop(out_tx);
    let _ = out_handle.await;
    let stage = res?;
    tracing::debug!(?stage, "line mode finished");
    Ok(())
}

/// Run one session against line-oriented input, lock-step.
///
/// A line is only read once the controller shows a screen with controls, so
/// every line is matched against the screen it was typed for. Returns the
/// stage of the last screen shown.
async fn drive_lines<R>(
    cfg: &SessionConfig,
    json: bool,
    reader: R,
    out_tx: &mpsc::UnboundedSender<OutputLine>,
) -> Result<Option<Stage>>
where
    R: AsyncBufRead + Unpin,
{
    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<SessionEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    let cfg = cfg.clone();
    let handle = tokio::spawn(async move { run_controller(&cfg, evt_tx, cmd_rx).await });

    let mut lines = reader.lines();
    let mut input_open = true;
    let mut current: Option<Box<Screen>> = None;
    // Nothing is read before the first screen arrives.
    let mut ready = false;

    loop {
        tokio::select! {
            ev = evt_rx.recv() => {
                let Some(ev) = ev else { break };
                for line in event_lines(&ev, json)? {
                    let _ = out_tx.send(OutputLine::Stdout(line));
                }
                match ev {
                    SessionEvent::Screen(screen) => {
                        // Screens without controls are animation frames.
                        ready = screen.controls.primary().is_some();
                        current = Some(screen);
                    }
                    SessionEvent::Feedback(_) => {}
                    SessionEvent::Finished => break,
                }
            }
            line = lines.next_line(), if ready && input_open => {
                let Some(line) = line.context("read input")? else {
                    input_open = false;
                    let _ = cmd_tx.send(UiCommand::Quit);
                    continue;
                };
                let Some(screen) = current.as_ref() else { continue };
                match input::action_for_line(&screen.controls, &line) {
                    Ok(action) => {
                        ready = false;
                        let _ = cmd_tx.send(UiCommand::Act(action));
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "input rejected");
                        let _ = out_tx.send(OutputLine::Stderr(format!("{e}")));
                    }
                }
            }
        }
    }

    drop(cmd_tx);
    handle.await.context("session controller task failed")??;
    Ok(current.map(|s| s.stage))
}
