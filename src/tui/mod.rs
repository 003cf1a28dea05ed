mod help;
mod state;
mod view;

use crate::cli::{build_config, Cli};
use crate::content::APP_TITLE;
use crate::model::SessionEvent;
use crate::orchestrator::{self, UiCommand};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use state::{KeyOutcome, UiState};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<SessionEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_handle = std::thread::spawn(move || run_threaded(event_rx, cmd_tx));

    let cfg = build_config(&args);
    let res = orchestrator::run_controller(&cfg, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
pub fn run_threaded(
    mut event_rx: UnboundedReceiver<SessionEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; the session state lives in the controller.
    let mut state = UiState::default();

    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    let res = loop {
        // Drain events without blocking to keep the UI responsive.
        let mut open = true;
        while let Ok(ev) = event_rx.try_recv() {
            dirty = true;
            if !state.apply(ev) {
                open = false;
                break;
            }
        }
        if !open {
            break Ok(());
        }

        if dirty && last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
            dirty = false;
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(k)) => {
                    if k.kind != KeyEventKind::Press {
                        continue;
                    }
                    dirty = true;
                    match state.on_key(k.modifiers, k.code) {
                        KeyOutcome::Quit => {
                            let _ = cmd_tx.send(UiCommand::Quit);
                            break Ok(());
                        }
                        KeyOutcome::Send(action) => {
                            tracing::debug!(?action, "ui action");
                            let _ = cmd_tx.send(UiCommand::Act(action));
                        }
                        KeyOutcome::None => {}
                    }
                }
                Ok(Event::Resize(..)) => dirty = true,
                _ => {}
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let controls_height = match state.screen.as_ref() {
        Some(s) if s.controls.field.is_some() => 4,
        Some(s) if !s.controls.buttons.is_empty() => 1,
        _ => 0,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(controls_height),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    let stage_label = state
        .screen
        .as_ref()
        .map(|s| format!("Step {} of 6", s.stage.index() + 1))
        .unwrap_or_default();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            state
                .screen
                .as_ref()
                .map(|s| s.title.clone())
                .unwrap_or_default(),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("   "),
        Span::styled(stage_label, Style::default().fg(Color::Gray)),
    ]))
    .block(Block::default().borders(Borders::ALL).title(APP_TITLE));
    f.render_widget(header, chunks[0]);

    if state.show_help {
        help::draw_help(chunks[1], f);
    } else if let Some(screen) = state.screen.as_ref() {
        let body = Block::default().borders(Borders::ALL);
        let inner = body.inner(chunks[1]);
        f.render_widget(body, chunks[1]);
        view::draw_sections(inner, f, screen);
        if controls_height > 0 {
            view::draw_controls(chunks[2], f, screen, &state.input);
        }
    } else {
        f.render_widget(Paragraph::new("Starting…"), chunks[1]);
    }

    // Status panel: local validation first, then controller feedback.
    let status_line = if !state.info.is_empty() {
        Line::from(vec![
            Span::styled("Input: ", Style::default().fg(Color::Gray)),
            Span::styled(state.info.clone(), Style::default().fg(Color::Yellow)),
        ])
    } else if let Some(notice) = state.feedback.as_ref() {
        view::notice_line(notice)
    } else {
        Line::from(vec![
            Span::styled("?", Style::default().fg(Color::Magenta)),
            Span::raw(" help   "),
            Span::styled("Esc", Style::default().fg(Color::Magenta)),
            Span::raw(" quit"),
        ])
    };
    let status =
        Paragraph::new(status_line).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[3]);
}
