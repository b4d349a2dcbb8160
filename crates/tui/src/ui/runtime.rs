//! Runtime: unified event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single event loop that handles input, animation ticks and
//!   completed background work.
//! - Route keys to the main view and execute returned `Effect`s.
//!
//! Ticking strategy: fast interval while a request is in flight or a notice
//! is showing, slow interval when idle.
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::MouseEventKind;
use crossterm::{
    event::{self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::future::BoxFuture;
use futures_util::{StreamExt, stream::FuturesUnordered};
use quill_types::{Effect, ExecOutcome, Msg};
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};

use crate::app::{App, SharedCtx};
use crate::cmd;
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;

/// Spawn a dedicated input task that reads terminal input and forwards
/// `crossterm` events over a Tokio channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    let mut last_mouse_event = Instant::now();

    tokio::task::spawn_blocking(move || {
        let sixteen_ms = Duration::from_millis(16);
        loop {
            if sender.is_closed() {
                break;
            }
            match event::poll(sixteen_ms) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(error) => {
                    tracing::warn!("Failed to poll event: {}", error);
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    // Throttle mouse move events to once per 16 ms.
                    let is_mouse_move = event.as_mouse_event().is_some_and(|mouse| mouse.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_event.elapsed() < sixteen_ms {
                            continue;
                        }
                        last_mouse_event = Instant::now();
                    }
                    if let Err(error) = sender.blocking_send(event) {
                        tracing::warn!("Failed to send event: {}", error);
                        break;
                    }
                }
                Err(error) => {
                    tracing::warn!("Failed to read event: {}", error);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture, DisableBracketedPaste)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

/// Route a raw crossterm event to the main view.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        Event::Paste(text) => {
            crate::ui::components::form::paste_into_focused_field(app, &text);
            Vec::new()
        }
        Event::Key(_) | Event::FocusGained | Event::FocusLost => Vec::new(),
    }
}

/// Execute effects, feeding immediate outcomes straight back into the app
/// and queueing background work on `pending_execs`.
fn process_effects(
    app: &mut App,
    main_view: &mut MainView,
    effects: Vec<Effect>,
    pending_execs: &mut FuturesUnordered<BoxFuture<'static, ExecOutcome>>,
) {
    let mut queue = effects;
    while !queue.is_empty() {
        let command_batch = cmd::run_from_effects(&app.ctx, std::mem::take(&mut queue));
        pending_execs.extend(command_batch.pending);
        for outcome in command_batch.immediate {
            queue.extend(main_view.handle_message(app, Msg::ExecCompleted(Box::new(outcome))));
        }
    }
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop and performs cleanup on exit.
pub async fn run_app(ctx: SharedCtx) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut main_view = MainView::default();
    let mut app = App::new(ctx);
    let mut terminal = setup_terminal()?;

    let mut pending_execs: FuturesUnordered<BoxFuture<'static, ExecOutcome>> = FuturesUnordered::new();

    let fast_interval = Duration::from_millis(100);
    let idle_interval = Duration::from_millis(1000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(&mut terminal, &mut app, &mut main_view)?;

    loop {
        let needs_animation = app.loading || app.notice.is_some();
        let target_interval = if needs_animation { fast_interval } else { idle_interval };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut effects: Vec<Effect> = Vec::new();
        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                effects.extend(handle_input_event(&mut app, &mut main_view, event));
                needs_render = true;
            }

            _ = ticker.tick() => {
                effects.extend(main_view.handle_message(&mut app, Msg::Tick));
                needs_render = needs_animation;
            }

            Some(outcome) = pending_execs.next(), if !pending_execs.is_empty() => {
                effects.extend(main_view.handle_message(&mut app, Msg::ExecCompleted(Box::new(outcome))));
                needs_render = true;
            }

            _ = signal::ctrl_c() => { break; }
        }

        if !effects.is_empty() {
            process_effects(&mut app, &mut main_view, effects, &mut pending_execs);
            needs_render = true;
        }

        if needs_render {
            render(&mut terminal, &mut app, &mut main_view)?;
        }
    }

    if !pending_execs.is_empty() {
        tracing::info!(in_flight = pending_execs.len(), "exiting with generation requests still in flight");
    }
    cleanup_terminal(&mut terminal)?;
    Ok(())
}
