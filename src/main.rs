//! Terminal runner (default binary).
//!
//! Owns the fixed-period frame loop: poll input until the next tick
//! deadline, feed actions to the engine, then advance time and render
//! the returned snapshot.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::Engine;
use blockfall::input::{is_quit, map_key};
use blockfall::store::FileScoreStore;
use blockfall::term::{GameView, Surface, TerminalRenderer, Viewport};
use blockfall::types::{UserAction, SCORE_FILE, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut engine = Engine::new(FileScoreStore::new(SCORE_FILE));
    engine.submit_action(UserAction::Start, false);

    let view = GameView;
    let mut surface = Surface::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let snapshot = engine.advance_and_snapshot();

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut surface);
        term.draw(&surface)?;

        // Drain input until the next tick deadline.
        loop {
            let timeout = tick_duration
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO);

            if !event::poll(timeout)? {
                break;
            }

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if is_quit(key) {
                        // Persists the high score via the Quit signal.
                        engine.submit_action(UserAction::Terminate, false);
                        return Ok(());
                    }
                    if let Some(action) = map_key(key) {
                        engine.submit_action(action, false);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        last_tick = Instant::now();
    }
}
