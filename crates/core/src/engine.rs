//! The game engine: state machine, action routines and time advance.
//!
//! One `Engine` value owns the complete game state. External callers
//! use two entry points: [`Engine::submit_action`] for user input and
//! [`Engine::advance_and_snapshot`] for the periodic frame. Everything
//! else is internal action routines reached through the dispatch table.

use blockfall_store::ScoreStore;
use blockfall_types::{
    Phase, PieceKind, Signal, Status, UserAction, FIELD_COLS, LEVEL_MIN, MASK_SIZE, SPEED_MAX,
};

use crate::field::Field;
use crate::mask::preview_mask;
use crate::queue::PieceCycle;
use crate::scoring::{level_for_score, score_for_clear, speed_for_level};
use crate::snapshot::GameSnapshot;

/// The currently falling piece: kind, clockwise quarter-turn count and
/// the grid coordinate of its 4x4 mask's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub row: i32,
    pub col: i32,
}

impl ActivePiece {
    /// A fresh piece at the spawn anchor: top row, horizontally centered.
    fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            row: 0,
            col: ((FIELD_COLS - MASK_SIZE) / 2) as i32,
        }
    }
}

type Handler<S> = fn(&mut Engine<S>);

/// The transition table: `(phase, signal)` to action routine.
///
/// Absent entries are no-ops. GameOver is terminal except for Start;
/// Pause accepts only Start, PauseToggle and Quit.
fn binding<S: ScoreStore>(phase: Phase, signal: Signal) -> Option<Handler<S>> {
    use Phase::*;
    use Signal::*;

    match (phase, signal) {
        (GameOver, Signal::Start) => Some(Engine::start_game),
        (GameOver, _) => None,

        (_, Signal::Start) => Some(Engine::start_game),

        (Pause, PauseToggle) => Some(Engine::toggle_pause),
        (Pause, Quit) => Some(Engine::exit_game),
        (Pause, _) => None,

        (Falling, Rotate) => Some(Engine::rotate),
        (Falling, MoveLeft) => Some(Engine::move_left),
        (Falling, MoveRight) => Some(Engine::move_right),
        (Falling, HardDrop) => Some(Engine::drop_figure),
        (Falling, Tick) => Some(Engine::fall),

        (Phase::Start | Spawn | Falling | Lock, PauseToggle) => Some(Engine::toggle_pause),
        (Phase::Start | Spawn | Falling | Lock, Quit) => Some(Engine::exit_game),

        _ => None,
    }
}

#[derive(Debug)]
pub struct Engine<S: ScoreStore> {
    field: Field,
    active: Option<ActivePiece>,
    preview: Option<PieceKind>,
    cycle: PieceCycle,
    phase: Phase,
    score: u32,
    high_score: u32,
    level: u32,
    speed: u32,
    tick: u32,
    high_score_loaded: bool,
    store: S,
}

impl<S: ScoreStore> Engine<S> {
    pub fn new(store: S) -> Self {
        Self {
            field: Field::new(),
            active: None,
            preview: None,
            cycle: PieceCycle::new(),
            phase: Phase::Start,
            score: 0,
            high_score: 0,
            level: LEVEL_MIN,
            speed: SPEED_MAX,
            tick: 0,
            high_score_loaded: false,
            store,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Direct grid access for tests and tooling.
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Submit a coarse user action. `hold` is accepted for interface
    /// compatibility but has no effect on the outcome.
    pub fn submit_action(&mut self, action: UserAction, _hold: bool) {
        if let Some(signal) = signal_for(action) {
            self.dispatch(signal);
        }
    }

    /// Run the gravity check for one frame, then snapshot.
    ///
    /// Only the Falling phase accumulates ticks; once the accumulator
    /// reaches the current speed it resets and gravity fires.
    pub fn advance_and_snapshot(&mut self) -> GameSnapshot {
        if self.phase == Phase::Falling {
            self.tick += 1;
            if self.tick >= self.speed {
                self.tick = 0;
                self.dispatch(Signal::Tick);
            }
        }
        self.snapshot()
    }

    /// Build a read-only snapshot without advancing time.
    pub fn snapshot(&self) -> GameSnapshot {
        let frame = match self.active {
            Some(piece) => self
                .field
                .overlaid(piece.kind, piece.rotation, piece.row, piece.col),
            None => *self.field.cells(),
        };
        let preview = match self.preview {
            Some(kind) => preview_mask(kind),
            None => [[0; MASK_SIZE]; MASK_SIZE],
        };
        let status = match self.phase {
            Phase::Pause => Status::Paused,
            Phase::GameOver => Status::GameOver,
            _ => Status::Running,
        };

        GameSnapshot {
            frame,
            preview,
            score: self.score,
            high_score: self.high_score,
            level: self.level,
            speed: self.speed,
            status,
        }
    }

    fn dispatch(&mut self, signal: Signal) {
        if let Some(handler) = binding::<S>(self.phase, signal) {
            handler(self);
        }
    }

    fn start_game(&mut self) {
        // The store is consulted once per process lifetime, on the
        // first start; later sessions keep the in-memory value.
        if !self.high_score_loaded {
            self.high_score = self.store.load();
            self.high_score_loaded = true;
        }

        self.field.clear();
        self.active = None;
        self.preview = None;
        self.cycle.reset();
        self.score = 0;
        self.level = LEVEL_MIN;
        self.speed = SPEED_MAX;
        self.tick = 0;

        self.phase = Phase::Spawn;
        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        // First spawn of a session seeds the preview.
        let kind = match self.preview.take() {
            Some(kind) => kind,
            None => self.cycle.draw(),
        };

        let piece = ActivePiece::spawn(kind);
        self.active = Some(piece);
        self.phase = Phase::Falling;

        self.preview = Some(self.cycle.draw());

        if !self
            .field
            .can_place(piece.kind, piece.rotation, piece.row, piece.col)
        {
            self.phase = Phase::GameOver;
        }
    }

    fn move_left(&mut self) {
        if let Some(piece) = &mut self.active {
            if self
                .field
                .can_place(piece.kind, piece.rotation, piece.row, piece.col - 1)
            {
                piece.col -= 1;
            }
        }
    }

    fn move_right(&mut self) {
        if let Some(piece) = &mut self.active {
            if self
                .field
                .can_place(piece.kind, piece.rotation, piece.row, piece.col + 1)
            {
                piece.col += 1;
            }
        }
    }

    fn rotate(&mut self) {
        if let Some(piece) = &mut self.active {
            // No wall kicks: a rotation that would collide is rejected.
            let next = (piece.rotation + 1) % 4;
            if self.field.can_place(piece.kind, next, piece.row, piece.col) {
                piece.rotation = next;
            }
        }
    }

    fn fall(&mut self) {
        self.phase = Phase::Falling;
        let Some(piece) = &mut self.active else {
            return;
        };
        if self
            .field
            .can_place(piece.kind, piece.rotation, piece.row + 1, piece.col)
        {
            piece.row += 1;
        } else {
            self.phase = Phase::Lock;
            self.lock_active();
        }
    }

    fn drop_figure(&mut self) {
        let Some(piece) = &mut self.active else {
            return;
        };
        while self
            .field
            .can_place(piece.kind, piece.rotation, piece.row + 1, piece.col)
        {
            piece.row += 1;
        }
        self.phase = Phase::Lock;
        self.lock_active();
    }

    /// Commit the active piece, clear rows, score, then respawn.
    fn lock_active(&mut self) {
        let Some(piece) = self.active else {
            return;
        };
        self.field
            .stamp(piece.kind, piece.rotation, piece.row, piece.col);
        self.phase = Phase::Spawn;
        self.clear_rows_and_score();
        self.spawn_next();
    }

    fn clear_rows_and_score(&mut self) {
        let cleared = self.field.clear_full_rows().len();
        self.score += score_for_clear(cleared);

        let new_level = level_for_score(self.score);
        if new_level != self.level {
            self.level = new_level;
            self.speed = speed_for_level(new_level);
        }

        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score);
        }
    }

    fn toggle_pause(&mut self) {
        self.phase = if self.phase == Phase::Pause {
            Phase::Falling
        } else {
            Phase::Pause
        };
    }

    fn exit_game(&mut self) {
        self.store.save(self.high_score);
        self.phase = Phase::GameOver;
    }
}

/// Map a public user action onto the dispatcher signal it drives.
///
/// MoveUp is reserved and maps to nothing; MoveDown is a hard drop.
fn signal_for(action: UserAction) -> Option<Signal> {
    match action {
        UserAction::Start => Some(Signal::Start),
        UserAction::Pause => Some(Signal::PauseToggle),
        UserAction::Terminate => Some(Signal::Quit),
        UserAction::MoveLeft => Some(Signal::MoveLeft),
        UserAction::MoveRight => Some(Signal::MoveRight),
        UserAction::MoveUp => None,
        UserAction::MoveDown => Some(Signal::HardDrop),
        UserAction::Rotate => Some(Signal::Rotate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_store::MemoryScoreStore;

    fn started_engine() -> Engine<MemoryScoreStore> {
        let mut engine = Engine::new(MemoryScoreStore::new(0));
        engine.submit_action(UserAction::Start, false);
        engine
    }

    #[test]
    fn new_engine_waits_in_start_phase() {
        let engine = Engine::new(MemoryScoreStore::new(0));
        assert_eq!(engine.phase(), Phase::Start);
        assert!(engine.active().is_none());
    }

    #[test]
    fn start_spawns_and_falls() {
        let engine = started_engine();
        assert_eq!(engine.phase(), Phase::Falling);
        let piece = engine.active().unwrap();
        assert_eq!(piece.kind, PieceKind::I);
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.row, 0);
        assert_eq!(piece.col, 3);
    }

    #[test]
    fn high_score_loads_once_per_process() {
        let mut engine = Engine::new(MemoryScoreStore::new(900));
        engine.submit_action(UserAction::Start, false);
        assert_eq!(engine.high_score(), 900);

        // A restart keeps the in-memory value rather than reloading.
        engine.submit_action(UserAction::Start, false);
        assert_eq!(engine.high_score(), 900);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn gameplay_signals_ignored_before_start() {
        let mut engine = Engine::new(MemoryScoreStore::new(0));
        engine.submit_action(UserAction::MoveLeft, false);
        engine.submit_action(UserAction::Rotate, false);
        engine.submit_action(UserAction::MoveDown, false);
        assert_eq!(engine.phase(), Phase::Start);
        assert!(engine.active().is_none());
    }

    #[test]
    fn move_up_is_reserved() {
        let mut engine = started_engine();
        let before = engine.snapshot();
        engine.submit_action(UserAction::MoveUp, false);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn hold_flag_has_no_effect() {
        let mut a = started_engine();
        let mut b = started_engine();
        a.submit_action(UserAction::MoveLeft, false);
        b.submit_action(UserAction::MoveLeft, true);
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn pause_freezes_the_tick_accumulator() {
        let mut engine = started_engine();
        engine.submit_action(UserAction::Pause, false);
        assert_eq!(engine.phase(), Phase::Pause);

        let frozen = engine.snapshot();
        for _ in 0..50 {
            engine.advance_and_snapshot();
        }
        assert_eq!(engine.snapshot(), frozen);

        engine.submit_action(UserAction::Pause, false);
        assert_eq!(engine.phase(), Phase::Falling);
    }

    #[test]
    fn terminate_works_while_paused() {
        let mut engine = started_engine();
        engine.submit_action(UserAction::Pause, false);
        engine.submit_action(UserAction::Terminate, false);
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(engine.store().save_count, 1);
    }

    #[test]
    fn game_over_accepts_only_start() {
        let mut engine = started_engine();
        engine.submit_action(UserAction::Terminate, false);
        assert_eq!(engine.phase(), Phase::GameOver);

        engine.submit_action(UserAction::Terminate, false);
        engine.submit_action(UserAction::Pause, false);
        engine.submit_action(UserAction::MoveLeft, false);
        assert_eq!(engine.phase(), Phase::GameOver);

        engine.submit_action(UserAction::Start, false);
        assert_eq!(engine.phase(), Phase::Falling);
    }

    #[test]
    fn blocked_spawn_ends_the_game() {
        let mut engine = started_engine();
        // Wall off the spawn area, then force a lock via hard drop.
        for row in 1..4 {
            for col in 3..7 {
                engine.field_mut().set(row, col, 1);
            }
        }
        engine.submit_action(UserAction::MoveDown, false);
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(engine.snapshot().status, Status::GameOver);
    }

    #[test]
    fn new_high_score_is_persisted_immediately() {
        let mut engine = started_engine();
        // Stage a nearly full bottom row the falling I piece completes.
        for col in 0..FIELD_COLS as i32 {
            if !(3..7).contains(&col) {
                engine.field_mut().set(19, col, 2);
            }
        }
        engine.submit_action(UserAction::MoveDown, false);
        assert_eq!(engine.score(), 100);
        assert_eq!(engine.high_score(), 100);
        assert_eq!(engine.store().score(), 100);
    }

    #[test]
    fn preview_always_one_draw_ahead() {
        let mut engine = started_engine();
        // Session cycle starts at I; the preview must hold O.
        let preview = engine.snapshot().preview;
        assert_eq!(preview[1][1], PieceKind::O.cell_code());

        engine.submit_action(UserAction::MoveDown, false);
        assert_eq!(engine.active().unwrap().kind, PieceKind::O);
        let preview = engine.snapshot().preview;
        assert!(preview
            .iter()
            .flatten()
            .any(|&c| c == PieceKind::S.cell_code()));
    }
}
