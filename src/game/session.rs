//! Host-side game loop.
//!
//! [`GameSession`] drives one [`Game`] frame by frame: the clock is ticked
//! first, then the frame's input events are applied in order. A clock that runs
//! out therefore wins over any input that arrives in the same frame.
//!
//! [`spawn_session`] runs that loop on its own thread, talking to the host over
//! a command channel and an update channel. The worker owns the game for its
//! whole lifetime; it stops between frames once the game is over or the host
//! drops its command sender.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::TimeDelta;
use tracing::{debug, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game::config::GameConfig;
use crate::game::game::{Game, InputOutcome};
use crate::game::game_view::GameView;
use crate::game_state::chess_types::{PieceKind, Square};

/// Discrete input coming from the UI side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SelectSquare(Square),
    AttemptMove(Square),
    Click(Square),
    ChoosePromotion(PieceKind),
    Undo,
    Quit,
}

/// Messages a host sends to a session worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Event(GameEvent),
    /// Ask for a fresh view even when nothing happened.
    Refresh,
}

/// Result of one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUpdate {
    pub outcomes: Vec<InputOutcome>,
    pub view: GameView,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    game: Game,
}

impl GameSession {
    pub fn new(config: GameConfig) -> ChessResult<Self> {
        Ok(Self::from_game(Game::new(config)?))
    }

    pub fn from_game(game: Game) -> Self {
        Self { game }
    }

    #[inline]
    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn apply(&mut self, event: GameEvent) -> InputOutcome {
        match event {
            GameEvent::SelectSquare(square) => self.game.select_square(square),
            GameEvent::AttemptMove(square) => self.game.attempt_move(square),
            GameEvent::Click(square) => self.game.click(square),
            GameEvent::ChoosePromotion(kind) => self.game.choose_promotion(kind),
            GameEvent::Undo => self.game.undo(),
            GameEvent::Quit => self.game.quit(),
        }
    }

    /// Tick the clock by `elapsed`, then apply `events` in order.
    pub fn frame<I>(&mut self, elapsed: Duration, events: I) -> SessionUpdate
    where
        I: IntoIterator<Item = GameEvent>,
    {
        let elapsed = TimeDelta::from_std(elapsed).unwrap_or_else(|_| TimeDelta::MAX);
        self.game.tick(elapsed);

        let outcomes = events.into_iter().map(|event| self.apply(event)).collect();
        SessionUpdate {
            outcomes,
            view: GameView::from_game(&self.game),
        }
    }
}

/// Host side of a session running on a worker thread.
pub struct SessionHandle {
    commands: Sender<SessionCommand>,
    updates: Receiver<SessionUpdate>,
    worker: JoinHandle<GameView>,
}

impl SessionHandle {
    pub fn send(&self, event: GameEvent) -> ChessResult<()> {
        self.commands
            .send(SessionCommand::Event(event))
            .map_err(|_| ChessError::SessionClosed)
    }

    pub fn refresh(&self) -> ChessResult<()> {
        self.commands
            .send(SessionCommand::Refresh)
            .map_err(|_| ChessError::SessionClosed)
    }

    /// Wait up to `timeout` for the next update.
    pub fn recv_update(&self, timeout: Duration) -> ChessResult<Option<SessionUpdate>> {
        match self.updates.recv_timeout(timeout) {
            Ok(update) => Ok(Some(update)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(ChessError::SessionClosed),
        }
    }

    /// Updates already waiting, without blocking.
    pub fn pending_updates(&self) -> impl Iterator<Item = SessionUpdate> + '_ {
        self.updates.try_iter()
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Hang up and wait for the worker. Returns the final view of the game.
    pub fn join(self) -> ChessResult<GameView> {
        let Self {
            commands, worker, ..
        } = self;
        drop(commands);
        worker.join().map_err(|_| ChessError::SessionPanicked)
    }
}

/// Start a new game loop on its own thread.
pub fn spawn_session(config: GameConfig) -> ChessResult<SessionHandle> {
    let session = GameSession::new(config)?;
    let (command_tx, command_rx) = mpsc::channel::<SessionCommand>();
    let (update_tx, update_rx) = mpsc::channel::<SessionUpdate>();

    let worker = thread::spawn(move || run_session(session, config.frame_interval, command_rx, update_tx));

    Ok(SessionHandle {
        commands: command_tx,
        updates: update_rx,
        worker,
    })
}

fn run_session(
    mut session: GameSession,
    frame_interval: Duration,
    commands: Receiver<SessionCommand>,
    updates: Sender<SessionUpdate>,
) -> GameView {
    let mut last_frame = Instant::now();
    debug!(?frame_interval, "session started");

    loop {
        let mut events = Vec::new();
        let mut refresh = false;
        let mut hung_up = false;
        loop {
            match commands.try_recv() {
                Ok(SessionCommand::Event(event)) => events.push(event),
                Ok(SessionCommand::Refresh) => refresh = true,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    hung_up = true;
                    break;
                }
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last_frame);
        last_frame = now;

        let was_active = session.game().is_active();
        let update = session.frame(elapsed, events);
        let ended = was_active && !session.game().is_active();

        if !update.outcomes.is_empty() || refresh || ended {
            if updates.send(update).is_err() {
                warn!("host stopped listening, ending session");
                break;
            }
        }

        if hung_up || !session.game().is_active() {
            break;
        }
        thread::sleep(frame_interval);
    }

    debug!(result = ?session.game().result(), "session stopped");
    GameView::from_game(session.game())
}
