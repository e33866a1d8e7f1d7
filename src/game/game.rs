//! The game state machine.
//!
//! A `Game` owns one board, the clocks, captured lists and the snapshot
//! history. Input intents (select, move, promote, undo, quit) never fail: a
//! rejected intent leaves the game untouched and is reported as
//! [`InputOutcome::Ignored`].
//!
//! Lifecycle: `Setup` happens inside the constructors, which place the pieces
//! and push the first snapshot. The game is active while `result()` is
//! `None`; checkmate, stalemate, time forfeit and abandonment are terminal.

use chrono::TimeDelta;
use tracing::{debug, info, trace};

use crate::chess_errors::ChessResult;
use crate::game::captured::CapturedPieces;
use crate::game::clock::ChessClock;
use crate::game::config::GameConfig;
use crate::game::game_result::GameResult;
use crate::game::history::{move_notation, GameHistory};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::is_promotion_choice;
use crate::game_state::chess_types::*;
use crate::game_state::move_record::{MoveRecord, SpecialMove};
use crate::game_state::snapshot::GameSnapshot;
use crate::move_generation::legal_move_apply::{apply_move, ChessMove};
use crate::move_generation::legal_move_checks::{
    attackers_to_square, is_king_in_check, king_square,
};
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_destinations};
use crate::utils::algebraic::square_name;

/// Why an intent was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    GameOver,
    PromotionPending,
    NoSelection,
    IllegalDestination,
    NoPromotionPending,
    InvalidPromotionChoice,
    NothingToUndo,
}

/// What an intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Selected { piece: PieceId, destinations: usize },
    SelectionCleared,
    /// A move was completed (promotion included).
    Moved(MoveRecord),
    /// A pawn reached the last rank and waits for a promotion choice.
    AwaitingPromotion,
    Undone,
    /// Undo while a promotion was pending took the pawn move back.
    PromotionCancelled,
    Abandoned,
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    piece: PieceId,
    destinations: Vec<Square>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingPromotion {
    piece: PieceId,
    color: Color,
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    clock: ChessClock,
    captured: CapturedPieces,
    history: GameHistory,
    result: Option<GameResult>,
    selection: Option<Selection>,
    pending_promotion: Option<PendingPromotion>,
}

impl Default for Game {
    fn default() -> Self {
        Self::setup(Board::new_game(), GameConfig::default())
    }
}

impl Game {
    /// Standard starting position, light to move, clocks frozen.
    pub fn new(config: GameConfig) -> ChessResult<Self> {
        config.validate()?;
        Ok(Self::setup(Board::new_game(), config))
    }

    /// Start from a custom position. The board is validated first.
    pub fn from_board(board: Board, config: GameConfig) -> ChessResult<Self> {
        config.validate()?;
        board.validate()?;
        Ok(Self::setup(board, config))
    }

    fn setup(board: Board, config: GameConfig) -> Self {
        let clock = ChessClock::new(config.clock_time, config.increment);
        // A custom position may already be decided.
        let result = terminal_status(&board);
        let initial = GameSnapshot {
            board,
            notation_len: 0,
            captured_lens: [0, 0],
            clock,
            result,
        };
        debug!(side = board.side_to_move.name(), pieces = board.piece_count(), "game set up");
        Self {
            config,
            board,
            clock,
            captured: CapturedPieces::new(),
            history: GameHistory::new(initial),
            result,
            selection: None,
            pending_promotion: None,
        }
    }

    // ----------------------------------------------------------------------
    // Accessors
    // ----------------------------------------------------------------------

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn clock(&self) -> &ChessClock {
        &self.clock
    }

    #[inline]
    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }

    #[inline]
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    #[inline]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.result.is_none()
    }

    /// The side that must act next. While a promotion is pending this is the
    /// side that pushed the pawn, and its clock keeps running.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.pending_promotion
            .map_or(self.board.side_to_move, |pending| pending.color)
    }

    #[inline]
    pub fn selected_piece(&self) -> Option<PieceId> {
        self.selection.as_ref().map(|s| s.piece)
    }

    /// Legal destinations of the selected piece, empty without a selection.
    #[inline]
    pub fn legal_destinations(&self) -> &[Square] {
        self.selection
            .as_ref()
            .map_or(&[][..], |s| s.destinations.as_slice())
    }

    /// Color waiting to choose a promotion piece.
    #[inline]
    pub fn pending_promotion(&self) -> Option<Color> {
        self.pending_promotion.map(|p| p.color)
    }

    /// Square of the king of the side to move, when it is attacked.
    pub fn checked_king_square(&self) -> Option<Square> {
        let side = self.side_to_move();
        if is_king_in_check(&self.board, side) {
            king_square(&self.board, side)
        } else {
            None
        }
    }

    /// Copy of the current state in the same form the history stores.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            notation_len: self.history.notation().len(),
            captured_lens: self.captured.lens(),
            clock: self.clock,
            result: self.result,
        }
    }

    // ----------------------------------------------------------------------
    // Intents
    // ----------------------------------------------------------------------

    /// Select the piece of the side to move on `square`, or clear the
    /// selection when the square holds anything else.
    pub fn select_square(&mut self, square: Square) -> InputOutcome {
        if let Some(reason) = self.blocked() {
            return ignore(reason);
        }

        let side = self.board.side_to_move;
        match self.board.id_at(square) {
            Some(id) if self.board.color_at(square) == Some(side) => {
                let destinations = legal_destinations(&self.board, id);
                let count = destinations.len();
                trace!(square = %square_name(square), count, "piece selected");
                self.selection = Some(Selection {
                    piece: id,
                    destinations,
                });
                InputOutcome::Selected {
                    piece: id,
                    destinations: count,
                }
            }
            _ => {
                self.selection = None;
                InputOutcome::SelectionCleared
            }
        }
    }

    /// Move the selected piece to `dest` if it is one of its legal
    /// destinations.
    pub fn attempt_move(&mut self, dest: Square) -> InputOutcome {
        if let Some(reason) = self.blocked() {
            return ignore(reason);
        }
        let Some(selection) = self.selection.as_ref() else {
            return ignore(IgnoreReason::NoSelection);
        };
        if !selection.destinations.contains(&dest) {
            return ignore(IgnoreReason::IllegalDestination);
        }

        let piece = selection.piece;
        let Some(applied) = apply_move(&self.board, ChessMove::new(piece, dest)) else {
            debug_assert!(false, "selected piece {piece} is not on the board");
            return ignore(IgnoreReason::IllegalDestination);
        };

        if let Some(victim) = applied.record.captured {
            self.captured.push(victim);
        }
        self.board = applied.board;
        self.selection = None;

        if applied.awaits_promotion() {
            debug!(square = %square_name(dest), "waiting for promotion choice");
            self.pending_promotion = Some(PendingPromotion {
                piece,
                color: applied.record.color,
            });
            return InputOutcome::AwaitingPromotion;
        }

        self.complete_move(applied.record)
    }

    /// Board-click behaviour: move when `square` is a legal destination of the
    /// current selection, otherwise (re)select or clear.
    pub fn click(&mut self, square: Square) -> InputOutcome {
        if let Some(reason) = self.blocked() {
            return ignore(reason);
        }
        if self.legal_destinations().contains(&square) {
            self.attempt_move(square)
        } else {
            self.select_square(square)
        }
    }

    /// Finish a pending promotion with `kind`.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> InputOutcome {
        if self.result.is_some() {
            return ignore(IgnoreReason::GameOver);
        }
        let Some(pending) = self.pending_promotion else {
            return ignore(IgnoreReason::NoPromotionPending);
        };
        if !is_promotion_choice(kind) {
            return ignore(IgnoreReason::InvalidPromotionChoice);
        }
        let Some(mut record) = self.board.last_move else {
            debug_assert!(false, "pending promotion without a last move");
            return ignore(IgnoreReason::NoPromotionPending);
        };

        self.board.set_kind(pending.piece, kind);
        record.special = SpecialMove::Promotion(kind);
        self.board.last_move = Some(record);
        self.pending_promotion = None;

        self.complete_move(record)
    }

    /// Take back the last completed move, or cancel a pending promotion.
    pub fn undo(&mut self) -> InputOutcome {
        if self.result.is_some() {
            return ignore(IgnoreReason::GameOver);
        }

        if self.pending_promotion.is_some() {
            let top = *self.history.top();
            self.restore(&top);
            debug!("pending promotion cancelled");
            return InputOutcome::PromotionCancelled;
        }

        if !self.history.can_undo() {
            return ignore(IgnoreReason::NothingToUndo);
        }
        match self.history.pop() {
            Some(top) => {
                self.restore(&top);
                debug!(snapshots = self.history.len(), "move undone");
                InputOutcome::Undone
            }
            None => ignore(IgnoreReason::NothingToUndo),
        }
    }

    /// Charge `elapsed` to the side on the clock. Returns the result when the
    /// tick ended the game on time.
    pub fn tick(&mut self, elapsed: TimeDelta) -> Option<GameResult> {
        if self.result.is_some() {
            return None;
        }

        let side = self.side_to_move();
        let expired = self.clock.tick(side, elapsed)?;
        let result = GameResult::TimeForfeit {
            winner: expired.opposite(),
        };
        info!(%result, "flag fell");
        self.finish(result);
        Some(result)
    }

    /// External quit signal.
    pub fn quit(&mut self) -> InputOutcome {
        if self.result.is_some() {
            return ignore(IgnoreReason::GameOver);
        }
        info!("game abandoned");
        self.finish(GameResult::Abandoned);
        InputOutcome::Abandoned
    }

    // ----------------------------------------------------------------------
    // Internals
    // ----------------------------------------------------------------------

    fn blocked(&self) -> Option<IgnoreReason> {
        if self.result.is_some() {
            Some(IgnoreReason::GameOver)
        } else if self.pending_promotion.is_some() {
            Some(IgnoreReason::PromotionPending)
        } else {
            None
        }
    }

    /// Notation, clocks, terminal detection and the snapshot for a move whose
    /// board effects are already applied.
    fn complete_move(&mut self, record: MoveRecord) -> InputOutcome {
        let notation = move_notation(&record);
        debug!(side = record.color.name(), %notation, "move applied");
        self.history.record_notation(notation);

        if !self.clock.is_started() {
            self.clock.start();
        }
        self.clock.add_increment(record.color);

        self.result = terminal_status(&self.board);
        match self.result {
            Some(result) => info!(%result, "game over"),
            None => {
                let side = self.board.side_to_move;
                if let Some(king) = king_square(&self.board, side) {
                    let attackers = attackers_to_square(&self.board, king, side);
                    if !attackers.is_empty() {
                        info!(side = side.name(), ?attackers, "check");
                    }
                }
            }
        }

        let snapshot = self.snapshot();
        self.history.push(snapshot);
        InputOutcome::Moved(record)
    }

    fn restore(&mut self, snapshot: &GameSnapshot) {
        self.board = snapshot.board;
        self.clock = snapshot.clock;
        self.result = snapshot.result;
        self.captured.truncate(snapshot.captured_lens);
        self.history.truncate_notation(snapshot.notation_len);
        self.selection = None;
        self.pending_promotion = None;
    }

    /// End the game. A half-played promotion is taken back first so the
    /// final position is the last completed one.
    fn finish(&mut self, result: GameResult) {
        if self.pending_promotion.is_some() {
            let clock = self.clock;
            let top = *self.history.top();
            self.restore(&top);
            self.clock = clock;
            debug!("pending promotion dropped at game end");
        }
        self.result = Some(result);
        self.selection = None;
        self.pending_promotion = None;
    }
}

/// Checkmate or stalemate for the side to move on `board`.
fn terminal_status(board: &Board) -> Option<GameResult> {
    let side = board.side_to_move;
    if has_any_legal_move(board, side) {
        return None;
    }
    Some(if is_king_in_check(board, side) {
        GameResult::Checkmate {
            winner: side.opposite(),
        }
    } else {
        GameResult::Stalemate
    })
}

fn ignore(reason: IgnoreReason) -> InputOutcome {
    trace!(?reason, "input ignored");
    InputOutcome::Ignored(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::PROMOTION_CHOICES;
    use crate::move_generation::legal_move_generator::legal_moves;
    use crate::utils::algebraic::algebraic_to_square;
    use rand::rngs::StdRng;
    use rand::seq::{IndexedRandom, SliceRandom};
    use rand::SeedableRng;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn play(game: &mut Game, from: &str, to: &str) -> InputOutcome {
        assert!(
            matches!(game.select_square(sq(from)), InputOutcome::Selected { .. }),
            "{from} should be selectable"
        );
        game.attempt_move(sq(to))
    }

    fn play_all(game: &mut Game, moves: &[(&str, &str)]) {
        for (from, to) in moves {
            let outcome = play(game, from, to);
            assert!(
                matches!(outcome, InputOutcome::Moved(_)),
                "{from}-{to} should be played, got {outcome:?}"
            );
        }
    }

    fn custom(side: Color, tokens: &[&str]) -> Game {
        let board = Board::from_layout(side, tokens).expect("layout should parse");
        Game::from_board(board, GameConfig::default()).expect("game should start")
    }

    #[test]
    fn new_game_starts_active_with_one_snapshot() {
        let game = Game::default();
        assert!(game.is_active());
        assert_eq!(game.side_to_move(), Color::Light);
        assert_eq!(game.history().len(), 1);
        assert!(!game.clock().is_started());
        assert_eq!(game.snapshot(), *game.history().initial());
    }

    #[test]
    fn selection_is_replaced_and_cleared() {
        let mut game = Game::default();
        let pawn = game.board().id_at(sq("e2")).expect("e2 pawn");
        assert_eq!(
            game.select_square(sq("e2")),
            InputOutcome::Selected {
                piece: pawn,
                destinations: 2,
            }
        );
        let mut dests = game.legal_destinations().to_vec();
        dests.sort_unstable();
        assert_eq!(dests, vec![sq("e3"), sq("e4")]);

        // Reselecting a friendly piece recomputes the set for that piece.
        game.select_square(sq("g1"));
        assert_eq!(game.legal_destinations().len(), 2);
        assert_eq!(game.selected_piece(), game.board().id_at(sq("g1")));

        // Enemy and empty squares clear the selection.
        assert_eq!(game.select_square(sq("e7")), InputOutcome::SelectionCleared);
        assert_eq!(game.selected_piece(), None);
        assert!(game.legal_destinations().is_empty());
        assert_eq!(game.select_square(sq("e5")), InputOutcome::SelectionCleared);
    }

    #[test]
    fn moves_outside_the_legal_set_are_ignored() {
        let mut game = Game::default();
        assert_eq!(
            game.attempt_move(sq("e4")),
            InputOutcome::Ignored(IgnoreReason::NoSelection)
        );
        game.select_square(sq("e2"));
        assert_eq!(
            game.attempt_move(sq("e5")),
            InputOutcome::Ignored(IgnoreReason::IllegalDestination)
        );
        assert_eq!(game.board(), &Board::new_game());
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn click_selects_then_moves() {
        let mut game = Game::default();
        assert!(matches!(game.click(sq("g1")), InputOutcome::Selected { .. }));
        assert!(matches!(game.click(sq("f3")), InputOutcome::Moved(_)));
        assert_eq!(game.side_to_move(), Color::Dark);
        // A click on a light piece now only clears.
        assert_eq!(game.click(sq("f3")), InputOutcome::SelectionCleared);
        assert_eq!(game.history().notation(), ["Nf3"]);
    }

    #[test]
    fn en_passant_after_e4_removes_the_pawn_beside() {
        let mut game = Game::default();
        play_all(&mut game, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);

        game.select_square(sq("e5"));
        assert!(game.legal_destinations().contains(&sq("d6")));
        let outcome = game.attempt_move(sq("d6"));
        let InputOutcome::Moved(record) = outcome else {
            panic!("en passant should be played, got {outcome:?}");
        };
        assert_eq!(record.special, SpecialMove::EnPassant);
        assert!(game.board().is_empty(sq("d5")));
        assert_eq!(
            game.board().piece_at(sq("d6")).map(|p| (p.kind, p.color)),
            Some((PieceKind::Pawn, Color::Light))
        );
        let lost = game.captured().of(Color::Dark);
        assert_eq!(lost.len(), 1);
        assert_eq!(lost[0].square, sq("d5"));
        assert_eq!(game.history().recent(1), ["xd6"]);
    }

    #[test]
    fn en_passant_expires_after_one_turn() {
        let mut game = Game::default();
        play_all(
            &mut game,
            &[
                ("e2", "e4"),
                ("a7", "a6"),
                ("e4", "e5"),
                ("d7", "d5"),
                ("h2", "h3"),
                ("a6", "a5"),
            ],
        );
        game.select_square(sq("e5"));
        assert!(!game.legal_destinations().contains(&sq("d6")));
    }

    #[test]
    fn castling_moves_king_and_rook_together() {
        let mut game = Game::default();
        play_all(
            &mut game,
            &[
                ("e2", "e4"),
                ("e7", "e5"),
                ("g1", "f3"),
                ("b8", "c6"),
                ("f1", "c4"),
                ("f8", "c5"),
                ("e1", "g1"),
            ],
        );
        let board = game.board();
        assert_eq!(board.piece_at(sq("g1")).map(|p| p.kind), Some(PieceKind::King));
        assert_eq!(board.piece_at(sq("f1")).map(|p| p.kind), Some(PieceKind::Rook));
        assert!(board.is_empty(sq("h1")));
        assert_eq!(board.last_move.map(|m| m.special), Some(SpecialMove::Castle));
        assert_eq!(game.history().recent(1), ["Kg1"]);
    }

    #[test]
    fn castling_is_gone_once_the_king_has_moved() {
        let mut game = custom(Color::Light, &["Ke1", "Rh1", "ke8"]);
        play_all(&mut game, &[("e1", "e2"), ("e8", "d8"), ("e2", "e1"), ("d8", "e8")]);
        game.select_square(sq("e1"));
        assert!(!game.legal_destinations().contains(&sq("g1")));
        assert!(game.legal_destinations().contains(&sq("f1")));
    }

    #[test]
    fn check_with_an_escape_is_not_mate() {
        let mut game = custom(Color::Light, &["Ka1", "Rb1", "ke8"]);
        play_all(&mut game, &[("b1", "e1")]);
        assert!(game.is_active());
        assert_eq!(game.checked_king_square(), Some(sq("e8")));

        // The only legal replies are king steps off the e-file.
        let replies = legal_moves(game.board(), Color::Dark);
        assert!(!replies.is_empty());
        for (_, dest) in replies {
            assert_ne!(square_file(dest), 4);
        }
    }

    #[test]
    fn back_rank_mate_ends_the_game() {
        let mut game = custom(Color::Light, &["Kg1", "Ra1", "kg8", "pf7", "pg7", "ph7"]);
        play_all(&mut game, &[("a1", "a8")]);
        assert_eq!(
            game.result(),
            Some(GameResult::Checkmate {
                winner: Color::Light
            })
        );
        assert_eq!(game.checked_king_square(), Some(sq("g8")));
        assert_eq!(
            game.select_square(sq("g8")),
            InputOutcome::Ignored(IgnoreReason::GameOver)
        );
        assert_eq!(game.undo(), InputOutcome::Ignored(IgnoreReason::GameOver));
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::default();
        play_all(
            &mut game,
            &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
        );
        assert_eq!(
            game.result(),
            Some(GameResult::Checkmate {
                winner: Color::Dark
            })
        );
        assert_eq!(game.history().notation(), ["f3", "e5", "g4", "Qh4"]);
    }

    #[test]
    fn no_moves_without_check_is_stalemate() {
        let mut game = custom(Color::Light, &["Kf7", "Qg5", "kh8"]);
        play_all(&mut game, &[("g5", "g6")]);
        assert_eq!(game.result(), Some(GameResult::Stalemate));
        assert_eq!(game.checked_king_square(), None);
    }

    #[test]
    fn custom_position_can_start_decided() {
        let game = custom(Color::Dark, &["Kf7", "Qg6", "kh8"]);
        assert_eq!(game.result(), Some(GameResult::Stalemate));
        assert_eq!(game.history().initial().result, Some(GameResult::Stalemate));
    }

    #[test]
    fn promotion_blocks_play_until_a_piece_is_chosen() {
        let mut game = custom(Color::Light, &["Ka1", "Pb7*", "kh8"]);
        assert_eq!(play(&mut game, "b7", "b8"), InputOutcome::AwaitingPromotion);
        assert_eq!(game.pending_promotion(), Some(Color::Light));
        assert_eq!(game.side_to_move(), Color::Light);

        assert_eq!(
            game.select_square(sq("a1")),
            InputOutcome::Ignored(IgnoreReason::PromotionPending)
        );
        assert_eq!(
            game.click(sq("h8")),
            InputOutcome::Ignored(IgnoreReason::PromotionPending)
        );
        assert_eq!(
            game.choose_promotion(PieceKind::King),
            InputOutcome::Ignored(IgnoreReason::InvalidPromotionChoice)
        );
        assert_eq!(
            game.choose_promotion(PieceKind::Pawn),
            InputOutcome::Ignored(IgnoreReason::InvalidPromotionChoice)
        );

        let outcome = game.choose_promotion(PieceKind::Queen);
        let InputOutcome::Moved(record) = outcome else {
            panic!("promotion should complete, got {outcome:?}");
        };
        assert_eq!(record.special, SpecialMove::Promotion(PieceKind::Queen));
        assert_eq!(game.pending_promotion(), None);
        assert_eq!(
            game.board().piece_at(sq("b8")).map(|p| p.kind),
            Some(PieceKind::Queen)
        );
        assert_eq!(game.side_to_move(), Color::Dark);
        assert_eq!(game.checked_king_square(), Some(sq("h8")));
        assert_eq!(game.history().notation(), ["b8=Q"]);
        assert_eq!(
            game.choose_promotion(PieceKind::Rook),
            InputOutcome::Ignored(IgnoreReason::NoPromotionPending)
        );
    }

    #[test]
    fn undo_cancels_a_pending_promotion() {
        let mut game = custom(Color::Light, &["Ka1", "Pb7*", "kh8", "rc8"]);
        let before = game.snapshot();
        assert_eq!(play(&mut game, "b7", "c8"), InputOutcome::AwaitingPromotion);
        assert_eq!(game.captured().of(Color::Dark).len(), 1);

        assert_eq!(game.undo(), InputOutcome::PromotionCancelled);
        assert_eq!(game.snapshot(), before);
        assert!(game.captured().of(Color::Dark).is_empty());
        assert_eq!(game.pending_promotion(), None);
        assert_eq!(game.history().len(), 1);
    }

    /// Promotion with capture pending on c8, after one move each so the
    /// clocks are running.
    fn promotion_pending_after_capture(config: GameConfig) -> Game {
        let board = Board::from_layout(Color::Light, &["Ka1", "Pb7*", "kh8", "rc8", "pa7"])
            .expect("layout should parse");
        let mut game = Game::from_board(board, config).expect("game should start");
        play_all(&mut game, &[("a1", "b1"), ("a7", "a6")]);
        assert_eq!(play(&mut game, "b7", "c8"), InputOutcome::AwaitingPromotion);
        assert_eq!(game.captured().of(Color::Dark).len(), 1);
        game
    }

    fn assert_back_at_last_completed_move(game: &Game) {
        let top = *game.history().top();
        assert_eq!(game.board(), &top.board);
        assert_eq!(game.pending_promotion(), None);
        assert_eq!(
            game.board().piece_at(sq("c8")).map(|p| (p.color, p.kind)),
            Some((Color::Dark, PieceKind::Rook))
        );
        assert_eq!(
            game.board().piece_at(sq("b7")).map(|p| p.kind),
            Some(PieceKind::Pawn)
        );
        assert!(game.captured().of(Color::Dark).is_empty());
        assert_eq!(game.captured().lens(), top.captured_lens);
        assert_eq!(game.history().notation(), ["Kb1", "a6"]);
    }

    #[test]
    fn flag_falling_mid_promotion_takes_the_pawn_move_back() {
        let config = GameConfig::new(1, 0).expect("one minute is valid");
        let mut game = promotion_pending_after_capture(config);

        assert_eq!(
            game.tick(TimeDelta::seconds(120)),
            Some(GameResult::TimeForfeit {
                winner: Color::Dark
            })
        );
        assert_back_at_last_completed_move(&game);
        assert_eq!(game.clock().remaining(Color::Light), TimeDelta::zero());
        assert_eq!(game.board().side_to_move, Color::Light);
    }

    #[test]
    fn quitting_mid_promotion_takes_the_pawn_move_back() {
        let mut game = promotion_pending_after_capture(GameConfig::default());

        assert_eq!(game.quit(), InputOutcome::Abandoned);
        assert_eq!(game.result(), Some(GameResult::Abandoned));
        assert_back_at_last_completed_move(&game);
        assert_eq!(
            game.choose_promotion(PieceKind::Queen),
            InputOutcome::Ignored(IgnoreReason::GameOver)
        );
    }

    #[test]
    fn new_rejects_an_invalid_config() {
        let zero_clock = GameConfig {
            clock_time: TimeDelta::zero(),
            ..GameConfig::default()
        };
        assert!(matches!(
            Game::new(zero_clock),
            Err(ChessError::InvalidConfig(_))
        ));
        assert!(Game::new(GameConfig::default()).is_ok());
    }

    #[test]
    fn undo_after_first_move_restores_setup_exactly() {
        let mut game = Game::default();
        assert_eq!(game.undo(), InputOutcome::Ignored(IgnoreReason::NothingToUndo));

        // Frozen clock: nothing is charged before the first move.
        game.tick(TimeDelta::seconds(3));
        play_all(&mut game, &[("e2", "e4")]);
        assert!(game.clock().is_started());
        game.tick(TimeDelta::seconds(2));
        assert_eq!(
            game.clock().remaining(Color::Dark),
            TimeDelta::minutes(10) - TimeDelta::seconds(2)
        );

        game.select_square(sq("e7"));
        assert_eq!(game.undo(), InputOutcome::Undone);
        assert_eq!(game.snapshot(), *game.history().initial());
        assert_eq!(game.board(), &Board::new_game());
        assert_eq!(game.selected_piece(), None);
        assert!(!game.clock().is_started());
        assert!(game.history().notation().is_empty());
    }

    #[test]
    fn undo_restores_captures_and_notation() {
        let mut game = Game::default();
        play_all(&mut game, &[("e2", "e4"), ("d7", "d5"), ("e4", "d5")]);
        assert_eq!(game.captured().of(Color::Dark).len(), 1);
        let after_two = game.history().len() - 1;

        assert_eq!(game.undo(), InputOutcome::Undone);
        assert_eq!(game.history().len(), after_two);
        assert!(game.captured().of(Color::Dark).is_empty());
        assert_eq!(game.history().notation(), ["e4", "d5"]);
        assert_eq!(game.side_to_move(), Color::Light);
    }

    #[test]
    fn flag_falls_even_with_legal_moves_left() {
        let config = GameConfig::new(1, 0).expect("one minute is valid");
        let mut game = Game::new(config).expect("config is valid");
        play_all(&mut game, &[("e2", "e4")]);
        assert_eq!(game.tick(TimeDelta::seconds(59)), None);
        assert_eq!(
            game.tick(TimeDelta::seconds(1)),
            Some(GameResult::TimeForfeit {
                winner: Color::Light
            })
        );
        assert!(has_any_legal_move(game.board(), Color::Dark));
        assert_eq!(game.clock().remaining(Color::Dark), TimeDelta::zero());
        assert_eq!(game.tick(TimeDelta::seconds(1)), None);
        assert_eq!(
            game.click(sq("e7")),
            InputOutcome::Ignored(IgnoreReason::GameOver)
        );
    }

    #[test]
    fn increment_is_credited_to_the_mover() {
        let config = GameConfig::new(3, 2).expect("3+2 is valid");
        let mut game = Game::new(config).expect("config is valid");
        play_all(&mut game, &[("e2", "e4")]);
        game.tick(TimeDelta::seconds(5));
        play_all(&mut game, &[("e7", "e5")]);
        assert_eq!(
            game.clock().remaining(Color::Light),
            TimeDelta::minutes(3) + TimeDelta::seconds(2)
        );
        assert_eq!(
            game.clock().remaining(Color::Dark),
            TimeDelta::minutes(3) - TimeDelta::seconds(3)
        );
    }

    #[test]
    fn quit_abandons_an_active_game_once() {
        let mut game = Game::default();
        assert_eq!(game.quit(), InputOutcome::Abandoned);
        assert_eq!(game.result(), Some(GameResult::Abandoned));
        assert_eq!(game.quit(), InputOutcome::Ignored(IgnoreReason::GameOver));
    }

    /// Play up to `plies` random moves that keep the game going.
    fn random_playout(game: &mut Game, rng: &mut StdRng, plies: usize) -> usize {
        let mut played = 0;
        while played < plies {
            let board = *game.board();
            let mut candidates = legal_moves(&board, board.side_to_move);
            candidates.shuffle(rng);
            let kind = *PROMOTION_CHOICES.choose(rng).expect("choices are not empty");

            let keeps_going = candidates.into_iter().find(|&(id, dest)| {
                apply_move(&board, ChessMove::promoting(id, dest, kind)).is_some_and(|next| {
                    has_any_legal_move(&next.board, next.board.side_to_move)
                })
            });
            let Some((id, dest)) = keeps_going else {
                break;
            };

            let from = board.piece(id).expect("candidate piece is live").square;
            assert!(matches!(game.click(from), InputOutcome::Selected { .. }));
            match game.click(dest) {
                InputOutcome::Moved(_) => {}
                InputOutcome::AwaitingPromotion => {
                    assert!(matches!(game.choose_promotion(kind), InputOutcome::Moved(_)));
                }
                other => panic!("random move should be played, got {other:?}"),
            }
            assert!(game.is_active());
            played += 1;
        }
        played
    }

    #[test]
    fn n_moves_then_n_undos_round_trip_to_setup() {
        for seed in 0..4u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = Game::default();
            let initial = *game.history().initial();

            let played = random_playout(&mut game, &mut rng, 40);
            assert_eq!(game.history().len(), played + 1);

            for _ in 0..played {
                assert_eq!(game.undo(), InputOutcome::Undone);
            }
            assert_eq!(game.snapshot(), initial);
            assert_eq!(game.undo(), InputOutcome::Ignored(IgnoreReason::NothingToUndo));
        }
    }

    #[test]
    fn every_snapshot_matches_the_state_it_was_taken_from() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = Game::default();
        let mut seen = vec![game.snapshot()];
        for _ in 0..20 {
            if random_playout(&mut game, &mut rng, 1) == 0 {
                break;
            }
            game.tick(TimeDelta::milliseconds(250));
            seen.push(*game.history().top());
        }
        seen.pop();
        while let Some(expected) = seen.pop() {
            if game.undo() != InputOutcome::Undone {
                break;
            }
            assert_eq!(game.snapshot(), expected);
        }
    }
}
