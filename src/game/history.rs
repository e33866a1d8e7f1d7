//! Snapshot stack and move notation.
//!
//! The stack always holds the position the game started from; every completed
//! move pushes one more snapshot. Undo discards the top and hands back the new
//! top for the caller to restore.

use crate::game_state::chess_types::PieceKind;
use crate::game_state::move_record::{MoveRecord, SpecialMove};
use crate::game_state::snapshot::GameSnapshot;
use crate::utils::algebraic::square_name;

#[derive(Debug, Clone)]
pub struct GameHistory {
    initial: GameSnapshot,
    later: Vec<GameSnapshot>,
    notation: Vec<String>,
}

impl GameHistory {
    pub fn new(initial: GameSnapshot) -> Self {
        Self {
            initial,
            later: Vec::new(),
            notation: Vec::new(),
        }
    }

    pub fn push(&mut self, snapshot: GameSnapshot) {
        self.later.push(snapshot);
    }

    #[inline]
    pub fn top(&self) -> &GameSnapshot {
        self.later.last().unwrap_or(&self.initial)
    }

    #[inline]
    pub fn initial(&self) -> &GameSnapshot {
        &self.initial
    }

    /// Number of snapshots, initial position included.
    #[inline]
    pub fn len(&self) -> usize {
        self.later.len() + 1
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.later.is_empty()
    }

    /// Drop the top snapshot and return the one now on top. `None` when only
    /// the initial snapshot is left.
    pub fn pop(&mut self) -> Option<GameSnapshot> {
        self.later.pop()?;
        Some(*self.top())
    }

    pub fn record_notation(&mut self, text: String) {
        self.notation.push(text);
    }

    #[inline]
    pub fn notation(&self) -> &[String] {
        &self.notation
    }

    /// The last `count` notation entries, oldest first.
    pub fn recent(&self, count: usize) -> &[String] {
        let start = self.notation.len().saturating_sub(count);
        &self.notation[start..]
    }

    pub fn truncate_notation(&mut self, len: usize) {
        self.notation.truncate(len);
    }
}

/// Short notation of a completed move: piece letter (none for pawns), `x` on
/// capture, destination square, and `=Q` style suffix for promotions.
pub fn move_notation(record: &MoveRecord) -> String {
    let mut text = String::with_capacity(6);
    text.push_str(record.piece.notation_letter());
    if record.is_capture() {
        text.push('x');
    }
    text.push_str(&square_name(record.to));
    if let SpecialMove::Promotion(kind) = record.special {
        debug_assert_ne!(kind, PieceKind::Pawn);
        text.push('=');
        text.push_str(kind.notation_letter());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::clock::ChessClock;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, Piece};
    use chrono::TimeDelta;

    fn snapshot(notation_len: usize) -> GameSnapshot {
        GameSnapshot {
            board: Board::new_game(),
            notation_len,
            captured_lens: [0, 0],
            clock: ChessClock::new(TimeDelta::minutes(10), TimeDelta::zero()),
            result: None,
        }
    }

    #[test]
    fn initial_snapshot_is_never_popped() {
        let mut history = GameHistory::new(snapshot(0));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert_eq!(history.pop(), None);
        assert_eq!(history.len(), 1);

        history.push(snapshot(1));
        history.push(snapshot(2));
        assert_eq!(history.top().notation_len, 2);
        assert_eq!(history.pop().map(|s| s.notation_len), Some(1));
        assert_eq!(history.pop().map(|s| s.notation_len), Some(0));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn recent_returns_the_tail() {
        let mut history = GameHistory::new(snapshot(0));
        for text in ["e4", "e5", "Nf3", "Nc6"] {
            history.record_notation(text.to_owned());
        }
        assert_eq!(history.recent(2), ["Nf3", "Nc6"]);
        assert_eq!(history.recent(10).len(), 4);
        history.truncate_notation(1);
        assert_eq!(history.notation(), ["e4"]);
    }

    #[test]
    fn notation_uses_letter_capture_mark_and_promotion_suffix() {
        let quiet = MoveRecord {
            from: 6,
            to: 21,
            piece: PieceKind::Knight,
            color: Color::Light,
            captured: None,
            special: SpecialMove::None,
        };
        assert_eq!(move_notation(&quiet), "Nf3");

        let pawn_takes = MoveRecord {
            from: 28,
            to: 43,
            piece: PieceKind::Pawn,
            captured: Some(Piece::new(PieceKind::Pawn, Color::Dark, 35)),
            special: SpecialMove::EnPassant,
            ..quiet
        };
        assert_eq!(move_notation(&pawn_takes), "xd6");

        let promotes = MoveRecord {
            from: 54,
            to: 63,
            piece: PieceKind::Pawn,
            captured: Some(Piece::new(PieceKind::Rook, Color::Dark, 63)),
            special: SpecialMove::Promotion(PieceKind::Queen),
            ..quiet
        };
        assert_eq!(move_notation(&promotes), "xh8=Q");
    }
}
