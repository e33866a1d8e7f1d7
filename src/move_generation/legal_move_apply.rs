//! Copy-and-apply move execution.
//!
//! `apply_move` never mutates its input: it returns a new board with the move
//! played, which serves both the check-safety simulation (apply, then ask the
//! attack detector) and the state machine itself.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KING_SIDE_ROOK_FILE, QUEEN_SIDE_ROOK_FILE};
use crate::game_state::chess_types::*;
use crate::game_state::move_record::{MoveRecord, SpecialMove};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::king_moves::is_castling_shape;

/// A move intent: which piece goes where, and the promotion piece if the
/// caller already knows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub piece: PieceId,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    #[inline]
    pub const fn new(piece: PieceId, to: Square) -> Self {
        Self {
            piece,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn promoting(piece: PieceId, to: Square, kind: PieceKind) -> Self {
        Self {
            piece,
            to,
            promotion: Some(kind),
        }
    }
}

/// Result of applying a move: the next board and the record of what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub board: Board,
    pub record: MoveRecord,
}

impl AppliedMove {
    /// True when a pawn reached the last rank and no promotion piece was given.
    #[inline]
    pub fn awaits_promotion(&self) -> bool {
        self.record.piece == PieceKind::Pawn
            && square_rank(self.record.to) == self.record.color.promotion_rank()
            && !matches!(self.record.special, SpecialMove::Promotion(_))
    }
}

/// Play `mv` on a copy of `board`.
///
/// The move must be pseudo-legal; this only performs the side effects:
/// capture (including the en passant victim beside the destination), the
/// castling rook jump, promotion when a piece is given, the moved flag, the
/// last-move record and the turn switch. Returns `None` when the piece id is
/// not on the board or the destination is off the board.
pub fn apply_move(board: &Board, mv: ChessMove) -> Option<AppliedMove> {
    if !is_on_board(mv.to) {
        return None;
    }
    let mover = *board.piece(mv.piece)?;
    let from = mover.square;
    let to = mv.to;

    let mut next = *board;
    let mut special = SpecialMove::None;

    let captured = if let Some(target) = next.id_at(to) {
        next.remove(target)
    } else if mover.kind == PieceKind::Pawn && square_file(from) != square_file(to) {
        // Diagonal pawn step onto an empty square: the victim sits beside us.
        special = SpecialMove::EnPassant;
        square_at(square_file(to), square_rank(from))
            .and_then(|victim_sq| next.id_at(victim_sq))
            .and_then(|victim| next.remove(victim))
    } else {
        None
    };

    next.relocate(mv.piece, to);

    if mover.kind == PieceKind::King && is_castling_shape(from, to) {
        special = SpecialMove::Castle;
        let king_side = square_file(to) > square_file(from);
        let rook_file = if king_side {
            KING_SIDE_ROOK_FILE
        } else {
            QUEEN_SIDE_ROOK_FILE
        };
        let step = if king_side { 1 } else { -1 };
        let rook = square_at(rook_file, mover.rank()).and_then(|sq| next.id_at(sq));
        let rook_to = square_at(mover.file() + step, mover.rank());
        if let (Some(rook), Some(rook_to)) = (rook, rook_to) {
            next.relocate(rook, rook_to);
        }
    }

    if mover.kind == PieceKind::Pawn && square_rank(to) == mover.color.promotion_rank() {
        if let Some(kind) = mv.promotion {
            next.set_kind(mv.piece, kind);
            special = SpecialMove::Promotion(kind);
        }
    }

    let record = MoveRecord {
        from,
        to,
        piece: mover.kind,
        color: mover.color,
        captured,
        special,
    };
    next.last_move = Some(record);
    next.side_to_move = mover.color.opposite();

    Some(AppliedMove {
        board: next,
        record,
    })
}

/// Simulate `piece -> dest` on a throwaway copy and report whether the
/// mover's own king is attacked afterwards.
pub fn leaves_own_king_in_check(board: &Board, piece: PieceId, dest: Square) -> bool {
    let Some(color) = board.piece(piece).map(|p| p.color) else {
        return true;
    };
    match apply_move(board, ChessMove::new(piece, dest)) {
        Some(applied) => is_king_in_check(&applied.board, color),
        None => true,
    }
}
