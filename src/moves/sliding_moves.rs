//! Line movement shared by bishops, rooks and queens.
//!
//! Both the attack detector and the legality evaluator reach a square along a
//! line the same way: check the alignment for the piece kind, then walk every
//! intermediate square and stop at the first blocker.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{square_at, square_delta, square_file, square_rank};
use crate::game_state::chess_types::{PieceKind, Square};

/// True when `from -> to` lies on a line the slider kind moves along.
/// Non-sliders and zero-length moves are never aligned.
#[inline]
pub fn is_aligned(kind: PieceKind, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let (df, dr) = square_delta(from, to);
    let straight = df == 0 || dr == 0;
    let diagonal = df.abs() == dr.abs();
    match kind {
        PieceKind::Rook => straight,
        PieceKind::Bishop => diagonal,
        PieceKind::Queen => straight || diagonal,
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => false,
    }
}

/// True when every square strictly between `from` and `to` is empty.
/// The caller guarantees the two squares are on one line.
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (df, dr) = square_delta(from, to);
    let (step_f, step_r) = (df.signum(), dr.signum());

    let mut file = square_file(from) + step_f;
    let mut rank = square_rank(from) + step_r;
    while let Some(square) = square_at(file, rank) {
        if square == to {
            return true;
        }
        if !board.is_empty(square) {
            return false;
        }
        file += step_f;
        rank += step_r;
    }

    // Walked off the board without meeting `to`: not on one line.
    false
}

/// Alignment plus a clear path.
#[inline]
pub fn slider_reaches(board: &Board, kind: PieceKind, from: Square, to: Square) -> bool {
    is_aligned(kind, from, to) && is_path_clear(board, from, to)
}
