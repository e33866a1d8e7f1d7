//! Full legal move generation.
//!
//! A move is legal when it is pseudo-legal and the simulated position does not
//! leave the mover's king attacked. Generation scans all 64 destinations for
//! each piece, which is small enough for interactive play and keeps one code
//! path for highlighting, "any legal move" queries and perft.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::PROMOTION_CHOICES;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{leaves_own_king_in_check, ChessMove};
use crate::move_generation::pseudo_legal::is_pseudo_legal;

/// Pseudo-legal and check-safe.
#[inline]
pub fn is_legal(board: &Board, piece: PieceId, dest: Square) -> bool {
    is_pseudo_legal(board, piece, dest) && !leaves_own_king_in_check(board, piece, dest)
}

/// Every legal destination of one piece, ascending by square.
pub fn legal_destinations(board: &Board, piece: PieceId) -> Vec<Square> {
    (0..64u8)
        .filter(|&dest| is_legal(board, piece, dest))
        .collect()
}

/// Every legal `(piece, destination)` pair for `color`. Promotions appear once;
/// the piece is chosen afterwards.
pub fn legal_moves(board: &Board, color: Color) -> Vec<(PieceId, Square)> {
    let mut moves = Vec::with_capacity(64);
    for (id, _) in board.pieces_of(color) {
        moves.extend(legal_destinations(board, id).into_iter().map(|dest| (id, dest)));
    }
    moves
}

/// Legal moves of `color` with each promotion expanded into the four choices.
pub fn expanded_legal_moves(board: &Board, color: Color) -> Vec<ChessMove> {
    let mut moves = Vec::with_capacity(64);
    for (id, dest) in legal_moves(board, color) {
        let promotes = board.piece(id).is_some_and(|p| {
            p.kind == PieceKind::Pawn && square_rank(dest) == p.color.promotion_rank()
        });
        if promotes {
            moves.extend(
                PROMOTION_CHOICES
                    .iter()
                    .map(|&kind| ChessMove::promoting(id, dest, kind)),
            );
        } else {
            moves.push(ChessMove::new(id, dest));
        }
    }
    moves
}

/// True as soon as one legal move for `color` is found.
pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(id, _)| (0..64u8).any(|dest| is_legal(board, id, dest)))
}
