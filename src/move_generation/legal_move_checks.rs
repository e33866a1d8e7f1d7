//! Attack detection.
//!
//! Every question of the form "is this square attacked" is answered against the
//! board exactly as it stands. Callers that need to ask about a hypothetical
//! position apply the move to a copy first (see `legal_move_apply`).

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::king_moves::king_reaches;
use crate::moves::knight_moves::knight_reaches;
use crate::moves::pawn_moves::pawn_attacks_square;
use crate::moves::sliding_moves::{is_aligned, is_path_clear};

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board
        .pieces_of(color)
        .find(|(_, p)| p.kind == PieceKind::King)
        .map(|(_, p)| p.square)
}

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color)
}

/// True when `piece` attacks `square` on `board`.
#[inline]
pub fn piece_attacks_square(board: &Board, piece: &Piece, square: Square) -> bool {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks_square(piece.color, piece.square, square),
        PieceKind::Knight => knight_reaches(piece.square, square),
        PieceKind::King => king_reaches(piece.square, square),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            // Wrong alignment is rejected before any scan.
            is_aligned(piece.kind, piece.square, square)
                && is_path_clear(board, piece.square, square)
        }
    }
}

/// True when any live piece of the opponent of `defending_color` attacks `square`.
pub fn is_square_attacked(board: &Board, square: Square, defending_color: Color) -> bool {
    board
        .pieces_of(defending_color.opposite())
        .any(|(_, attacker)| piece_attacks_square(board, attacker, square))
}

/// Every enemy piece attacking `square`, with its id.
pub fn attackers_to_square(
    board: &Board,
    square: Square,
    defending_color: Color,
) -> Vec<(PieceId, PieceKind)> {
    board
        .pieces_of(defending_color.opposite())
        .filter(|(_, attacker)| piece_attacks_square(board, attacker, square))
        .map(|(id, attacker)| (id, attacker.kind))
        .collect()
}
