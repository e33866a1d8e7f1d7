//! Pseudo-legal move checks.
//!
//! A destination is pseudo-legal when it obeys the movement and occupancy rules
//! of the piece. Whether the move would leave the mover's king attacked is a
//! separate question answered by simulation in `legal_move_apply`.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KING_SIDE_ROOK_FILE, QUEEN_SIDE_ROOK_FILE};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::king_moves::{is_castling_shape, king_reaches};
use crate::moves::knight_moves::knight_reaches;
use crate::moves::pawn_moves::{is_double_push, is_single_push, pawn_attacks_square};
use crate::moves::sliding_moves::slider_reaches;

/// True when the piece `id` may move to `dest` by its movement rules.
///
/// Rejects off-board destinations, friendly-occupied squares and the enemy
/// king's square for every piece kind.
pub fn is_pseudo_legal(board: &Board, id: PieceId, dest: Square) -> bool {
    let Some(piece) = board.piece(id) else {
        return false;
    };
    if !is_on_board(dest) || dest == piece.square {
        return false;
    }
    if let Some(target) = board.piece_at(dest) {
        if target.color == piece.color || target.kind == PieceKind::King {
            return false;
        }
    }

    match piece.kind {
        PieceKind::Pawn => is_pseudo_legal_pawn(board, piece, dest),
        PieceKind::Knight => knight_reaches(piece.square, dest),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            slider_reaches(board, piece.kind, piece.square, dest)
        }
        PieceKind::King => {
            king_reaches(piece.square, dest) || is_castling_available(board, piece, dest)
        }
    }
}

fn is_pseudo_legal_pawn(board: &Board, pawn: &Piece, dest: Square) -> bool {
    let color = pawn.color;
    let from = pawn.square;

    if is_single_push(color, from, dest) {
        return board.is_empty(dest);
    }

    if is_double_push(color, from, dest) {
        if pawn.has_moved || pawn.rank() != color.pawn_start_rank() {
            return false;
        }
        let Some(between) = square_at(pawn.file(), pawn.rank() + color.pawn_direction()) else {
            return false;
        };
        return board.is_empty(between) && board.is_empty(dest);
    }

    if pawn_attacks_square(color, from, dest) {
        return match board.color_at(dest) {
            Some(target) => target != color,
            None => is_en_passant_capture(board, pawn, dest),
        };
    }

    false
}

/// En passant onto the empty `dest`: our pawn is on its fifth rank and the
/// last move was an enemy pawn double step that landed right beside it on
/// the destination file.
fn is_en_passant_capture(board: &Board, pawn: &Piece, dest: Square) -> bool {
    if pawn.rank() != pawn.color.en_passant_rank() {
        return false;
    }
    let Some(last) = board.last_move else {
        return false;
    };
    last.is_double_pawn_step()
        && last.color != pawn.color
        && square_rank(last.to) == pawn.rank()
        && square_file(last.to) == square_file(dest)
        && board
            .piece_at(last.to)
            .is_some_and(|p| p.kind == PieceKind::Pawn && p.color != pawn.color)
}

/// Castling preconditions, probed on the board before the move.
fn is_castling_available(board: &Board, king: &Piece, dest: Square) -> bool {
    if king.has_moved || !is_castling_shape(king.square, dest) {
        return false;
    }

    let king_side = square_file(dest) > king.file();
    let rook_file = if king_side {
        KING_SIDE_ROOK_FILE
    } else {
        QUEEN_SIDE_ROOK_FILE
    };
    let Some(rook_sq) = square_at(rook_file, king.rank()) else {
        return false;
    };
    let rook_ready = board.piece_at(rook_sq).is_some_and(|rook| {
        rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
    });
    if !rook_ready {
        return false;
    }

    let (low, high) = if king_side {
        (king.file() + 1, rook_file)
    } else {
        (rook_file + 1, king.file())
    };
    let path_empty = (low..high)
        .filter_map(|file| square_at(file, king.rank()))
        .all(|sq| board.is_empty(sq));
    if !path_empty {
        return false;
    }

    let step = if king_side { 1 } else { -1 };
    let Some(transit) = square_at(king.file() + step, king.rank()) else {
        return false;
    };
    [king.square, transit, dest]
        .into_iter()
        .all(|sq| !is_square_attacked(board, sq, king.color))
}
