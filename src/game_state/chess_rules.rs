//! Canonical chess-rule constants.
//!
//! Static rule literals used to set up the standard starting position and to
//! constrain promotion choices.

use crate::game_state::chess_types::PieceKind;

/// Back-rank order from the a-file to the h-file.
pub const BACK_RANK_ORDER: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece kinds a pawn may promote to, in the order they are offered.
pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Files of the rooks a king castles with (queen side, king side).
pub const QUEEN_SIDE_ROOK_FILE: i8 = 0;
pub const KING_SIDE_ROOK_FILE: i8 = 7;

/// Default per-side clock in minutes.
pub const DEFAULT_CLOCK_MINUTES: i64 = 10;

#[inline]
pub fn is_promotion_choice(kind: PieceKind) -> bool {
    PROMOTION_CHOICES.contains(&kind)
}
