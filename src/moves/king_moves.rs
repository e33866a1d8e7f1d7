//! King step patterns.
//!
//! Castling is not a movement pattern; it is evaluated with the full board in
//! `move_generation::pseudo_legal`.

use crate::game_state::chess_types::{square_delta, Square};

/// True when `to` is adjacent to `from`. A square is not adjacent to itself.
#[inline]
pub const fn king_reaches(from: Square, to: Square) -> bool {
    let (df, dr) = square_delta(from, to);
    from != to && df.abs() <= 1 && dr.abs() <= 1
}

/// True for a two-file shift along the king's own rank.
#[inline]
pub const fn is_castling_shape(from: Square, to: Square) -> bool {
    let (df, dr) = square_delta(from, to);
    dr == 0 && df.abs() == 2
}
