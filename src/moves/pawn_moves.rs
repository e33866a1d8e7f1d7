use crate::game_state::chess_types::{square_delta, Color, Square};

/// True when a pawn of `color` on `from` attacks `to`: one of the two diagonal
/// squares one rank toward the opponent. Pawns never attack straight ahead.
#[inline]
pub const fn pawn_attacks_square(color: Color, from: Square, to: Square) -> bool {
    let (df, dr) = square_delta(from, to);
    dr == color.pawn_direction() && df.abs() == 1
}

/// True for a single forward step.
#[inline]
pub const fn is_single_push(color: Color, from: Square, to: Square) -> bool {
    let (df, dr) = square_delta(from, to);
    df == 0 && dr == color.pawn_direction()
}

/// True for a double forward step, regardless of the starting rank.
#[inline]
pub const fn is_double_push(color: Color, from: Square, to: Square) -> bool {
    let (df, dr) = square_delta(from, to);
    df == 0 && dr == 2 * color.pawn_direction()
}
