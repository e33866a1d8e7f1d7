//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g. `e4`) and square
//! indexes, for notation, layouts and the terminal host.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquareName(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquareName(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> ChessResult<String> {
    if square > 63 {
        return Err(ChessError::SquareOutOfBounds(square));
    }

    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);

    Ok(format!("{file_char}{rank_char}"))
}

/// Infallible variant for squares already known to be on the board.
#[inline]
pub(crate) fn square_name(square: Square) -> String {
    square_to_algebraic(square).unwrap_or_else(|_| "??".to_owned())
}
