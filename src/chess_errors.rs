//! Errors used at the construction boundary of the crate.
//!
//! Rule evaluation and the game state machine never fail: an illegal intent is
//! a no-op. `ChessError` only covers inputs that arrive from outside a running
//! game, such as square names, custom board layouts and configuration.
//!
//! - Parsing variants (`InvalidSquareName`, `InvalidLayoutToken`) are
//!   recoverable and suitable for showing to a user.
//! - Layout variants (`SquareOccupied`, `MissingKing`, ...) reject positions
//!   that would break the board invariants before a game can start.
//! - `SessionClosed` and `SessionPanicked` come from a game loop running on a
//!   worker thread that has gone away.

use crate::game_state::chess_types::{Color, Square};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// A square name was not a file letter followed by a rank digit.
    #[error("invalid square name: {0:?}")]
    InvalidSquareName(String),

    /// A square index outside `0..=63`.
    #[error("square index out of bounds: {0}")]
    SquareOutOfBounds(Square),

    /// A layout entry such as `Ke1` could not be parsed.
    #[error("invalid layout token: {0:?}")]
    InvalidLayoutToken(String),

    /// Two pieces were placed on the same square.
    #[error("square {0} is already occupied")]
    SquareOccupied(Square),

    /// More pieces than a board has slots for.
    #[error("too many pieces on the board (max {max})")]
    TooManyPieces { max: usize },

    /// A side has no king.
    #[error("{} has no king", .0.name())]
    MissingKing(Color),

    /// A side has more than one king.
    #[error("{} has more than one king", .0.name())]
    DuplicateKing(Color),

    /// The side not to move is already in check.
    #[error("{} is in check but it is not their turn", .0.name())]
    OpponentInCheck(Color),

    /// A game configuration value was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The session worker is no longer listening.
    #[error("game session has stopped")]
    SessionClosed,

    /// The session worker thread panicked.
    #[error("game session worker panicked")]
    SessionPanicked,
}

pub type ChessResult<T> = Result<T, ChessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_side() {
        assert_eq!(
            ChessError::MissingKing(Color::Dark).to_string(),
            "black has no king"
        );
        assert_eq!(
            ChessError::InvalidSquareName("z9".to_owned()).to_string(),
            "invalid square name: \"z9\""
        );
    }
}
