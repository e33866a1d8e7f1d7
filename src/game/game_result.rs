use std::fmt;

use crate::game_state::chess_types::Color;

/// Terminal outcome of a game. A game with no result is still active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Checkmate { winner: Color },
    Stalemate,
    TimeForfeit { winner: Color },
    Abandoned,
}

impl GameResult {
    #[inline]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::Checkmate { winner } | GameResult::TimeForfeit { winner } => Some(winner),
            GameResult::Stalemate | GameResult::Abandoned => None,
        }
    }

    #[inline]
    pub const fn is_draw(self) -> bool {
        matches!(self, GameResult::Stalemate)
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Checkmate { winner } => write!(f, "checkmate, {} wins", winner.name()),
            GameResult::Stalemate => f.write_str("stalemate, draw"),
            GameResult::TimeForfeit { winner } => {
                write!(f, "{} ran out of time, {} wins", winner.opposite().name(), winner.name())
            }
            GameResult::Abandoned => f.write_str("game abandoned"),
        }
    }
}
