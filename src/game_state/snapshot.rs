use crate::game::clock::ChessClock;
use crate::game::game_result::GameResult;
use crate::game_state::board::Board;

/// Everything needed to restore play at one point of a game.
///
/// The board carries pieces, moved flags, the side to move and the last move.
/// Move text and captured lists are append-only between snapshots, so only
/// their lengths are stored. The whole struct is a plain copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub notation_len: usize,
    pub captured_lens: [usize; 2],
    pub clock: ChessClock,
    pub result: Option<GameResult>,
}
