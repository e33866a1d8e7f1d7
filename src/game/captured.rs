use crate::game_state::chess_types::{Color, Piece};

/// Pieces taken off the board, grouped by the color of the captured piece.
///
/// Both lists only ever grow during play, so a snapshot stores their lengths
/// and undo truncates back to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedPieces {
    lists: [Vec<Piece>; 2],
}

impl CapturedPieces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, piece: Piece) {
        self.lists[piece.color.index()].push(piece);
    }

    /// Captured pieces of `color`, oldest first.
    #[inline]
    pub fn of(&self, color: Color) -> &[Piece] {
        &self.lists[color.index()]
    }

    #[inline]
    pub fn lens(&self) -> [usize; 2] {
        [self.lists[0].len(), self.lists[1].len()]
    }

    pub fn truncate(&mut self, lens: [usize; 2]) {
        for (list, len) in self.lists.iter_mut().zip(lens) {
            list.truncate(len);
        }
    }
}
