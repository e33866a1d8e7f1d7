use crate::game_state::chess_types::*;

/// Special-move tag carried by a [`MoveRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialMove {
    None,
    Castle,
    EnPassant,
    Promotion(PieceKind),
}

/// One applied move. Read back on the following turn for en passant
/// eligibility and by the history for notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub color: Color,
    pub captured: Option<Piece>,
    pub special: SpecialMove,
}

impl MoveRecord {
    /// True when this was a pawn advancing two ranks.
    #[inline]
    pub fn is_double_pawn_step(&self) -> bool {
        self.piece == PieceKind::Pawn
            && self.from % 8 == self.to % 8
            && (square_rank(self.to) - square_rank(self.from)).abs() == 2
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}
