//! Authoritative board representation.
//!
//! `Board` stores up to 32 piece records in fixed slots (the slot index is the
//! piece's stable [`PieceId`]) plus a derived `square -> PieceId` mailbox, the
//! side to move and the last applied move. Everything is inline arrays, so a
//! board is `Copy` and cloning it for a simulated move or a snapshot is a plain
//! memory copy.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::BACK_RANK_ORDER;
use crate::game_state::chess_types::*;
use crate::game_state::move_record::MoveRecord;
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    slots: [Option<Piece>; MAX_PIECES],
    mailbox: [Option<PieceId>; 64],
    pub side_to_move: Color,
    pub last_move: Option<MoveRecord>,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(Color::Light)
    }
}

impl Board {
    /// A board with no pieces.
    pub fn empty(side_to_move: Color) -> Self {
        Self {
            slots: [None; MAX_PIECES],
            mailbox: [None; 64],
            side_to_move,
            last_move: None,
        }
    }

    /// The standard 32-piece starting position, light to move.
    pub fn new_game() -> Self {
        let mut board = Self::empty(Color::Light);
        let mut slot = 0usize;
        for (file, kind) in BACK_RANK_ORDER.iter().enumerate() {
            let file = file as i8;
            for (color, rank, kind) in [
                (Color::Light, 0, *kind),
                (Color::Light, 1, PieceKind::Pawn),
                (Color::Dark, 6, PieceKind::Pawn),
                (Color::Dark, 7, *kind),
            ] {
                // Every coordinate here is on the board.
                let square = (rank * 8 + file) as Square;
                board.slots[slot] = Some(Piece::new(kind, color, square));
                board.mailbox[square as usize] = Some(slot as PieceId);
                slot += 1;
            }
        }
        board
    }

    /// Build a position from tokens such as `"Ke1"` or `"pd7"`.
    ///
    /// Uppercase letters are light pieces, lowercase are dark. A trailing `*`
    /// marks the piece as already moved (no castling, no pawn double step).
    /// The result is validated: one king per side, distinct squares, and the
    /// side not to move is not in check.
    pub fn from_layout(side_to_move: Color, tokens: &[&str]) -> ChessResult<Self> {
        let mut board = Self::empty(side_to_move);
        for token in tokens {
            let piece = parse_layout_token(token)?;
            board.place(piece)?;
        }
        board.validate()?;
        Ok(board)
    }

    /// Put a piece in the first free slot.
    pub fn place(&mut self, piece: Piece) -> ChessResult<PieceId> {
        if !is_on_board(piece.square) {
            return Err(ChessError::SquareOutOfBounds(piece.square));
        }
        if self.mailbox[piece.square as usize].is_some() {
            return Err(ChessError::SquareOccupied(piece.square));
        }
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(ChessError::TooManyPieces { max: MAX_PIECES })?;
        self.slots[slot] = Some(piece);
        self.mailbox[piece.square as usize] = Some(slot as PieceId);
        Ok(slot as PieceId)
    }

    /// Check the structural invariants a game relies on.
    pub fn validate(&self) -> ChessResult<()> {
        for color in [Color::Light, Color::Dark] {
            let kings = self
                .pieces_of(color)
                .filter(|(_, p)| p.kind == PieceKind::King)
                .count();
            match kings {
                0 => return Err(ChessError::MissingKing(color)),
                1 => {}
                _ => return Err(ChessError::DuplicateKing(color)),
            }
        }

        let waiting = self.side_to_move.opposite();
        if crate::move_generation::legal_move_checks::is_king_in_check(self, waiting) {
            return Err(ChessError::OpponentInCheck(waiting));
        }
        Ok(())
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    #[inline]
    pub fn id_at(&self, square: Square) -> Option<PieceId> {
        if !is_on_board(square) {
            return None;
        }
        self.mailbox[square as usize]
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.id_at(square).and_then(|id| self.piece(id))
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.id_at(square).is_none()
    }

    #[inline]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|p| p.color)
    }

    /// All live pieces with their ids, in slot order.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|p| (id as PieceId, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn piece_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Move a live piece to an empty square and mark it moved.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Square) {
        let Some(piece) = self.slots[id as usize].as_mut() else {
            debug_assert!(false, "relocating an empty slot {id}");
            return;
        };
        debug_assert!(self.mailbox[to as usize].is_none(), "destination occupied");
        self.mailbox[piece.square as usize] = None;
        piece.square = to;
        piece.has_moved = true;
        self.mailbox[to as usize] = Some(id);
    }

    /// Take a piece off the board and hand back its record.
    pub(crate) fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let piece = self.slots[id as usize].take()?;
        self.mailbox[piece.square as usize] = None;
        Some(piece)
    }

    pub(crate) fn set_kind(&mut self, id: PieceId, kind: PieceKind) {
        if let Some(piece) = self.slots[id as usize].as_mut() {
            piece.kind = kind;
        }
    }
}

fn parse_layout_token(token: &str) -> ChessResult<Piece> {
    let invalid = || ChessError::InvalidLayoutToken(token.to_owned());
    let mut chars = token.trim().chars();
    let letter = chars.next().ok_or_else(invalid)?;
    let kind = PieceKind::from_letter(letter).ok_or_else(invalid)?;
    let color = if letter.is_ascii_uppercase() {
        Color::Light
    } else {
        Color::Dark
    };

    let rest: String = chars.collect();
    let (name, moved) = match rest.strip_suffix('*') {
        Some(name) => (name, true),
        None => (rest.as_str(), false),
    };
    let square = algebraic_to_square(name).map_err(|_| invalid())?;

    Ok(Piece {
        has_moved: moved,
        ..Piece::new(kind, color, square)
    })
}
