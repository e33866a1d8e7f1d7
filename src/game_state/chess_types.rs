//! Core value types shared by the board, the rules and the state machine.
//!
//! Squares are plain indexes (`0 == a1`, `7 == h1`, `63 == h8`) so boards and
//! snapshots stay small `Copy` structs.

/// Side to move. `Light` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank delta of a forward pawn step.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// Rank index pawns of this color start on.
    #[inline]
    pub const fn pawn_start_rank(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }

    /// Rank index a pawn of this color promotes on.
    #[inline]
    pub const fn promotion_rank(self) -> i8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    /// Rank index a pawn must stand on to capture en passant.
    #[inline]
    pub const fn en_passant_rank(self) -> i8 {
        match self {
            Color::Light => 4,
            Color::Dark => 3,
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Light => "white",
            Color::Dark => "black",
        }
    }
}

/// Piece kind (color is stored separately on [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Notation prefix. Pawns have none.
    #[inline]
    pub const fn notation_letter(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }

    /// Parse a piece letter, case-insensitive. `P` is accepted for pawns.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Board square index (`0..=63`).
pub type Square = u8;

/// Stable handle of a piece for the lifetime of a game.
pub type PieceId = u8;

/// Number of piece slots on a board; a legal game never exceeds the 32
/// starting pieces.
pub const MAX_PIECES: usize = 32;

#[inline]
pub const fn square_file(square: Square) -> i8 {
    (square % 8) as i8
}

#[inline]
pub const fn square_rank(square: Square) -> i8 {
    (square / 8) as i8
}

/// Build a square from signed file/rank coordinates; `None` when off-board.
#[inline]
pub const fn square_at(file: i8, rank: i8) -> Option<Square> {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        None
    } else {
        Some((rank * 8 + file) as Square)
    }
}

/// `(file delta, rank delta)` from `from` to `to`.
#[inline]
pub const fn square_delta(from: Square, to: Square) -> (i8, i8) {
    (
        square_file(to) - square_file(from),
        square_rank(to) - square_rank(from),
    )
}

#[inline]
pub const fn is_on_board(square: Square) -> bool {
    square < 64
}

/// A piece record: identity, owner, location and the moved flag needed for
/// castling and pawn double steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
            has_moved: false,
        }
    }

    #[inline]
    pub const fn file(&self) -> i8 {
        square_file(self.square)
    }

    #[inline]
    pub const fn rank(&self) -> i8 {
        square_rank(self.square)
    }
}
