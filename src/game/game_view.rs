//! Owned per-frame view of a game for the rendering side.

use chrono::TimeDelta;

use crate::game::game::Game;
use crate::game::game_result::GameResult;
use crate::game_state::chess_rules::PROMOTION_CHOICES;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceView {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind,
            color: piece.color,
            square: piece.square,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub pieces: Vec<PieceView>,
    /// Captured pieces indexed by `Color::index` of the captured piece.
    pub captured: [Vec<PieceKind>; 2],
    pub selected: Option<Square>,
    pub legal_destinations: Vec<Square>,
    pub checked_king: Option<Square>,
    /// Origin and destination of the last move.
    pub last_move: Option<(Square, Square)>,
    pub recent_history: Vec<String>,
    pub clocks: [TimeDelta; 2],
    pub on_clock: Color,
    pub clock_running: bool,
    pub result: Option<GameResult>,
    pub pending_promotion: Option<Color>,
    /// Offered while a promotion is pending, empty otherwise.
    pub promotion_choices: Vec<PieceKind>,
}

impl GameView {
    pub fn from_game(game: &Game) -> Self {
        let board = game.board();
        let captured_kinds = |color: Color| {
            game.captured()
                .of(color)
                .iter()
                .map(|p| p.kind)
                .collect::<Vec<_>>()
        };
        let pending_promotion = game.pending_promotion();

        Self {
            pieces: board.pieces().map(|(_, p)| PieceView::from(p)).collect(),
            captured: [captured_kinds(Color::Light), captured_kinds(Color::Dark)],
            selected: game
                .selected_piece()
                .and_then(|id| board.piece(id))
                .map(|p| p.square),
            legal_destinations: game.legal_destinations().to_vec(),
            checked_king: game.checked_king_square(),
            last_move: board.last_move.map(|m| (m.from, m.to)),
            recent_history: game
                .history()
                .recent(game.config().history_lines)
                .to_vec(),
            clocks: [
                game.clock().remaining(Color::Light),
                game.clock().remaining(Color::Dark),
            ],
            on_clock: game.side_to_move(),
            clock_running: game.clock().is_started() && game.is_active(),
            result: game.result(),
            pending_promotion,
            promotion_choices: if pending_promotion.is_some() {
                PROMOTION_CHOICES.to_vec()
            } else {
                Vec::new()
            },
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<&PieceView> {
        self.pieces.iter().find(|p| p.square == square)
    }
}
