//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for debugging, tests, and the terminal
//! host.

use crate::game::clock::format_clock;
use crate::game::game_view::GameView;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_name;

/// Render the board to a Unicode string for terminal output.
///
/// Assumes square indexing where `0 == a1`, `7 == h1`, and `63 == h8`.
pub fn render_board(board: &Board) -> String {
    render_grid(|sq| board.piece_at(sq).map(|p| (p.color, p.kind)), |_| None)
}

/// Render a game view: the board with the selection, legal destinations and
/// a checked king marked, followed by clocks, captures and recent moves.
pub fn render_view(view: &GameView) -> String {
    let marker = |sq: Square| {
        if view.selected == Some(sq) {
            Some('(')
        } else if view.checked_king == Some(sq) {
            Some('!')
        } else if view.legal_destinations.contains(&sq) {
            Some('*')
        } else {
            None
        }
    };
    let mut out = render_grid(
        |sq| view.piece_at(sq).map(|p| (p.color, p.kind)),
        marker,
    );

    out.push('\n');
    for color in [Color::Light, Color::Dark] {
        let on_clock = if view.on_clock == color && view.result.is_none() {
            " <"
        } else {
            ""
        };
        let lost: String = view.captured[color.index()]
            .iter()
            .map(|&kind| piece_to_unicode(color, kind))
            .collect();
        out.push_str(&format!(
            "{:<6}{}{}  lost: {}\n",
            color.name(),
            format_clock(view.clocks[color.index()]),
            on_clock,
            lost
        ));
    }

    if let Some((from, to)) = view.last_move {
        out.push_str(&format!("last: {}-{}\n", square_name(from), square_name(to)));
    }
    if !view.recent_history.is_empty() {
        out.push_str("moves: ");
        out.push_str(&view.recent_history.join(" "));
        out.push('\n');
    }
    if let Some(color) = view.pending_promotion {
        let choices: Vec<&str> = view
            .promotion_choices
            .iter()
            .map(|kind| kind.notation_letter())
            .collect();
        out.push_str(&format!(
            "{} promotes, choose one of {}\n",
            color.name(),
            choices.join(" ")
        ));
    }
    if let Some(result) = view.result {
        out.push_str(&format!("result: {result}\n"));
    } else if view.checked_king.is_some() {
        out.push_str("check\n");
    }

    out
}

fn render_grid<P, M>(piece_on_square: P, marker: M) -> String
where
    P: Fn(Square) -> Option<(Color, PieceKind)>,
    M: Fn(Square) -> Option<char>,
{
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            let sq = rank * 8 + file;
            match (piece_on_square(sq), marker(sq)) {
                (Some((color, kind)), _) => out.push(piece_to_unicode(color, kind)),
                (None, Some(mark)) => out.push(mark),
                (None, None) => out.push('·'),
            }

            if file < 7 {
                out.push(match marker(sq) {
                    Some('(') => ')',
                    _ => ' ',
                });
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}
