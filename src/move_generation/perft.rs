//! Perft: leaf counts of the legal move tree, used to validate the legality
//! evaluator against well-known reference numbers.

use std::thread;

use crate::game_state::board::Board;
use crate::game_state::move_record::SpecialMove;
use crate::move_generation::legal_move_apply::{apply_move, AppliedMove};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{expanded_legal_moves, has_any_legal_move};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn leaf(applied: &AppliedMove) -> Self {
        let record = &applied.record;
        let next = &applied.board;
        let gives_check = is_king_in_check(next, next.side_to_move);
        Self {
            nodes: 1,
            captures: usize::from(record.is_capture()),
            en_passant: usize::from(record.special == SpecialMove::EnPassant),
            castles: usize::from(record.special == SpecialMove::Castle),
            promotions: usize::from(matches!(record.special, SpecialMove::Promotion(_))),
            checks: usize::from(gives_check),
            checkmates: usize::from(gives_check && !has_any_legal_move(next, next.side_to_move)),
        }
    }
}

pub fn perft(board: &Board, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in expanded_legal_moves(board, board.side_to_move) {
        if let Some(applied) = apply_move(board, mv) {
            perft_recurse(&applied, depth, 1, &mut total);
        }
    }
    total
}

/// Same counts as [`perft`], with one worker thread per root move.
pub fn perft_multi_threaded(board: &Board, depth: u8) -> PerftCounts {
    if depth == 0 {
        return perft(board, 0);
    }

    let root: Vec<AppliedMove> = expanded_legal_moves(board, board.side_to_move)
        .into_iter()
        .filter_map(|mv| apply_move(board, mv))
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = root
            .iter()
            .map(|applied| {
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    perft_recurse(applied, depth, 1, &mut local);
                    local
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            match handle.join() {
                Ok(local) => total.merge(local),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        total
    })
}

fn perft_recurse(applied: &AppliedMove, search_depth: u8, current_depth: u8, counts: &mut PerftCounts) {
    if current_depth == search_depth {
        counts.merge(PerftCounts::leaf(applied));
        return;
    }

    let board = &applied.board;
    for mv in expanded_legal_moves(board, board.side_to_move) {
        if let Some(child) = apply_move(board, mv) {
            perft_recurse(&child, search_depth, current_depth + 1, counts);
        }
    }
}
