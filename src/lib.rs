//! Crate root module declarations for the Aula chess rules engine.
//!
//! This file exposes the subsystems (board state, movement patterns, legality
//! and attack detection, the game state machine with its history and clocks,
//! and utility helpers) so binaries, tests, and external tooling can import
//! stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod move_record;
    pub mod snapshot;
}

pub mod moves {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
    pub mod pseudo_legal;
}

pub mod game {
    pub mod captured;
    pub mod clock;
    pub mod config;
    #[allow(clippy::module_inception)]
    pub mod game;
    pub mod game_result;
    pub mod game_view;
    pub mod history;
    pub mod session;
}

pub mod utils {
    pub mod algebraic;
    pub mod render_game_state;
}
