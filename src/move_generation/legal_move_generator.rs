//! Full legal move generation pipeline.
//!
//! Dispatches per-piece pseudo-legal generation, executes each candidate on a
//! scratch copy and keeps only moves that leave the mover's king unattacked.
//! Only pieces of the side to move have moves. Positions already drawn by
//! rule report no legal moves, so every terminal position has an empty set.

use crate::game_state::game_status::is_drawn_by_rule;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_slider::generate_slider_moves;

/// A legal move together with the position it produces.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub chess_move: ChessMove,
    pub game_after_move: GameState,
}

/// Moves obeying piece shape and blocking rules from `square`; they may
/// still leave the mover's king in check.
pub fn pseudo_legal_moves(game_state: &GameState, square: Square) -> Vec<ChessMove> {
    let mut out = Vec::<ChessMove>::with_capacity(32);
    let Some(piece) = game_state.piece_at(square) else {
        return out;
    };
    if piece.color != game_state.side_to_move() {
        return out;
    }

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(game_state, square, &mut out),
        PieceKind::Knight => generate_knight_moves(game_state, square, &mut out),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            generate_slider_moves(game_state, square, piece.kind, &mut out)
        }
        PieceKind::King => generate_king_moves(game_state, square, &mut out),
    }
    out
}

/// Legal moves of the piece on `square`, for move highlighting.
pub fn legal_moves(game_state: &GameState, square: Square) -> Vec<ChessMove> {
    if is_drawn_by_rule(game_state) {
        return Vec::new();
    }
    pseudo_legal_moves(game_state, square)
        .into_iter()
        .filter(|mv| is_legal(game_state, mv))
        .collect()
}

/// Every legal move for `color`; empty unless `color` is to move.
pub fn all_legal_moves(game_state: &GameState, color: Color) -> Vec<ChessMove> {
    if color != game_state.side_to_move() || is_drawn_by_rule(game_state) {
        return Vec::new();
    }
    generate_legal_moves(game_state)
        .into_iter()
        .map(|generated| generated.chess_move)
        .collect()
}

/// Legal moves of the side to move by piece movement rules alone, ignoring
/// draw-by-rule termination. Used by status detection and perft.
pub fn generate_legal_moves(game_state: &GameState) -> Vec<GeneratedMove> {
    let side = game_state.side_to_move();
    let mut legal = Vec::<GeneratedMove>::with_capacity(64);

    let mut own = game_state.occupancy_of(side);
    while own != 0 {
        let from = Square::from_lsb(own);
        own &= own - 1;

        let Some(moved) = game_state.piece_at(from) else {
            continue;
        };
        for mv in pseudo_legal_moves(game_state, from) {
            let next = make_move(game_state, &mv, moved);
            if !is_king_in_check(&next, side) {
                legal.push(GeneratedMove {
                    chess_move: mv,
                    game_after_move: next,
                });
            }
        }
    }

    legal
}

/// Whether the side to move has at least one legal move by movement rules.
pub(crate) fn has_any_legal_move(game_state: &GameState) -> bool {
    let side = game_state.side_to_move();
    let mut own = game_state.occupancy_of(side);
    while own != 0 {
        let from = Square::from_lsb(own);
        own &= own - 1;
        if pseudo_legal_moves(game_state, from)
            .iter()
            .any(|mv| is_legal(game_state, mv))
        {
            return true;
        }
    }
    false
}

/// A pseudo-legal move is legal when, after executing it, the mover's king
/// is not attacked.
pub(crate) fn is_legal(game_state: &GameState, chess_move: &ChessMove) -> bool {
    let Some(moved) = game_state.piece_at(chess_move.from) else {
        return false;
    };
    let next = make_move(game_state, chess_move, moved);
    !is_king_in_check(&next, moved.color)
}
