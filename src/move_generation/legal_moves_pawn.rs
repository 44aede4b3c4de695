//! Pseudo-legal pawn moves: single and double pushes, diagonal captures,
//! en passant and promotion.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_pawn_move;
use crate::moves::step_attacks::pawn_attacks;

pub fn generate_pawn_moves(game_state: &GameState, from: Square, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move();
    let forward = side.forward();
    let empty = !game_state.occupancy();
    let enemy_occ = game_state.occupancy_of(side.opposite());

    if let Some(one_step) = from.offset(0, forward) {
        if one_step.mask() & empty != 0 {
            push_pawn_move(side, from, one_step, MoveFlag::Quiet, out);

            if from.rank() == side.pawn_start_rank() {
                if let Some(two_step) = one_step.offset(0, forward) {
                    if two_step.mask() & empty != 0 {
                        out.push(ChessMove::with_flag(from, two_step, MoveFlag::DoublePawnPush));
                    }
                }
            }
        }
    }

    let mut captures = pawn_attacks(side, from);
    while captures != 0 {
        let to = Square::from_lsb(captures);
        if to.mask() & enemy_occ != 0 {
            push_pawn_move(side, from, to, MoveFlag::Quiet, out);
        } else if game_state.en_passant_square() == Some(to) {
            out.push(ChessMove::with_flag(from, to, MoveFlag::EnPassantCapture));
        }
        captures &= captures - 1;
    }
}
