use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::step_attacks::knight_attacks;

/// Knight jumps onto empty or enemy-held squares.
pub fn generate_knight_moves(game_state: &GameState, from: Square, out: &mut Vec<ChessMove>) {
    let own_occ = game_state.occupancy_of(game_state.side_to_move());
    push_targets(from, knight_attacks(from) & !own_occ, out);
}
