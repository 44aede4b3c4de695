//! Bishop, rook and queen moves by ray walk.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

pub fn generate_slider_moves(
    game_state: &GameState,
    from: Square,
    kind: PieceKind,
    out: &mut Vec<ChessMove>,
) {
    let occupancy = game_state.occupancy();
    let reach = match kind {
        PieceKind::Bishop => bishop_attacks(from, occupancy),
        PieceKind::Rook => rook_attacks(from, occupancy),
        PieceKind::Queen => queen_attacks(from, occupancy),
        _ => return,
    };
    let own_occ = game_state.occupancy_of(game_state.side_to_move());
    push_targets(from, reach & !own_occ, out);
}
