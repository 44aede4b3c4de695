//! King steps and castling.
//!
//! A castle is generated only when the right is still held, the king and
//! rook stand on their original squares, every square between them is empty,
//! and the king's start, pass-through and landing squares are all unattacked.

use crate::game_state::chess_rules::castle_path;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::step_attacks::king_attacks;

pub fn generate_king_moves(game_state: &GameState, from: Square, out: &mut Vec<ChessMove>) {
    let own_occ = game_state.occupancy_of(game_state.side_to_move());
    push_targets(from, king_attacks(from) & !own_occ, out);
    generate_castling_moves(game_state, from, out);
}

fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move();
    let enemy = side.opposite();

    for castle_side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !game_state
            .castling_rights()
            .contains(CastlingRights::for_side(side, castle_side))
        {
            continue;
        }

        let path = castle_path(side, castle_side);
        if king_from != path.king_from {
            continue;
        }
        if game_state.piece_at(path.rook_from) != Some(Piece::new(side, PieceKind::Rook)) {
            continue;
        }
        if game_state.occupancy() & path.must_be_empty != 0 {
            continue;
        }
        if path
            .king_walk
            .iter()
            .any(|&square| is_square_attacked(game_state, square, enemy))
        {
            continue;
        }

        let flag = match castle_side {
            CastleSide::Kingside => MoveFlag::CastleKingside,
            CastleSide::Queenside => MoveFlag::CastleQueenside,
        };
        out.push(ChessMove::with_flag(path.king_from, path.king_to, flag));
    }
}
