//! Attack oracle.
//!
//! Answers "is this square attacked by that color" for check detection,
//! castling safety and the legality filter. Pure functions of the state.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::slider_attacks::{bishop_attacks, rook_attacks};
use crate::moves::step_attacks::{king_attacks, knight_attacks, pawn_attacks};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces_of(color, PieceKind::King);
    if kings == 0 {
        None
    } else {
        Some(Square::from_lsb(kings))
    }
}

/// A side without a king is never considered in check.
#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Whether any piece of `attacker_color` has a capture path to `square`.
///
/// Pawns attack their forward diagonals whether or not the target is
/// occupied, and the king attacks its eight neighbours.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let occupancy = game_state.occupancy();

    // A pawn of the attacking color attacks `square` exactly when a pawn of
    // the defending color on `square` would attack the pawn.
    let pawns = game_state.pieces_of(attacker_color, PieceKind::Pawn);
    if pawn_attacks(attacker_color.opposite(), square) & pawns != 0 {
        return true;
    }

    if knight_attacks(square) & game_state.pieces_of(attacker_color, PieceKind::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & game_state.pieces_of(attacker_color, PieceKind::King) != 0 {
        return true;
    }

    let queens = game_state.pieces_of(attacker_color, PieceKind::Queen);
    let bishops_queens = game_state.pieces_of(attacker_color, PieceKind::Bishop) | queens;
    if bishop_attacks(square, occupancy) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = game_state.pieces_of(attacker_color, PieceKind::Rook) | queens;
    rook_attacks(square, occupancy) & rooks_queens != 0
}

/// Every piece of `attacker_color` attacking `square`, lowest square first.
pub fn attackers_to_square(
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    let occupancy = game_state.occupancy();
    let mut attackers = Vec::<(Square, PieceKind)>::new();

    let lines = [
        (
            PieceKind::Pawn,
            pawn_attacks(attacker_color.opposite(), square),
        ),
        (PieceKind::Knight, knight_attacks(square)),
        (PieceKind::Bishop, bishop_attacks(square, occupancy)),
        (PieceKind::Rook, rook_attacks(square, occupancy)),
        (
            PieceKind::Queen,
            bishop_attacks(square, occupancy) | rook_attacks(square, occupancy),
        ),
        (PieceKind::King, king_attacks(square)),
    ];

    for (kind, reach) in lines {
        let mut found = reach & game_state.pieces_of(attacker_color, kind);
        while found != 0 {
            attackers.push((Square::from_lsb(found), kind));
            found &= found - 1;
        }
    }

    attackers.sort();
    attackers
}
