//! Long algebraic ("e2e4", "e7e8q") move input and output.
//!
//! Parsing resolves the selection against the legal set, so the result
//! carries the engine's special-move flag.

use crate::chess_errors::ChessErrors;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::resolve_move;
use crate::utils::algebraic::algebraic_to_square;

#[inline]
pub fn move_to_long_algebraic(chess_move: &ChessMove) -> String {
    chess_move.to_string()
}

pub fn long_algebraic_to_move(
    long_algebraic: &str,
    game_state: &GameState,
) -> Result<ChessMove, ChessErrors> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessErrors::InvalidAlgebraicString(long_algebraic.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => Some(
            PieceKind::from_letter(ch)
                .ok_or_else(|| ChessErrors::InvalidAlgebraicString(long_algebraic.to_owned()))?,
        ),
    };

    resolve_move(game_state, from, to, promotion)
}
