//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g. `e4`) and `Square`
//! values; reused by FEN, long algebraic, SAN and PGN code.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Square;

/// Parse a square such as "e4".
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessErrors> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    Square::new(file - b'a', rank - b'1').ok_or(ChessErrors::InvalidFileOrRank(file - b'a', rank - b'1'))
}

/// Build a square from zero-based file and rank coming from a UI grid.
pub fn square_from_file_rank(file: u8, rank: u8) -> Result<Square, ChessErrors> {
    Square::new(file, rank).ok_or(ChessErrors::InvalidFileOrRank(file, rank))
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}
