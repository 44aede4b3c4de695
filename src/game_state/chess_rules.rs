//! Canonical chess-rule constants.
//!
//! Starting layout, draw thresholds, promotion choices and the fixed
//! king/rook squares involved in castling.

use crate::game_state::chess_types::{CastleSide, Color, PieceKind, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move rule declares a draw.
pub const FIFTY_MOVE_RULE_HALFMOVES: u16 = 100;

/// Kinds a pawn may promote to, weakest first.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// Squares touched by one castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePath {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook; all must be empty.
    pub must_be_empty: u64,
    /// Squares the king stands on, crosses and lands on; none may be attacked.
    pub king_walk: [Square; 3],
}

pub const fn castle_path(color: Color, side: CastleSide) -> CastlePath {
    let rank = color.back_rank();
    match side {
        CastleSide::Kingside => CastlePath {
            king_from: Square::at(4, rank),
            king_to: Square::at(6, rank),
            rook_from: Square::at(7, rank),
            rook_to: Square::at(5, rank),
            must_be_empty: Square::at(5, rank).mask() | Square::at(6, rank).mask(),
            king_walk: [Square::at(4, rank), Square::at(5, rank), Square::at(6, rank)],
        },
        CastleSide::Queenside => CastlePath {
            king_from: Square::at(4, rank),
            king_to: Square::at(2, rank),
            rook_from: Square::at(0, rank),
            rook_to: Square::at(3, rank),
            must_be_empty: Square::at(1, rank).mask()
                | Square::at(2, rank).mask()
                | Square::at(3, rank).mask(),
            king_walk: [Square::at(4, rank), Square::at(3, rank), Square::at(2, rank)],
        },
    }
}
