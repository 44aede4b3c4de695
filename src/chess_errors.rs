//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type returned by move application,
//! history navigation, notation parsing and engine strategies. Rule
//! violations are ordinary values: the caller matches on them and re-prompts
//! the user; nothing in the engine panics on bad input.
//!
//! - `IllegalMove` covers every way a supplied move can fall outside the
//!   legal set; `reason` says which.
//! - `PromotionRequired` is a request for more input rather than a failure:
//!   re-submit the same move with a promotion kind.
//! - `GameOver` is returned for any move submitted after a terminal status.

use thiserror::Error;

use crate::game_state::chess_types::{ChessMove, Square};
use crate::game_state::game_status::GameStatus;

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// No piece stands on the origin square.
    EmptyOrigin,
    /// The origin piece does not belong to the side to move.
    WrongColor,
    /// The piece cannot reach the destination (shape, blocked path, own piece).
    Unreachable,
    /// The move would leave the mover's own king attacked.
    LeavesKingInCheck,
    /// A castle whose rights, path or king safety conditions do not hold.
    CastlingNotAllowed,
    /// A promotion kind on a non-promoting move, or a kind pawns cannot become.
    InvalidPromotion,
    /// Squares match a legal move but the special-move flag does not.
    FlagMismatch,
}

impl std::fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            IllegalMoveReason::EmptyOrigin => "no piece on the origin square",
            IllegalMoveReason::WrongColor => "piece does not belong to the side to move",
            IllegalMoveReason::Unreachable => "piece cannot reach the destination",
            IllegalMoveReason::LeavesKingInCheck => "move leaves own king in check",
            IllegalMoveReason::CastlingNotAllowed => "castling is not allowed",
            IllegalMoveReason::InvalidPromotion => "invalid promotion choice",
            IllegalMoveReason::FlagMismatch => "special-move flag does not match the position",
        };
        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// The supplied move is not in the legal set of the position.
    #[error("illegal move {from}{to}: {reason}")]
    IllegalMove {
        from: Square,
        to: Square,
        reason: IllegalMoveReason,
    },

    /// A pawn reaches its last rank; re-submit with a promotion kind.
    #[error("move {from}{to} promotes a pawn; a promotion piece must be chosen")]
    PromotionRequired { from: Square, to: Square },

    /// The position is terminal and accepts no further moves.
    #[error("game is over: {0}")]
    GameOver(GameStatus),

    /// Zero-based file/rank pair outside `0..=7`.
    #[error("invalid file or rank ({0}, {1})")]
    InvalidFileOrRank(u8, u8),

    /// Square or move text that is not valid algebraic notation.
    #[error("invalid algebraic string: {0}")]
    InvalidAlgebraicString(String),

    /// FEN text that could not be turned into a position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Undo requested with no recorded plies.
    #[error("history has no recorded moves")]
    HistoryEmpty,

    /// A recorded position that the move does not produce from the current one.
    #[error("position recorded for {0} does not follow from the current position")]
    PositionMismatch(ChessMove),

    /// Replay index past the end of the history.
    #[error("ply {requested} is out of range (history holds {available})")]
    PlyOutOfRange { requested: usize, available: usize },

    /// The side to move has no legal moves.
    #[error("no legal moves available")]
    NoLegalMoves,

    /// A move strategy failed to produce a move.
    #[error("engine failure: {0}")]
    EngineFailure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_move_message_names_squares_and_reason() {
        let err = ChessErrors::IllegalMove {
            from: Square::at(4, 0),
            to: Square::at(6, 0),
            reason: IllegalMoveReason::CastlingNotAllowed,
        };
        assert_eq!(err.to_string(), "illegal move e1g1: castling is not allowed");
    }

    #[test]
    fn game_over_message_includes_status() {
        let err = ChessErrors::GameOver(GameStatus::Stalemate);
        assert_eq!(err.to_string(), "game is over: stalemate");
    }
}
