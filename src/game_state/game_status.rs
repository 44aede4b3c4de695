//! Game state machine.
//!
//! Status is derived from a position on demand, never stored on it.

use std::fmt;

use crate::game_state::chess_rules::FIFTY_MOVE_RULE_HALFMOVES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// The payload is the color in check.
    Check(Color),
    /// The payload is the winner.
    Checkmate(Color),
    Stalemate,
    DrawFiftyMove,
    DrawInsufficientMaterial,
}

impl GameStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate(_)
                | GameStatus::Stalemate
                | GameStatus::DrawFiftyMove
                | GameStatus::DrawInsufficientMaterial
        )
    }

    /// PGN result token.
    pub const fn result_token(self) -> &'static str {
        match self {
            GameStatus::Checkmate(Color::White) => "1-0",
            GameStatus::Checkmate(Color::Black) => "0-1",
            GameStatus::Stalemate | GameStatus::DrawFiftyMove | GameStatus::DrawInsufficientMaterial => {
                "1/2-1/2"
            }
            GameStatus::Ongoing | GameStatus::Check(_) => "*",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Check(color) => write!(f, "{color} is in check"),
            GameStatus::Checkmate(winner) => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::DrawFiftyMove => write!(f, "draw by the fifty-move rule"),
            GameStatus::DrawInsufficientMaterial => write!(f, "draw by insufficient material"),
        }
    }
}

/// Classify a position.
///
/// Checkmate and stalemate take precedence over the draw rules, which take
/// precedence over a plain check.
pub fn compute_status(game_state: &GameState) -> GameStatus {
    let side = game_state.side_to_move();
    let in_check = is_king_in_check(game_state, side);
    let has_moves = has_any_legal_move(game_state);

    if !has_moves {
        return if in_check {
            GameStatus::Checkmate(side.opposite())
        } else {
            GameStatus::Stalemate
        };
    }
    if game_state.halfmove_clock() >= FIFTY_MOVE_RULE_HALFMOVES {
        return GameStatus::DrawFiftyMove;
    }
    if has_insufficient_material(game_state) {
        return GameStatus::DrawInsufficientMaterial;
    }
    if in_check {
        GameStatus::Check(side)
    } else {
        GameStatus::Ongoing
    }
}

/// Bare kings, or king and one minor piece against a bare king.
pub fn has_insufficient_material(game_state: &GameState) -> bool {
    let mut heavy_or_pawns = 0u64;
    let mut minors = 0u32;
    for color in [Color::White, Color::Black] {
        heavy_or_pawns |= game_state.pieces_of(color, PieceKind::Pawn)
            | game_state.pieces_of(color, PieceKind::Rook)
            | game_state.pieces_of(color, PieceKind::Queen);
        minors += (game_state.pieces_of(color, PieceKind::Knight)
            | game_state.pieces_of(color, PieceKind::Bishop))
        .count_ones();
    }
    heavy_or_pawns == 0 && minors <= 1
}

/// Draw conditions that end the game while moves are still available.
#[inline]
pub(crate) fn is_drawn_by_rule(game_state: &GameState) -> bool {
    game_state.halfmove_clock() >= FIFTY_MOVE_RULE_HALFMOVES || has_insufficient_material(game_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(fen: &str) -> GameStatus {
        compute_status(&GameState::from_fen(fen).expect("FEN should parse"))
    }

    #[test]
    fn start_position_is_ongoing() {
        assert_eq!(compute_status(&GameState::new_game()), GameStatus::Ongoing);
    }

    #[test]
    fn back_rank_mate_is_checkmate() {
        assert_eq!(
            status_of("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"),
            GameStatus::Checkmate(Color::White)
        );
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        assert_eq!(status_of("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), GameStatus::Stalemate);
    }

    #[test]
    fn check_with_escape_is_check() {
        assert_eq!(
            status_of("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1"),
            GameStatus::Check(Color::Black)
        );
    }

    #[test]
    fn fifty_move_rule_ignores_material() {
        assert_eq!(
            status_of("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 100 60"),
            GameStatus::DrawFiftyMove
        );
        assert_eq!(
            status_of("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 99 60"),
            GameStatus::Ongoing
        );
    }

    #[test]
    fn insufficient_material_cases() {
        assert_eq!(status_of("4k3/8/8/8/8/8/8/4K3 w - - 0 1"), GameStatus::DrawInsufficientMaterial);
        assert_eq!(status_of("4k3/8/8/8/8/8/8/4KN2 w - - 0 1"), GameStatus::DrawInsufficientMaterial);
        assert_eq!(status_of("4kb2/8/8/8/8/8/8/4K3 w - - 0 1"), GameStatus::DrawInsufficientMaterial);
        assert_eq!(status_of("4kb2/8/8/8/8/8/8/4KN2 w - - 0 1"), GameStatus::Ongoing);
        assert_eq!(status_of("4k3/8/8/8/8/8/7P/4K3 w - - 0 1"), GameStatus::Ongoing);
    }

    #[test]
    fn terminal_statuses_and_result_tokens() {
        assert!(GameStatus::Checkmate(Color::Black).is_terminal());
        assert!(GameStatus::DrawInsufficientMaterial.is_terminal());
        assert!(!GameStatus::Check(Color::White).is_terminal());
        assert_eq!(GameStatus::Checkmate(Color::Black).result_token(), "0-1");
        assert_eq!(GameStatus::Stalemate.result_token(), "1/2-1/2");
        assert_eq!(GameStatus::Check(Color::White).result_token(), "*");
    }
}
