//! Single-writer game session.
//!
//! Wraps a `History` and caches the status of the current position. All moves
//! go through the same resolve/apply path whether they come from a player's
//! square selection or an engine.

use crate::chess_errors::ChessErrors;
use crate::game::history::History;
use crate::game_state::game_status::{compute_status, GameStatus};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_move, resolve_move};
use crate::move_generation::legal_move_generator;
use crate::utils::long_algebraic::long_algebraic_to_move;
use crate::utils::pgn::write_pgn;

#[derive(Debug, Clone)]
pub struct ChessGame {
    history: History,
    status: GameStatus,
}

impl ChessGame {
    /// A game from the standard initial layout.
    pub fn new() -> Self {
        Self::from_position(GameState::new_game())
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        Ok(Self::from_position(GameState::from_fen(fen)?))
    }

    pub fn from_position(initial: GameState) -> Self {
        let status = compute_status(&initial);
        Self {
            history: History::new(initial),
            status,
        }
    }

    #[inline]
    pub fn position(&self) -> &GameState {
        self.history.current()
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn legal_moves(&self, square: Square) -> Vec<ChessMove> {
        legal_move_generator::legal_moves(self.position(), square)
    }

    pub fn all_legal_moves(&self) -> Vec<ChessMove> {
        let position = self.position();
        legal_move_generator::all_legal_moves(position, position.side_to_move())
    }

    /// Apply a fully-specified move and return the new status.
    pub fn apply(&mut self, chess_move: &ChessMove) -> Result<GameStatus, ChessErrors> {
        if self.is_finished() {
            return Err(ChessErrors::GameOver(self.status));
        }
        let next = apply_move(self.position(), chess_move)?;
        self.commit(*chess_move, next)
    }

    /// Apply the move selected by origin, destination and optional promotion.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<GameStatus, ChessErrors> {
        if self.is_finished() {
            return Err(ChessErrors::GameOver(self.status));
        }
        let chess_move = resolve_move(self.position(), from, to, promotion)?;
        self.apply(&chess_move)
    }

    /// Apply a move given as "e2e4" or "e7e8q".
    pub fn play_long_algebraic(&mut self, text: &str) -> Result<GameStatus, ChessErrors> {
        if self.is_finished() {
            return Err(ChessErrors::GameOver(self.status));
        }
        let chess_move = long_algebraic_to_move(text, self.position())?;
        self.apply(&chess_move)
    }

    /// Take back the last ply; a finished game becomes playable again.
    pub fn undo(&mut self) -> Result<&GameState, ChessErrors> {
        let previous = self.history.undo()?;
        self.status = compute_status(&previous);
        Ok(self.position())
    }

    pub fn to_pgn(&self) -> Result<String, ChessErrors> {
        write_pgn(&self.history, self.status)
    }

    fn commit(&mut self, chess_move: ChessMove, next: GameState) -> Result<GameStatus, ChessErrors> {
        let status = compute_status(&next);
        self.history.record(chess_move, next)?;
        self.status = status;
        Ok(status)
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::IllegalMoveReason;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn fools_mate_finishes_the_game() {
        let mut game = ChessGame::new();
        for lan in ["f2f3", "e7e5", "g2g4"] {
            assert_eq!(game.play_long_algebraic(lan), Ok(GameStatus::Ongoing));
        }
        assert_eq!(
            game.play_long_algebraic("d8h4"),
            Ok(GameStatus::Checkmate(Color::Black))
        );
        assert!(game.is_finished());
        assert!(game.all_legal_moves().is_empty());
        assert_eq!(
            game.play(sq("a2"), sq("a3"), None),
            Err(ChessErrors::GameOver(GameStatus::Checkmate(Color::Black)))
        );
        assert_eq!(game.history().len(), 4);
    }

    #[test]
    fn open_game_is_ongoing() {
        let mut game = ChessGame::new();
        game.play(sq("e2"), sq("e4"), None).expect("e4 is legal");
        let status = game.play(sq("e7"), sq("e5"), None).expect("e5 is legal");
        assert_eq!(status, GameStatus::Ongoing);
        assert_eq!(game.position().side_to_move(), Color::White);
        let mut knight_targets: Vec<Square> =
            game.legal_moves(sq("g1")).iter().map(|mv| mv.to).collect();
        knight_targets.sort();
        assert_eq!(knight_targets, vec![sq("e2"), sq("f3"), sq("h3")]);
    }

    #[test]
    fn rejected_moves_leave_the_session_unchanged() {
        let mut game = ChessGame::new();
        let err = game.play(sq("e7"), sq("e5"), None).expect_err("black cannot move first");
        assert_eq!(
            err,
            ChessErrors::IllegalMove {
                from: sq("e7"),
                to: sq("e5"),
                reason: IllegalMoveReason::WrongColor
            }
        );
        assert!(game.history().is_empty());
        assert_eq!(game.position(), &GameState::new_game());
    }

    #[test]
    fn undo_reopens_a_finished_game() {
        let mut game = ChessGame::new();
        for lan in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.play_long_algebraic(lan).expect("move is legal");
        }
        game.undo().expect("one ply to undo");
        assert!(!game.is_finished());
        assert_eq!(game.status(), GameStatus::Ongoing);
        game.play_long_algebraic("d8g5").expect("queen move is legal");
        assert_eq!(game.history().len(), 4);
    }

    #[test]
    fn promotion_requires_a_choice() {
        let mut game = ChessGame::from_fen("8/P6k/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(matches!(
            game.play(sq("a7"), sq("a8"), None),
            Err(ChessErrors::PromotionRequired { .. })
        ));
        let status = game
            .play(sq("a7"), sq("a8"), Some(PieceKind::Queen))
            .expect("promotion is legal");
        assert_eq!(status, GameStatus::Ongoing);
        assert_eq!(game.history().entries()[0].notation, "a8=Q");
    }

    #[test]
    fn pgn_export_uses_session_status() {
        let mut game = ChessGame::new();
        game.play_long_algebraic("e2e4").expect("e4 is legal");
        let pgn = game.to_pgn().expect("pgn writes");
        assert!(pgn.ends_with("\n1. e4 *\n"));
    }
}
