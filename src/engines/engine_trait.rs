//! Move strategy abstraction.
//!
//! Strategies see only a position snapshot and the legal-move contract, and
//! hand their choice back to the caller, which submits it through the same
//! apply path as interactive input.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::chess_errors::ChessErrors;
use crate::game_state::{chess_types::ChessMove, game_state::GameState};

/// Per-request settings.
#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Raised by the host to ask for an early answer.
    pub stop: Arc<AtomicBool>,
}

impl GoParams {
    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// `None` when the side to move has no legal move.
    pub best_move: Option<ChessMove>,
    /// `info string ...` lines for the host to print.
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), ChessErrors> {
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> Result<EngineOutput, ChessErrors>;
}
