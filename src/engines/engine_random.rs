//! Random-move strategy.
//!
//! Picks uniformly from the legal moves of the side to move. Useful as an
//! opponent for testing the session and threading plumbing.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessErrors;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::all_legal_moves;

pub struct RandomEngine {
    seed: Option<u64>,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            seed: None,
            rng: StdRng::seed_from_u64(rand::random::<u64>()),
        }
    }

    /// Reproducible engine; the same seed and positions give the same moves.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn reseed(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed.unwrap_or_else(rand::random::<u64>));
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn new_game(&mut self) {
        self.reseed();
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), ChessErrors> {
        match name.trim().to_ascii_lowercase().as_str() {
            "seed" => {
                let seed = value.trim().parse::<u64>().map_err(|e| {
                    ChessErrors::EngineFailure(format!("invalid Seed value '{value}': {e}"))
                })?;
                self.seed = Some(seed);
                self.reseed();
                Ok(())
            }
            _ => Err(ChessErrors::EngineFailure(format!("unknown option '{name}'"))),
        }
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> Result<EngineOutput, ChessErrors> {
        // Sorted so a seeded engine does not depend on generation order.
        let mut legal_moves = all_legal_moves(game_state, game_state.side_to_move());
        legal_moves.sort();

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        if params.should_stop() {
            out.info_lines
                .push("info string random_engine stop requested".to_owned());
        }

        if legal_moves.is_empty() {
            return Ok(out);
        }

        let picked = legal_moves
            .as_slice()
            .choose(&mut self.rng)
            .ok_or(ChessErrors::NoLegalMoves)?;
        out.best_move = Some(*picked);
        Ok(out)
    }
}
