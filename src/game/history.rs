//! Ordered log of played moves.
//!
//! Holds the initial position plus one entry per ply with the move, its SAN
//! text and the position it produced. Entries are appended during play and
//! popped by undo; positions are replayed through the executor on request.

use crate::chess_errors::ChessErrors;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::apply_move;
use crate::utils::san::move_to_san;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub chess_move: ChessMove,
    pub notation: String,
    pub position_after: GameState,
}

/// One row of the move list shown to players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotationEntry {
    /// 1-based ply number.
    pub ply: usize,
    pub color: Color,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    initial: GameState,
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new(initial: GameState) -> Self {
        Self {
            initial,
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn initial(&self) -> &GameState {
        &self.initial
    }

    /// Position after the last recorded ply.
    pub fn current(&self) -> &GameState {
        self.entries
            .last()
            .map_or(&self.initial, |entry| &entry.position_after)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Position the ply at `index` (0-based) was played from.
    pub fn position_before(&self, index: usize) -> Option<&GameState> {
        match index {
            0 => Some(&self.initial),
            _ => self.entries.get(index - 1).map(|entry| &entry.position_after),
        }
    }

    /// Append a move played from the current position and the position it produced.
    ///
    /// `position` must be exactly what the move yields from `current()`.
    pub fn record(&mut self, chess_move: ChessMove, position: GameState) -> Result<(), ChessErrors> {
        let notation = move_to_san(self.current(), &chess_move)?;
        if apply_move(self.current(), &chess_move)? != position {
            return Err(ChessErrors::PositionMismatch(chess_move));
        }
        self.entries.push(HistoryEntry {
            chess_move,
            notation,
            position_after: position,
        });
        Ok(())
    }

    /// Drop the last ply and return the position it was played from.
    pub fn undo(&mut self) -> Result<GameState, ChessErrors> {
        self.entries.pop().ok_or(ChessErrors::HistoryEmpty)?;
        Ok(self.current().clone())
    }

    /// Rebuild the position after `index` plies by re-applying the moves
    /// from the initial position (`0` gives the initial position).
    pub fn replay_to(&self, index: usize) -> Result<GameState, ChessErrors> {
        if index > self.entries.len() {
            return Err(ChessErrors::PlyOutOfRange {
                requested: index,
                available: self.entries.len(),
            });
        }

        let mut position = self.initial.clone();
        for entry in &self.entries[..index] {
            position = apply_move(&position, &entry.chess_move)?;
        }
        Ok(position)
    }

    pub fn as_notation(&self) -> Vec<NotationEntry> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| NotationEntry {
                ply: index + 1,
                color: self
                    .position_before(index)
                    .map_or(Color::White, |position| position.side_to_move()),
                text: entry.notation.clone(),
            })
            .collect()
    }
}
