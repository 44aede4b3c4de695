//! Position snapshot consumed and produced by every engine operation.
//!
//! `GameState` stores piece bitboards, occupancy caches, side to move,
//! castling rights, the en-passant target and both move counters. Engine
//! operations take `&GameState` and hand back fresh values; an existing
//! state is never edited behind the caller's back.

use std::fmt;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    // [color][piece_kind]
    pub(crate) pieces: [[u64; 6]; 2],

    pub(crate) occupancy_by_color: [u64; 2],
    pub(crate) occupancy_all: u64,

    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,

    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    /// Board with no pieces, White to move.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard initial layout: White to move, all rights, counters reset.
    pub fn new_game() -> Self {
        let mut game_state = Self::new_empty();
        let back_row = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for color in [Color::White, Color::Black] {
            for (file, kind) in back_row.into_iter().enumerate() {
                let file = file as u8;
                game_state.put_piece(Square::at(file, color.back_rank()), Piece::new(color, kind));
                game_state.put_piece(
                    Square::at(file, color.pawn_start_rank()),
                    Piece::new(color, PieceKind::Pawn),
                );
            }
        }
        game_state.castling_rights = CastlingRights::ALL;
        game_state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// True when this state is the standard starting position.
    pub fn is_starting_position(&self) -> bool {
        self.to_fen() == STARTING_POSITION_FEN
    }

    /// Piece standing on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square.mask();
        if self.occupancy_all & mask == 0 {
            return None;
        }
        for color in [Color::White, Color::Black] {
            if self.occupancy_by_color[color.index()] & mask == 0 {
                continue;
            }
            for kind in PieceKind::ALL {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece::new(color, kind));
                }
            }
        }
        None
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Bitboard of one color's pieces of one kind.
    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy_of(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy(&self) -> u64 {
        self.occupancy_all
    }

    /// Every occupied square with its piece, a1 first.
    pub fn occupied_squares(&self) -> Vec<(Square, Piece)> {
        let mut out = Vec::with_capacity(self.occupancy_all.count_ones() as usize);
        let mut occupied = self.occupancy_all;
        while occupied != 0 {
            let square = Square::from_lsb(occupied);
            if let Some(piece) = self.piece_at(square) {
                out.push((square, piece));
            }
            occupied &= occupied - 1;
        }
        out
    }

    pub(crate) fn put_piece(&mut self, square: Square, piece: Piece) {
        self.clear_square(square);
        let mask = square.mask();
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
    }

    pub(crate) fn clear_square(&mut self, square: Square) {
        let keep = !square.mask();
        for color_pieces in self.pieces.iter_mut() {
            for bitboard in color_pieces.iter_mut() {
                *bitboard &= keep;
            }
        }
        self.occupancy_by_color[0] &= keep;
        self.occupancy_by_color[1] &= keep;
        self.occupancy_all &= keep;
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render_game_state(self))
    }
}
