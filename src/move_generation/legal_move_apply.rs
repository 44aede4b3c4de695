//! Move executor.
//!
//! `apply_move` validates a move against the legal set and returns the
//! resulting position; `resolve_move` turns an (origin, destination,
//! promotion) selection into the engine's fully-flagged move. The raw
//! `make_move` step is shared with the legality filter.

use crate::chess_errors::{ChessErrors, IllegalMoveReason};
use crate::game_state::chess_rules::castle_path;
use crate::game_state::game_status::compute_status;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::{is_legal, pseudo_legal_moves};

/// Apply a legal move, producing a new position.
///
/// Terminal positions reject every move with `GameOver`; moves outside the
/// legal set are rejected with `IllegalMove` or `PromotionRequired`.
pub fn apply_move(game_state: &GameState, chess_move: &ChessMove) -> Result<GameState, ChessErrors> {
    let legal = resolve_move(
        game_state,
        chess_move.from,
        chess_move.to,
        chess_move.promotion,
    )?;

    if legal.flag != chess_move.flag {
        return Err(illegal(chess_move.from, chess_move.to, IllegalMoveReason::FlagMismatch));
    }

    let moved = game_state.piece_at(legal.from).ok_or_else(|| {
        illegal(legal.from, legal.to, IllegalMoveReason::EmptyOrigin)
    })?;
    Ok(make_move(game_state, &legal, moved))
}

/// Find the legal move matching a presentation-layer selection.
pub fn resolve_move(
    game_state: &GameState,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<ChessMove, ChessErrors> {
    let status = compute_status(game_state);
    if status.is_terminal() {
        return Err(ChessErrors::GameOver(status));
    }

    let piece = game_state
        .piece_at(from)
        .ok_or_else(|| illegal(from, to, IllegalMoveReason::EmptyOrigin))?;
    if piece.color != game_state.side_to_move() {
        return Err(illegal(from, to, IllegalMoveReason::WrongColor));
    }
    if let Some(kind) = promotion {
        if !kind.is_promotion_target() {
            return Err(illegal(from, to, IllegalMoveReason::InvalidPromotion));
        }
    }

    let looks_like_castle = piece.kind == PieceKind::King
        && from.rank() == to.rank()
        && from.file().abs_diff(to.file()) == 2;

    let candidates: Vec<ChessMove> = pseudo_legal_moves(game_state, from)
        .into_iter()
        .filter(|mv| mv.to == to)
        .collect();
    if candidates.is_empty() {
        let reason = if looks_like_castle {
            IllegalMoveReason::CastlingNotAllowed
        } else {
            IllegalMoveReason::Unreachable
        };
        return Err(illegal(from, to, reason));
    }

    let legal: Vec<ChessMove> = candidates
        .into_iter()
        .filter(|mv| is_legal(game_state, mv))
        .collect();
    let Some(first) = legal.first().copied() else {
        let reason = if looks_like_castle {
            IllegalMoveReason::CastlingNotAllowed
        } else {
            IllegalMoveReason::LeavesKingInCheck
        };
        return Err(illegal(from, to, reason));
    };

    if first.promotion.is_none() {
        if promotion.is_some() {
            return Err(illegal(from, to, IllegalMoveReason::InvalidPromotion));
        }
        return Ok(first);
    }

    let Some(kind) = promotion else {
        return Err(ChessErrors::PromotionRequired { from, to });
    };
    legal
        .into_iter()
        .find(|mv| mv.promotion == Some(kind))
        .ok_or_else(|| illegal(from, to, IllegalMoveReason::InvalidPromotion))
}

/// Execute a pseudo-legal move for `moved` without any legality checks.
pub(crate) fn make_move(game_state: &GameState, chess_move: &ChessMove, moved: Piece) -> GameState {
    let mover = moved.color;
    let is_capture = game_state
        .piece_at(chess_move.to)
        .is_some_and(|piece| piece.color != mover)
        || chess_move.flag == MoveFlag::EnPassantCapture;

    let mut next = game_state.clone();

    next.clear_square(chess_move.from);

    // The captured pawn sits beside the destination, on the capturing pawn's rank.
    if chess_move.flag == MoveFlag::EnPassantCapture {
        if let Some(victim) = Square::new(chess_move.to.file(), chess_move.from.rank()) {
            next.clear_square(victim);
        }
    }

    let placed = match chess_move.promotion {
        Some(kind) => Piece::new(mover, kind),
        None => moved,
    };
    next.put_piece(chess_move.to, placed);

    if let Some(side) = chess_move.flag.castle_side() {
        let path = castle_path(mover, side);
        next.clear_square(path.rook_from);
        next.put_piece(path.rook_to, Piece::new(mover, PieceKind::Rook));
    }

    update_castling_rights(&mut next, chess_move);

    next.en_passant_square = if chess_move.flag == MoveFlag::DoublePawnPush {
        chess_move.from.offset(0, mover.forward())
    } else {
        None
    };

    if moved.kind == PieceKind::Pawn || is_capture {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = mover.opposite();
    next
}

/// Leaving a king or rook home square (or capturing onto a rook home
/// square) drops the rights that depend on that piece.
fn update_castling_rights(game_state: &mut GameState, chess_move: &ChessMove) {
    for color in [Color::White, Color::Black] {
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            let path = castle_path(color, side);
            let touched = [path.king_from, path.rook_from];
            if touched.contains(&chess_move.from) || chess_move.to == path.rook_from {
                game_state
                    .castling_rights
                    .remove(CastlingRights::for_side(color, side));
            }
        }
    }
}

#[inline]
fn illegal(from: Square, to: Square, reason: IllegalMoveReason) -> ChessErrors {
    ChessErrors::IllegalMove { from, to, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_status::GameStatus;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn play(game: &GameState, from: &str, to: &str) -> GameState {
        let mv = resolve_move(game, sq(from), sq(to), None).expect("move should resolve");
        apply_move(game, &mv).expect("move should apply")
    }

    #[test]
    fn double_push_sets_en_passant_target_and_resets_clock() {
        let game = GameState::new_game();
        let next = play(&game, "e2", "e4");
        assert_eq!(next.en_passant_square(), Some(sq("e3")));
        assert_eq!(next.halfmove_clock(), 0);
        assert_eq!(next.fullmove_number(), 1);
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(
            next.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        // Source position is untouched.
        assert_eq!(game, GameState::new_game());
    }

    #[test]
    fn quiet_piece_move_clears_en_passant_and_counts_halfmoves() {
        let game = play(&GameState::new_game(), "e2", "e4");
        let next = play(&game, "g8", "f6");
        assert_eq!(next.en_passant_square(), None);
        assert_eq!(next.halfmove_clock(), 1);
        assert_eq!(next.fullmove_number(), 2);
    }

    #[test]
    fn en_passant_removes_pawn_beside_destination() {
        let game = GameState::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1")
            .expect("FEN should parse");
        let game = play(&game, "d7", "d5");
        assert_eq!(game.en_passant_square(), Some(sq("d6")));

        let mv = resolve_move(&game, sq("e5"), sq("d6"), None).expect("en passant resolves");
        assert_eq!(mv.flag, MoveFlag::EnPassantCapture);
        let next = apply_move(&game, &mv).expect("en passant applies");
        assert_eq!(next.piece_at(sq("d5")), None);
        assert_eq!(
            next.piece_at(sq("d6")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(next.halfmove_clock(), 0);
    }

    #[test]
    fn en_passant_expires_after_one_ply() {
        let game = GameState::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1")
            .expect("FEN should parse");
        let game = play(&game, "d7", "d5");
        let game = play(&game, "e1", "f1");
        let game = play(&game, "e8", "f8");
        let err = resolve_move(&game, sq("e5"), sq("d6"), None).expect_err("window has closed");
        assert!(matches!(
            err,
            ChessErrors::IllegalMove {
                reason: IllegalMoveReason::Unreachable,
                ..
            }
        ));
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10")
            .expect("FEN should parse");
        let next = play(&game, "e1", "g1");
        assert_eq!(
            next.piece_at(sq("f1")),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(next.piece_at(sq("h1")), None);
        assert_eq!(
            next.piece_at(sq("g1")),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(next.castling_rights(), CastlingRights::for_color(Color::Black));
        assert_eq!(next.halfmove_clock(), 4);

        let next = play(&next, "e8", "c8");
        assert_eq!(
            next.piece_at(sq("d8")),
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(next.piece_at(sq("a8")), None);
        assert!(next.castling_rights().is_empty());
        assert_eq!(next.fullmove_number(), 11);
    }

    #[test]
    fn rook_moves_and_rook_captures_clear_single_rights() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let next = play(&game, "a1", "a8");
        assert!(!next.castling_rights().contains(CastlingRights::WHITE_QUEENSIDE));
        assert!(!next.castling_rights().contains(CastlingRights::BLACK_QUEENSIDE));
        assert!(next.castling_rights().contains(CastlingRights::WHITE_KINGSIDE));
        assert!(next.castling_rights().contains(CastlingRights::BLACK_KINGSIDE));
        assert_eq!(next.halfmove_clock(), 0);
    }

    #[test]
    fn promotion_requires_a_choice_then_places_the_piece() {
        let game =
            GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let err = resolve_move(&game, sq("a7"), sq("a8"), None).expect_err("needs a choice");
        assert_eq!(
            err,
            ChessErrors::PromotionRequired {
                from: sq("a7"),
                to: sq("a8")
            }
        );

        let mv = ChessMove::promoting(sq("a7"), sq("a8"), PieceKind::Queen);
        let next = apply_move(&game, &mv).expect("queen promotion applies");
        assert_eq!(
            next.piece_at(sq("a8")),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(next.pieces_of(Color::White, PieceKind::Pawn), 0);
    }

    #[test]
    fn promotion_kind_must_be_a_promotion_target() {
        let game =
            GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        for kind in [PieceKind::King, PieceKind::Pawn] {
            let err = resolve_move(&game, sq("a7"), sq("a8"), Some(kind)).expect_err("bad kind");
            assert!(matches!(
                err,
                ChessErrors::IllegalMove {
                    reason: IllegalMoveReason::InvalidPromotion,
                    ..
                }
            ));
        }
        let err = resolve_move(&GameState::new_game(), sq("e2"), sq("e4"), Some(PieceKind::Queen))
            .expect_err("not a promoting move");
        assert!(matches!(
            err,
            ChessErrors::IllegalMove {
                reason: IllegalMoveReason::InvalidPromotion,
                ..
            }
        ));
    }

    #[test]
    fn rejections_name_their_reason() {
        let game = GameState::new_game();
        let reason_of = |from: &str, to: &str| match resolve_move(&game, sq(from), sq(to), None) {
            Err(ChessErrors::IllegalMove { reason, .. }) => reason,
            other => panic!("expected an illegal move, got {other:?}"),
        };
        assert_eq!(reason_of("e4", "e5"), IllegalMoveReason::EmptyOrigin);
        assert_eq!(reason_of("e7", "e5"), IllegalMoveReason::WrongColor);
        assert_eq!(reason_of("f1", "c4"), IllegalMoveReason::Unreachable);
        assert_eq!(reason_of("e1", "g1"), IllegalMoveReason::CastlingNotAllowed);
    }

    #[test]
    fn pinned_piece_cannot_expose_king() {
        let game = GameState::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1")
            .expect("FEN should parse");
        let err = resolve_move(&game, sq("e2"), sq("c3"), None).expect_err("knight is pinned");
        assert!(matches!(
            err,
            ChessErrors::IllegalMove {
                reason: IllegalMoveReason::LeavesKingInCheck,
                ..
            }
        ));
    }

    #[test]
    fn mismatched_flag_is_rejected() {
        let game = GameState::new_game();
        let mv = ChessMove::new(sq("e2"), sq("e4"));
        let err = apply_move(&game, &mv).expect_err("double push must carry its flag");
        assert!(matches!(
            err,
            ChessErrors::IllegalMove {
                reason: IllegalMoveReason::FlagMismatch,
                ..
            }
        ));
    }

    #[test]
    fn terminal_position_rejects_moves_with_game_over() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 100 80")
            .expect("FEN should parse");
        let err = resolve_move(&game, sq("h1"), sq("h2"), None).expect_err("drawn position");
        assert_eq!(err, ChessErrors::GameOver(GameStatus::DrawFiftyMove));
    }
}
