//! Standard algebraic notation for recorded moves.

use crate::chess_errors::{ChessErrors, IllegalMoveReason};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_any_legal_move};

/// Format a legal move of `game_state` in SAN, e.g. `Nbd7`, `exd6`, `e8=Q+`, `O-O#`.
pub fn move_to_san(game_state: &GameState, chess_move: &ChessMove) -> Result<String, ChessErrors> {
    let piece = game_state.piece_at(chess_move.from).ok_or(ChessErrors::IllegalMove {
        from: chess_move.from,
        to: chess_move.to,
        reason: IllegalMoveReason::EmptyOrigin,
    })?;
    let after = apply_move(game_state, chess_move)?;

    let mut san = match chess_move.flag {
        MoveFlag::CastleKingside => "O-O".to_owned(),
        MoveFlag::CastleQueenside => "O-O-O".to_owned(),
        _ => {
            let is_capture = chess_move.flag == MoveFlag::EnPassantCapture
                || game_state.piece_at(chess_move.to).is_some();
            let mut out = String::new();

            if piece.kind == PieceKind::Pawn {
                if is_capture {
                    out.push(char::from(b'a' + chess_move.from.file()));
                }
            } else {
                out.push(piece.kind.letter());
                out.push_str(&disambiguation(game_state, chess_move, piece.kind));
            }

            if is_capture {
                out.push('x');
            }
            out.push_str(&chess_move.to.to_string());

            if let Some(kind) = chess_move.promotion {
                out.push('=');
                out.push(kind.letter());
            }
            out
        }
    };

    if is_king_in_check(&after, after.side_to_move()) {
        san.push(if has_any_legal_move(&after) { '+' } else { '#' });
    }

    Ok(san)
}

/// File, rank or both of the origin when another piece of the same kind
/// could also reach the destination.
fn disambiguation(game_state: &GameState, chess_move: &ChessMove, kind: PieceKind) -> String {
    let rivals: Vec<Square> = generate_legal_moves(game_state)
        .into_iter()
        .map(|generated| generated.chess_move)
        .filter(|mv| mv.to == chess_move.to && mv.from != chess_move.from)
        .filter(|mv| game_state.piece_at(mv.from).is_some_and(|p| p.kind == kind))
        .map(|mv| mv.from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let from = chess_move.from;
    let file = char::from(b'a' + from.file());
    let rank = char::from(b'1' + from.rank());
    if rivals.iter().all(|sq| sq.file() != from.file()) {
        file.to_string()
    } else if rivals.iter().all(|sq| sq.rank() != from.rank()) {
        rank.to_string()
    } else {
        format!("{file}{rank}")
    }
}
