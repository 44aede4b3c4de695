use crate::game_state::chess_rules::PROMOTION_KINDS;
use crate::game_state::chess_types::*;

/// Push a plain move to every square set in `targets`.
#[inline]
pub fn push_targets(from: Square, mut targets: u64, out: &mut Vec<ChessMove>) {
    while targets != 0 {
        out.push(ChessMove::new(from, Square::from_lsb(targets)));
        targets &= targets - 1;
    }
}

/// Push a pawn move, expanding it into the four promotion choices when it
/// lands on the last rank.
#[inline]
pub fn push_pawn_move(
    side: Color,
    from: Square,
    to: Square,
    flag: MoveFlag,
    out: &mut Vec<ChessMove>,
) {
    if to.rank() == side.promotion_rank() {
        for kind in PROMOTION_KINDS {
            out.push(ChessMove::promoting(from, to, kind));
        }
    } else {
        out.push(ChessMove::with_flag(from, to, flag));
    }
}
