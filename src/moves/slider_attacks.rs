//! Ray-walk attack sets for bishops, rooks and queens.
//!
//! Each ray runs from the origin until the board edge or the first occupied
//! square, which is included so the caller can decide between capture and
//! blocked by masking with its own occupancy.

use crate::game_state::chess_types::Square;

pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Union of rays in `directions` from `square`, stopping at blockers in `occupancy`.
pub fn slider_attacks(square: Square, directions: &[(i8, i8)], occupancy: u64) -> u64 {
    let mut attacks = 0u64;
    for &(d_file, d_rank) in directions {
        let mut current = square;
        while let Some(next) = current.offset(d_file, d_rank) {
            attacks |= next.mask();
            if occupancy & next.mask() != 0 {
                break;
            }
            current = next;
        }
    }
    attacks
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    slider_attacks(square, &DIAGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    slider_attacks(square, &ORTHOGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_on_empty_board_sees_fourteen_squares() {
        assert_eq!(rook_attacks(Square::at(3, 3), 0).count_ones(), 14);
        assert_eq!(bishop_attacks(Square::at(3, 3), 0).count_ones(), 13);
        assert_eq!(queen_attacks(Square::at(3, 3), 0).count_ones(), 27);
    }

    #[test]
    fn rook_ray_includes_first_blocker_only() {
        let a1 = Square::at(0, 0);
        let a4 = Square::at(0, 3);
        let attacks = rook_attacks(a1, a4.mask());
        assert_ne!(attacks & a4.mask(), 0);
        assert_eq!(attacks & Square::at(0, 4).mask(), 0);
    }
}
