use std::thread;

use crate::chess_errors::ChessErrors;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    generate_legal_moves, has_any_legal_move, GeneratedMove,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count leaf nodes `depth` plies below `game_state`, with a breakdown of
/// how the final ply was reached. Draw rules are ignored, as in the
/// published reference counts.
pub fn perft(game_state: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(game_state) {
        perft_recurse(game_state, &mv, depth, 1, &mut total);
    }
    total
}

/// Same counts as `perft`, with one worker thread per root move.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> Result<PerftCounts, ChessErrors> {
    if depth == 0 {
        return Ok(perft(game_state, 0));
    }

    let root_moves = generate_legal_moves(game_state);
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let parent = game_state.clone();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            perft_recurse(&parent, &mv, depth, 1, &mut local);
            local
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle
            .join()
            .map_err(|_| ChessErrors::EngineFailure("perft worker thread panicked".to_owned()))?;
        total.merge(local);
    }

    Ok(total)
}

/// Node count for each root move, sorted by move; the usual tool for
/// locating a generator bug against a reference implementation. Empty at
/// depth 0, where there are no root moves to split by.
pub fn perft_divide(game_state: &GameState, depth: u8) -> Vec<(ChessMove, usize)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut divided: Vec<(ChessMove, usize)> = generate_legal_moves(game_state)
        .into_iter()
        .map(|mv| {
            let nodes = perft(&mv.game_after_move, depth - 1).nodes;
            (mv.chess_move, nodes)
        })
        .collect();
    divided.sort();
    divided
}

fn perft_recurse(
    parent: &GameState,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    if current_depth == search_depth {
        count_leaf(parent, mv, counts);
        return;
    }

    for child in generate_legal_moves(&mv.game_after_move) {
        perft_recurse(&mv.game_after_move, &child, search_depth, current_depth + 1, counts);
    }
}

fn count_leaf(parent: &GameState, mv: &GeneratedMove, counts: &mut PerftCounts) {
    counts.nodes += 1;

    let chess_move = &mv.chess_move;
    if chess_move.flag == MoveFlag::EnPassantCapture {
        counts.captures += 1;
        counts.en_passant += 1;
    } else if parent.piece_at(chess_move.to).is_some() {
        counts.captures += 1;
    }
    if chess_move.is_castle() {
        counts.castles += 1;
    }
    if chess_move.promotion.is_some() {
        counts.promotions += 1;
    }

    let after = &mv.game_after_move;
    if is_king_in_check(after, after.side_to_move()) {
        counts.checks += 1;
        if !has_any_legal_move(after) {
            counts.checkmates += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn nodes(fen: &str, depth: u8) -> usize {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        perft(&game, depth).nodes
    }

    #[test]
    fn depth_zero_counts_single_node() {
        assert_eq!(
            perft(&GameState::new_game(), 0),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn start_position_reference_counts() {
        let game = GameState::new_game();
        assert_eq!(perft(&game, 1).nodes, 20);
        assert_eq!(perft(&game, 2).nodes, 400);

        let depth_three = perft(&game, 3);
        assert_eq!(depth_three.nodes, 8902);
        assert_eq!(depth_three.captures, 34);
        assert_eq!(depth_three.checks, 12);
        assert_eq!(depth_three.checkmates, 0);
    }

    #[test]
    fn kiwipete_reference_counts() {
        let game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        let depth_one = perft(&game, 1);
        assert_eq!(depth_one.nodes, 48);
        assert_eq!(depth_one.captures, 8);
        assert_eq!(depth_one.castles, 2);

        let depth_two = perft(&game, 2);
        assert_eq!(depth_two.nodes, 2039);
        assert_eq!(depth_two.captures, 351);
        assert_eq!(depth_two.en_passant, 1);
        assert_eq!(depth_two.castles, 91);
        assert_eq!(depth_two.checks, 3);
    }

    #[test]
    fn endgame_and_promotion_positions() {
        assert_eq!(nodes(POSITION_3, 1), 14);
        assert_eq!(nodes(POSITION_3, 2), 191);
        assert_eq!(nodes(POSITION_3, 3), 2812);
        assert_eq!(nodes(POSITION_4, 1), 6);
        assert_eq!(nodes(POSITION_4, 2), 264);
        assert_eq!(nodes(POSITION_5, 1), 44);
        assert_eq!(nodes(POSITION_5, 2), 1486);
    }

    #[test]
    fn threaded_and_divided_counts_agree() {
        let game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        let threaded = perft_multi_threaded(&game, 2).expect("workers should finish");
        assert_eq!(threaded, perft(&game, 2));

        let divided = perft_divide(&game, 2);
        assert_eq!(divided.len(), 48);
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<usize>(), 2039);
    }

    #[test]
    fn divide_at_depth_zero_has_no_root_moves() {
        assert!(perft_divide(&GameState::new_game(), 0).is_empty());
        let depth_one = perft_divide(&GameState::new_game(), 1);
        assert_eq!(depth_one.len(), 20);
        assert!(depth_one.iter().all(|(_, nodes)| *nodes == 1));
    }
}
