//! Leaf-node counting over the legal move tree, for sanity-checking move
//! generation and legality bookkeeping independent of the heuristic/search
//! crate.

use crate::board::Board;

/// Count leaf positions reachable in exactly `depth` plies from `board`.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        board.apply(mv);
        nodes += perft(board, depth - 1);
        board.undo(mv);
    }
    nodes
}

/// Per-move leaf counts at `depth`, for comparing against a reference
/// engine move by move. Sorted by move index.
pub fn divide(board: &mut Board, depth: u32) -> Vec<(crate::moves::Move, u64)> {
    let mut moves = board.legal_moves();
    moves.sort_by_key(|mv| mv.index());
    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        board.apply(mv);
        let nodes = perft(board, depth.saturating_sub(1));
        board.undo(mv);
        out.push((mv, nodes));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CENTER;

    #[test]
    fn perft_depth_0_is_one() {
        let mut board = Board::new();
        assert_eq!(perft(&mut board, 0), 1);
    }

    #[test]
    fn perft_depth_1_on_empty_board_is_one() {
        // Only the center opening is legal on an empty board.
        let mut board = Board::new();
        assert_eq!(perft(&mut board, 1), 1);
    }

    #[test]
    fn perft_depth_2_matches_legal_radius() {
        let mut board = Board::new();
        // One center move, then 24 replies.
        assert_eq!(perft(&mut board, 2), 24);
    }

    #[test]
    fn perft_does_not_mutate_board() {
        let mut board = Board::new();
        let before = board.clone();
        perft(&mut board, 2);
        assert_eq!(board, before);
    }

    #[test]
    fn divide_startpos_sums_to_perft() {
        let mut board = Board::new();
        let total: u64 = divide(&mut board, 2).iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&mut board, 2));
    }

    #[test]
    fn divide_first_ply_is_center_only() {
        let mut board = Board::new();
        let d = divide(&mut board, 1);
        assert_eq!(d, vec![(CENTER, 1)]);
    }
}
