//! Move ordering heuristics.
//!
//! Ordering never changes the value a full-width search returns; it only
//! decides how early alpha-beta can cut off.

use super::SearchConfig;
use crate::movegen::in_check;
use crate::rules::is_checkmate_on;
use crate::Board;
use chess_core::Move;

/// Importance of a move that mates on the spot.
pub const MATING_MOVE: i32 = i32::MAX;

/// Scores how promising `m` looks for the side playing it.
pub fn move_importance(board: &Board, m: &Move, config: &SearchConfig) -> i32 {
    let color = m.color();
    let opponent = color.opposite();
    let after = board.after(m);

    if is_checkmate_on(&after, opponent, Some(m)) {
        return MATING_MOVE;
    }

    let mut score = 0;

    if let Some(victim) = m.captured {
        let gain = victim.value();
        score += gain * 10;
        // Cheaper attackers first.
        score += (gain - m.piece.value()) * 5;
    }

    if in_check(&after, opponent) {
        score += config.check_value;
    }

    if in_check(board, color) && !in_check(&after, color) {
        score += config.check_value * 2;
    }

    if let Some(king) = board.find_king(opponent) {
        score += (7 - m.to.manhattan(king) as i32) * 10;
    }

    score
}

/// Pairs each move with its importance, most important first.
///
/// The sort is stable, so equally important moves keep generation order.
pub fn order_moves(board: &Board, moves: &[Move], config: &SearchConfig) -> Vec<(i32, Move)> {
    let mut scored: Vec<(i32, Move)> = moves
        .iter()
        .map(|m| (move_importance(board, m, config), *m))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::legal_moves;
    use chess_core::Color;

    fn board(text: &str) -> Board {
        Board::from_placement(text).unwrap()
    }

    #[test]
    fn mating_move_comes_first() {
        let b = board("6k1/5ppp/8/8/8/8/8/R5K1");
        let moves = legal_moves(&b, Color::White, None);
        let ordered = order_moves(&b, moves.as_slice(), &SearchConfig::default());
        let (score, first) = ordered[0];
        assert_eq!(score, MATING_MOVE);
        assert_eq!(first.to_coordinate(), "a1a8");
    }

    #[test]
    fn cheap_capture_of_queen_beats_quiet_moves() {
        let b = board("4k3/8/8/3q4/4P3/8/8/4K3");
        let moves = legal_moves(&b, Color::White, None);
        let ordered = order_moves(&b, moves.as_slice(), &SearchConfig::default());
        assert_eq!(ordered[0].1.to_coordinate(), "e4d5");
        let expected_capture = 90 * 10 + (90 - 10) * 5;
        assert!(ordered[0].0 >= expected_capture);
    }

    #[test]
    fn escaping_check_is_rewarded() {
        let config = SearchConfig::default();
        let b = board("4k3/8/8/8/8/8/8/r3K3");
        let moves = legal_moves(&b, Color::White, None);
        assert!(!moves.is_empty());
        for m in &moves {
            // Every legal reply leaves check, so every one carries the bonus.
            assert!(move_importance(&b, m, &config) >= config.check_value * 2);
        }
    }

    #[test]
    fn ordering_is_stable_for_ties() {
        let b = Board::initial();
        let moves = legal_moves(&b, Color::White, None);
        let ordered = order_moves(&b, moves.as_slice(), &SearchConfig::default());
        for pair in ordered.windows(2) {
            assert!(pair[0].0 >= pair[1].0);
            if pair[0].0 == pair[1].0 {
                let i = moves.iter().position(|m| *m == pair[0].1).unwrap();
                let j = moves.iter().position(|m| *m == pair[1].1).unwrap();
                assert!(i < j);
            }
        }
    }
}
