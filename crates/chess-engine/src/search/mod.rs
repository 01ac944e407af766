//! Move search.
//!
//! A depth-limited minimax with alpha-beta pruning. Leaves are scored by a
//! capture-only quiescence search so that a hanging piece on the horizon is
//! not mistaken for a safe one. White maximizes, Black minimizes.

mod config;
mod engine;
mod eval;
mod ordering;

pub use config::{ConfigError, SearchConfig, DEPTH_CEILING};
pub use engine::{CancelToken, Engine, SearchHandle};
pub use eval::{evaluate, king_proximity, piece_square_value};
pub use ordering::{move_importance, order_moves, MATING_MOVE};

use crate::movegen::{in_check, legal_moves};
use crate::Board;
use chess_core::{Color, Move};
use rand::seq::SliceRandom;
use std::time::Instant;

/// Outcome of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen move, or `None` when the side has no legal move.
    pub best_move: Option<Move>,
    /// Value of the position, from White's point of view.
    pub score: i32,
    /// Depth actually searched.
    pub depth: u32,
    /// Nodes visited, quiescence included.
    pub nodes: u64,
}

/// Search state for one call.
pub struct Searcher<'a> {
    config: &'a SearchConfig,
    cancel: &'a CancelToken,
    deadline: Option<Instant>,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(config: &'a SearchConfig, cancel: &'a CancelToken) -> Self {
        Searcher {
            config,
            cancel,
            deadline: None,
            nodes: 0,
        }
    }

    /// Searches the position reached by `history` for a move by `color`.
    pub fn search(&mut self, history: &[Move], base_depth: u32, color: Color) -> SearchResult {
        let board = Board::replay(history);
        self.search_board(&board, history.last(), base_depth, color)
    }

    /// Searches `board` for a move by `color`.
    ///
    /// `last_move` is the move that produced `board`, if any.
    pub fn search_board(
        &mut self,
        board: &Board,
        last_move: Option<&Move>,
        base_depth: u32,
        color: Color,
    ) -> SearchResult {
        let start = Instant::now();
        self.deadline = self.config.time_limit().map(|limit| start + limit);
        self.nodes = 0;
        let depth = self.config.effective_depth(base_depth);

        let legal = legal_moves(board, color, last_move);
        if legal.is_empty() {
            tracing::debug!(%color, "no legal moves to search");
            return SearchResult {
                best_move: None,
                score: evaluate(board, last_move, self.config),
                depth,
                nodes: 0,
            };
        }

        let maximizing = color == Color::White;
        let (score, best) = self.minimax(board, last_move, depth, i32::MIN, i32::MAX, maximizing);
        let best_move = best.or_else(|| {
            tracing::debug!("no move improved on the sentinel; picking at random");
            legal.as_slice().choose(&mut rand::thread_rng()).copied()
        });

        tracing::debug!(
            %color,
            depth,
            nodes = self.nodes,
            score,
            elapsed_ms = start.elapsed().as_millis() as u64,
            cancelled = self.cancel.is_cancelled(),
            best = ?best_move,
            "search finished"
        );

        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
        }
    }

    fn should_stop(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn mate_score(&self, winner: Color) -> i32 {
        match winner {
            Color::White => self.config.checkmate_value,
            Color::Black => -self.config.checkmate_value,
        }
    }

    fn minimax(
        &mut self,
        board: &Board,
        last_move: Option<&Move>,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, Option<Move>) {
        self.nodes += 1;
        let to_move = side(maximizing);
        let moves = legal_moves(board, to_move, last_move);

        if moves.is_empty() && in_check(board, to_move) {
            return (self.mate_score(to_move.opposite()), None);
        }

        if depth == 0 || moves.is_empty() || self.should_stop() {
            let depth = self.config.quiescence_depth;
            let score = self.quiescence(board, last_move, alpha, beta, maximizing, depth);
            return (score, None);
        }

        let mut best_move = None;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for (importance, m) in order_moves(board, moves.as_slice(), self.config) {
            if importance == MATING_MOVE {
                return (self.mate_score(to_move), Some(m));
            }

            let child = board.after(&m);
            let (score, _) = self.minimax(&child, Some(&m), depth - 1, alpha, beta, !maximizing);

            if maximizing {
                if score > best {
                    best = score;
                    best_move = Some(m);
                }
                if self.config.alpha_beta {
                    alpha = alpha.max(best);
                }
            } else {
                if score < best {
                    best = score;
                    best_move = Some(m);
                }
                if self.config.alpha_beta {
                    beta = beta.min(best);
                }
            }

            if beta <= alpha {
                break;
            }
        }

        (best, best_move)
    }

    /// Extends the search along capture sequences.
    ///
    /// A fail-hard alpha-beta over captures only, with the static evaluation
    /// as stand-pat, at most `quiescence_depth` captures deep. The window is
    /// the caller's, so a full-width search (which never narrows it) gets the
    /// exact capture-tree value and a pruned search gets that value clamped
    /// to its window.
    fn quiescence(
        &mut self,
        board: &Board,
        last_move: Option<&Move>,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        depth: u32,
    ) -> i32 {
        self.nodes += 1;
        let stand_pat = evaluate(board, last_move, self.config);

        if maximizing {
            if stand_pat >= beta {
                return beta;
            }
            alpha = alpha.max(stand_pat);
        } else {
            if stand_pat <= alpha {
                return alpha;
            }
            beta = beta.min(stand_pat);
        }

        if depth == 0 {
            return if maximizing { alpha } else { beta };
        }

        let moves = legal_moves(board, side(maximizing), last_move);
        for m in moves.iter().filter(|m| m.is_capture()) {
            let child = board.after(m);
            let score = self.quiescence(&child, Some(m), alpha, beta, !maximizing, depth - 1);

            if maximizing {
                alpha = alpha.max(score);
                if alpha >= beta {
                    return beta;
                }
            } else {
                beta = beta.min(score);
                if beta <= alpha {
                    return alpha;
                }
            }
        }

        if maximizing {
            alpha
        } else {
            beta
        }
    }
}

#[inline]
fn side(maximizing: bool) -> Color {
    if maximizing {
        Color::White
    } else {
        Color::Black
    }
}
