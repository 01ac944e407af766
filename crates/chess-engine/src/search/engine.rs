//! Search ownership: one search at a time, cooperative cancellation, and
//! background searches with a joinable handle.

use super::{SearchConfig, SearchResult, Searcher};
use chess_core::{Color, Move};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A caller-owned flag that asks a running search to wind down.
///
/// Cancelling does not abort anything: the search notices the flag at its
/// next node, scores the remaining positions statically and returns its
/// best move so far.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Releases the engine's busy flag when dropped.
struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Runs searches with a fixed configuration, at most one at a time.
///
/// Clones share the same busy flag; separately constructed engines do not,
/// so independent instances never block each other.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: SearchConfig,
    busy: Arc<AtomicBool>,
}

impl Engine {
    /// Creates an engine with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Engine {
            config,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns true while a search is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Searches on the calling thread.
    ///
    /// Returns `None` without searching if another search is running.
    pub fn search(
        &self,
        history: &[Move],
        base_depth: u32,
        color: Color,
        cancel: &CancelToken,
    ) -> Option<SearchResult> {
        let _guard = self.try_acquire()?;
        Some(Searcher::new(&self.config, cancel).search(history, base_depth, color))
    }

    /// Picks a move for `color` after `history`.
    ///
    /// `None` if the side has no legal move or a search is already running.
    pub fn best_move(&self, history: &[Move], base_depth: u32, color: Color) -> Option<Move> {
        self.search(history, base_depth, color, &CancelToken::new())
            .and_then(|result| result.best_move)
    }

    /// Starts a search on a worker thread.
    ///
    /// The engine counts as busy from the moment this returns a handle until
    /// the search finishes. Returns `None` if a search is already running.
    pub fn spawn(&self, history: Vec<Move>, base_depth: u32, color: Color) -> Option<SearchHandle> {
        let guard = self.try_acquire()?;
        let cancel = CancelToken::new();
        let token = cancel.clone();
        let config = self.config.clone();

        let spawned = thread::Builder::new()
            .name("chess-search".into())
            .spawn(move || {
                let _guard = guard;
                Searcher::new(&config, &token).search(&history, base_depth, color)
            });

        match spawned {
            Ok(handle) => Some(SearchHandle { cancel, handle }),
            Err(error) => {
                tracing::warn!(%error, "failed to start search thread");
                None
            }
        }
    }

    fn try_acquire(&self) -> Option<BusyGuard> {
        match self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Some(BusyGuard {
                busy: Arc::clone(&self.busy),
            }),
            Err(_) => {
                tracing::debug!("search already in flight; request ignored");
                None
            }
        }
    }
}

/// A search running on a worker thread.
pub struct SearchHandle {
    cancel: CancelToken,
    handle: JoinHandle<SearchResult>,
}

impl SearchHandle {
    /// Asks the search to stop early.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// The token the search is watching.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Returns true once the search has produced its result.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the search and returns its result.
    ///
    /// `None` if the search thread panicked.
    pub fn join(self) -> Option<SearchResult> {
        match self.handle.join() {
            Ok(result) => Some(result),
            Err(_) => {
                tracing::error!("search thread panicked");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{legal_moves, Board};

    #[test]
    fn cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn best_move_from_start_is_legal() {
        let config = SearchConfig {
            max_depth: 1,
            ..SearchConfig::default()
        };
        let engine = Engine::new(config);
        let mv = engine.best_move(&[], 3, Color::White).unwrap();
        assert!(legal_moves(&Board::initial(), Color::White, None).contains(&mv));
        assert!(!engine.is_busy());
    }

    #[test]
    fn second_request_is_refused_while_busy() {
        let engine = Engine::default();
        let handle = engine.spawn(Vec::new(), 5, Color::White).unwrap();
        assert!(engine.is_busy());

        let clone = engine.clone();
        assert!(clone
            .search(&[], 1, Color::White, &CancelToken::new())
            .is_none());
        assert!(clone.spawn(Vec::new(), 1, Color::White).is_none());

        // Independent engines are not blocked.
        let other = Engine::new(SearchConfig {
            max_depth: 1,
            ..SearchConfig::default()
        });
        assert!(other.best_move(&[], 1, Color::White).is_some());

        handle.cancel();
        let result = handle.join().unwrap();
        let mv = result.best_move.unwrap();
        assert!(legal_moves(&Board::initial(), Color::White, None).contains(&mv));
        assert!(!engine.is_busy());
        assert!(engine.best_move(&[], 1, Color::White).is_some());
    }

    #[test]
    fn handle_reports_completion() {
        let engine = Engine::new(SearchConfig {
            max_depth: 1,
            ..SearchConfig::default()
        });
        let handle = engine.spawn(Vec::new(), 1, Color::White).unwrap();
        assert!(!handle.cancel_token().is_cancelled());
        let result = handle.join().unwrap();
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
    }
}
