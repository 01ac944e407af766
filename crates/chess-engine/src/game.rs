//! Full game management with history tracking.
//!
//! The [`Game`] struct holds the authoritative live board together with the
//! move history it was reached by. Every mutation keeps the two in step:
//! replaying the history from the initial board always yields the live board.

use crate::movegen::find_move;
use crate::rules::{GameResult, RuleSet, StandardChess};
use crate::{Board, MoveList};
use chess_core::{Color, CoreError, Move, MoveText, Piece};
use thiserror::Error;

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The move text could not be parsed.
    #[error("invalid move text: {0}")]
    InvalidMoveText(#[from] CoreError),
    /// Undo was requested with no moves played.
    #[error("no move to undo")]
    NothingToUndo,
    /// The game has already ended.
    #[error("game has already ended")]
    GameAlreadyOver,
}

/// A chess game with history tracking and undo.
#[derive(Debug, Clone)]
pub struct Game {
    /// Current board.
    board: Board,
    /// Moves played so far.
    history: Vec<Move>,
    /// Game result if the game has ended.
    result: Option<GameResult>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Game {
            board: StandardChess.initial_board(),
            history: Vec::new(),
            result: None,
        }
    }

    /// Replays a move history, checking each move for legality.
    pub fn from_history(moves: &[Move]) -> Result<Self, GameError> {
        let mut game = Game::new();
        for m in moves {
            game.make_move(*m)?;
        }
        Ok(game)
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the last move played, if any.
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        Color::to_move_after(self.history.len())
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> MoveList {
        StandardChess.legal_moves(&self.board, self.side_to_move(), self.last_move())
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        StandardChess.is_check(&self.board, self.side_to_move())
    }

    /// Returns the game result if the game is over.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Half-moves since the last pawn move or capture.
    pub fn halfmove_clock(&self) -> u32 {
        crate::rules::halfmove_clock(&self.history)
    }

    /// Pieces of the opponent captured by `color`, in the order taken.
    pub fn captured(&self, color: Color) -> Vec<Piece> {
        self.history
            .iter()
            .filter(|m| m.color() == color)
            .filter_map(|m| m.captured)
            .collect()
    }

    /// Makes a move, which must be one of [`legal_moves`](Self::legal_moves).
    pub fn make_move(&mut self, m: Move) -> Result<(), GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }

        let to_move = self.side_to_move();
        if !StandardChess.is_legal(&self.board, to_move, self.last_move(), &m) {
            return Err(GameError::IllegalMove(m.to_coordinate()));
        }

        self.apply_move(m);
        Ok(())
    }

    /// Makes a move given as coordinate text such as `e2e4` or `e7e8n`.
    ///
    /// Returns the resolved move.
    pub fn make_move_text(&mut self, text: &str) -> Result<Move, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }

        let parsed = MoveText::parse(text)?;
        let m = find_move(&self.board, self.side_to_move(), self.last_move(), &parsed)
            .ok_or_else(|| GameError::IllegalMove(text.to_string()))?;
        self.apply_move(m);
        Ok(m)
    }

    /// Takes back the last move and returns it.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        let m = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.board.unapply(&m);
        self.check_game_end();
        Ok(m)
    }

    /// Internal method to apply a legal move.
    fn apply_move(&mut self, m: Move) {
        self.board.apply(&m);
        self.history.push(m);
        self.check_game_end();
    }

    /// Checks if the game has ended and updates the result.
    fn check_game_end(&mut self) {
        self.result = StandardChess.game_result(&self.board, &self.history);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::DrawReason;
    use chess_core::{MoveFlag, PieceKind};

    fn play(game: &mut Game, moves: &[&str]) {
        for m in moves {
            game.make_move_text(m).unwrap();
        }
    }

    #[test]
    fn rejects_unparsable_text_and_foreign_moves() {
        let mut game = Game::new();
        let err = game.make_move_text("z9e4").unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidMoveText(CoreError::InvalidMoveText(_))
        ));
        let kept = err.clone();
        assert_eq!(kept, err);

        // A black move while White is to play.
        let pawn = Piece::new(PieceKind::Pawn, Color::Black);
        let e7 = chess_core::Square::from_algebraic("e7").unwrap();
        let e5 = chess_core::Square::from_algebraic("e5").unwrap();
        let early = Move::new(e7, e5, pawn, None, MoveFlag::DoublePush);
        assert_eq!(
            game.make_move(early),
            Err(GameError::IllegalMove("e7e5".to_string()))
        );
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.ply_count(), 0);
        assert!(!game.is_game_over());
        assert!(!game.is_check());
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn make_move_text() {
        let mut game = Game::new();
        let m = game.make_move_text("e2e4").unwrap();
        assert_eq!(m.flag, MoveFlag::DoublePush);
        assert_eq!(game.ply_count(), 1);
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn illegal_move() {
        let mut game = Game::new();
        let result = game.make_move_text("e2e5"); // Can't move pawn 3 squares
        assert!(matches!(result, Err(GameError::IllegalMove(_))));
        assert!(matches!(
            game.make_move_text("e9e4"),
            Err(GameError::InvalidMoveText(_))
        ));

        let pawn = Piece::new(PieceKind::Pawn, Color::Black);
        let e7 = chess_core::Square::from_algebraic("e7").unwrap();
        let e5 = chess_core::Square::from_algebraic("e5").unwrap();
        let wrong_side = Move::new(e7, e5, pawn, None, MoveFlag::DoublePush);
        assert!(game.make_move(wrong_side).is_err());
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn checkmate_fools_mate() {
        let mut game = Game::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(game.is_check());
        assert!(game.is_game_over());
        assert_eq!(game.result(), Some(GameResult::BlackWins));
    }

    #[test]
    fn cannot_move_after_game_over() {
        let mut game = Game::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        let result = game.make_move_text("e2e4");
        assert!(matches!(result, Err(GameError::GameAlreadyOver)));
    }

    #[test]
    fn stalemate_in_ten() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                "e2e3", "a7a5", "d1h5", "a8a6", "h5a5", "h7h5", "h2h4", "a6h6", "a5c7", "f7f6",
                "c7d7", "e8f7", "d7b7", "d8d3", "b7b8", "d3h7", "b8c8", "f7g6", "c8e6",
            ],
        );
        assert!(!game.is_check());
        assert_eq!(game.result(), Some(GameResult::Draw(DrawReason::Stalemate)));
    }

    #[test]
    fn repetition_ends_game() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6",
                "f3g1",
            ],
        );
        assert!(!game.is_game_over());
        game.make_move_text("f6g8").unwrap();
        assert_eq!(game.result(), Some(GameResult::Draw(DrawReason::Repetition)));
    }

    #[test]
    fn undo_restores_board_and_result() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "d7d5", "e4d5", "d8d5"]);
        let before = *game.board();

        game.make_move_text("b1c3").unwrap();
        let undone = game.undo().unwrap();
        assert_eq!(undone.to_coordinate(), "b1c3");
        assert_eq!(*game.board(), before);
        assert_eq!(Board::replay(game.history()), *game.board());

        let mut mated = Game::new();
        play(&mut mated, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        mated.undo().unwrap();
        assert!(!mated.is_game_over());

        let mut fresh = Game::new();
        assert_eq!(fresh.undo(), Err(GameError::NothingToUndo));
    }

    #[test]
    fn undo_castling_and_en_passant() {
        let mut game = Game::new();
        play(
            &mut game,
            &["e2e4", "a7a6", "e4e5", "d7d5", "e5d6", "a6a5", "g1f3", "a5a4", "f1e2", "a4a3", "e1g1"],
        );
        let castle = game.last_move().copied().unwrap();
        assert_eq!(castle.flag, MoveFlag::CastleKingside);
        assert_eq!(game.halfmove_clock(), 1);

        let mut rewound = Board::initial();
        for m in &game.history()[..game.ply_count() - 1] {
            rewound.apply(m);
        }
        game.undo().unwrap();
        assert_eq!(*game.board(), rewound);

        for _ in 0..5 {
            game.undo().unwrap();
        }
        let ep = game.history().last().copied().unwrap();
        assert_eq!(ep.to_coordinate(), "e5d6");
        game.undo().unwrap();
        assert_eq!(*game.board(), Board::replay(game.history()));
    }

    #[test]
    fn captured_pieces_by_side() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a2"]);
        let by_white: Vec<_> = game.captured(Color::White).iter().map(|p| p.kind).collect();
        let by_black: Vec<_> = game.captured(Color::Black).iter().map(|p| p.kind).collect();
        assert_eq!(by_white, vec![PieceKind::Pawn]);
        assert_eq!(by_black, vec![PieceKind::Pawn, PieceKind::Pawn]);
    }

    #[test]
    fn from_history_validates_moves() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "e7e5", "g1f3"]);
        let replayed = Game::from_history(game.history()).unwrap();
        assert_eq!(replayed.board(), game.board());
        assert_eq!(replayed.side_to_move(), Color::Black);

        let mut bad = game.history().to_vec();
        bad.push(bad[0]);
        assert!(Game::from_history(&bad).is_err());
    }

    #[test]
    fn promotion_choice_from_text() {
        let mut game = Game::new();
        play(
            &mut game,
            &["h2h4", "g7g5", "h4g5", "h7h6", "g5h6", "g8f6", "h6h7", "h8g8"],
        );
        let h8 = chess_core::Square::from_algebraic("h8").unwrap();

        let mut queened = game.clone();
        let m = queened.make_move_text("h7h8").unwrap();
        assert_eq!(m.promotion(), Some(PieceKind::Queen));
        assert_eq!(queened.board().piece_at(h8).unwrap().kind, PieceKind::Queen);

        let m = game.make_move_text("h7h8n").unwrap();
        assert_eq!(m.promotion(), Some(PieceKind::Knight));
        assert_eq!(game.board().piece_at(h8).unwrap().kind, PieceKind::Knight);
        assert_eq!(Board::replay(game.history()), *game.board());
    }
}
