use crate::board::{in_bounds, Board, Color, Piece, PromotionSelector};
use crate::error::MoveError;
use crate::movegen::{GameState, Move, MoveGenerator};
use crate::opponent::Opponent;
use crate::rules;

/// What a committed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub captured: Option<Piece>,
    /// State of the side that moves next.
    pub state: GameState,
}

/// Everything undo/redo puts back.
#[derive(Debug)]
struct Snapshot {
    board: Board,
    current_turn: Color,
    game_over: bool,
    outcome: Option<GameState>,
}

/// Turn order, move legality, terminal detection and undo/redo over a single board.
/// Not synchronized; callers on several threads must serialize access themselves.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    current_turn: Color,
    game_over: bool,
    outcome: Option<GameState>,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    move_generator: MoveGenerator,
}

impl GameSession {
    /// An empty board with White to move. Call [`GameSession::start`] for a real game.
    pub fn new() -> Self {
        Self::from_position(Board::empty(), Color::White)
    }

    pub fn from_position(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            current_turn: side_to_move,
            game_over: false,
            outcome: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            move_generator: MoveGenerator::new(),
        }
    }

    pub fn start(&mut self) {
        self.board.reset_to_standard();
        self.current_turn = Color::White;
        self.game_over = false;
        self.outcome = None;
        self.clear_history();
    }

    pub fn play_move(&mut self, sr: usize, sc: usize, er: usize, ec: usize) -> bool {
        self.try_play_move(sr, sc, er, ec).is_ok()
    }

    pub fn try_play_move(&mut self, sr: usize, sc: usize, er: usize, ec: usize) -> Result<MoveOutcome, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        if !in_bounds(sr, sc) || !in_bounds(er, ec) {
            return Err(MoveError::OutOfBounds);
        }
        let moving = self
            .board
            .get(sr, sc)
            .ok_or(MoveError::NoPiece { row: sr, col: sc })?;
        if moving.color() != self.current_turn {
            return Err(MoveError::WrongTurn { color: moving.color() });
        }
        if !rules::can_move(&self.board, sr, sc, er, ec) {
            return Err(MoveError::IllegalMove);
        }
        let mv = Move::new(sr, sc, er, ec);
        if self.move_generator.leaves_king_in_check(&self.board, &mv) {
            return Err(MoveError::LeavesKingInCheck);
        }

        self.undo_stack.push(self.snapshot());
        self.redo_stack.clear();
        let captured = self.board.execute(sr, sc, er, ec);

        let opponent = self.current_turn.opposite();
        let state = self.move_generator.game_state(&self.board, opponent);
        if state.is_terminal() {
            self.game_over = true;
            self.outcome = Some(state);
        } else {
            self.current_turn = opponent;
        }

        Ok(MoveOutcome { mv, captured, state })
    }

    /// Asks `opponent` for a move for the side to move and plays it.
    pub fn play_opponent(&mut self, opponent: &mut dyn Opponent) -> Result<MoveOutcome, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        let mv = opponent
            .choose_move(&self.board, self.current_turn)
            .ok_or(MoveError::NoLegalMove)?;
        self.try_play_move(mv.from_row, mv.from_col, mv.to_row, mv.to_col)
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(self.snapshot());
        self.restore(previous);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(self.snapshot());
        self.restore(next);
        true
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.snapshot(),
            current_turn: self.current_turn,
            game_over: self.game_over,
            outcome: self.outcome,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.board.restore_from(&snapshot.board);
        self.current_turn = snapshot.current_turn;
        self.game_over = snapshot.game_over;
        self.outcome = snapshot.outcome;
    }

    /// Replaces the whole position, e.g. from a saved record. History is dropped.
    pub fn load_position(&mut self, board: &Board, side_to_move: Color, game_over: bool) {
        self.board.restore_from(board);
        self.current_turn = side_to_move;
        self.set_game_over(game_over);
        self.clear_history();
    }

    pub fn set_current_turn(&mut self, color: Color) {
        self.current_turn = color;
    }

    /// Marks the game finished. The outcome is recovered from the position when it is
    /// a checkmate or stalemate for either side.
    pub fn set_game_over(&mut self, game_over: bool) {
        self.game_over = game_over;
        self.outcome = if game_over { self.detect_outcome() } else { None };
    }

    fn detect_outcome(&self) -> Option<GameState> {
        [self.current_turn, self.current_turn.opposite()]
            .into_iter()
            .map(|color| self.move_generator.game_state(&self.board, color))
            .find(GameState::is_terminal)
    }

    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn set_promotion_selector<S>(&mut self, selector: S)
    where
        S: PromotionSelector + 'static,
    {
        self.board.set_promotion_selector(selector);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The terminal state that ended the game, if it has ended.
    pub fn outcome(&self) -> Option<GameState> {
        self.outcome
    }

    /// State of the side to move.
    pub fn state(&self) -> GameState {
        self.move_generator.game_state(&self.board, self.current_turn)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.game_over {
            return Vec::new();
        }
        self.move_generator.generate_moves(&self.board, self.current_turn)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PieceKind, PromotionChoice};
    use crate::opponent::{MinimaxOpponent, RandomOpponent};

    fn started() -> GameSession {
        let mut session = GameSession::new();
        session.start();
        session
    }

    fn board_with(pieces: &[(Color, PieceKind, usize, usize)]) -> Board {
        let mut board = Board::empty();
        for &(color, kind, row, col) in pieces {
            board.place(row, col, Some(Piece::new(color, kind, row, col)));
        }
        board
    }

    #[test]
    fn test_start() {
        let session = started();
        assert_eq!(session.current_turn(), Color::White);
        assert!(!session.is_game_over());
        assert!(!session.can_undo());
        assert_eq!(session.board(), &Board::new());
    }

    #[test]
    fn test_turns_alternate() {
        let mut session = started();
        assert!(session.play_move(6, 4, 4, 4));
        assert_eq!(session.current_turn(), Color::Black);
        assert_eq!(session.try_play_move(6, 3, 4, 3), Err(MoveError::WrongTurn { color: Color::White }));
        assert!(session.play_move(1, 4, 3, 4));
        assert_eq!(session.current_turn(), Color::White);
        assert_eq!(session.history_len(), 2);
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut session = started();
        let before = session.board().snapshot();

        assert_eq!(session.try_play_move(4, 4, 3, 4), Err(MoveError::NoPiece { row: 4, col: 4 }));
        assert_eq!(session.try_play_move(9, 4, 3, 4), Err(MoveError::OutOfBounds));
        assert_eq!(session.try_play_move(6, 4, 3, 4), Err(MoveError::IllegalMove));
        assert_eq!(session.try_play_move(7, 0, 6, 0), Err(MoveError::IllegalMove));
        assert_eq!(session.try_play_move(7, 3, 7, 3), Err(MoveError::IllegalMove));

        assert_eq!(session.board(), &before);
        assert_eq!(session.current_turn(), Color::White);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        let board = board_with(&[
            (Color::White, PieceKind::King, 7, 4),
            (Color::White, PieceKind::Rook, 6, 4),
            (Color::Black, PieceKind::Rook, 0, 4),
            (Color::Black, PieceKind::King, 0, 0),
        ]);
        let mut session = GameSession::from_position(board, Color::White);

        assert!(rules::can_move(session.board(), 6, 4, 6, 3));
        assert_eq!(session.try_play_move(6, 4, 6, 3), Err(MoveError::LeavesKingInCheck));
        assert!(session.play_move(6, 4, 3, 4));
    }

    #[test]
    fn test_capture_is_reported() {
        let mut session = started();
        assert!(session.play_move(6, 4, 4, 4));
        assert!(session.play_move(1, 3, 3, 3));
        let outcome = session.try_play_move(4, 4, 3, 3).unwrap();
        assert_eq!(outcome.captured, Some(Piece::new(Color::Black, PieceKind::Pawn, 3, 3)));
        assert_eq!(outcome.state, GameState::Ongoing);
        assert_eq!(outcome.mv, Move::new(4, 4, 3, 3));
    }

    #[test]
    fn test_undo_redo() {
        let mut session = started();
        assert!(!session.undo());
        assert!(!session.redo());

        let start = session.board().snapshot();
        assert!(session.play_move(7, 6, 5, 5));
        let after = session.board().snapshot();

        assert!(session.undo());
        assert_eq!(session.board(), &start);
        assert_eq!(session.current_turn(), Color::White);
        assert!(session.can_redo());

        assert!(session.redo());
        assert_eq!(session.board(), &after);
        assert_eq!(session.current_turn(), Color::Black);
        assert!(!session.can_redo());
    }

    #[test]
    fn test_new_move_clears_redo() {
        let mut session = started();
        assert!(session.play_move(6, 0, 5, 0));
        assert!(session.undo());
        assert!(session.can_redo());
        assert!(session.play_move(6, 7, 5, 7));
        assert!(!session.can_redo());
        assert!(!session.redo());
    }

    #[test]
    fn test_promotion_with_selector() {
        let board = board_with(&[
            (Color::White, PieceKind::King, 7, 7),
            (Color::White, PieceKind::Pawn, 1, 0),
            (Color::Black, PieceKind::King, 3, 4),
        ]);
        let mut session = GameSession::from_position(board, Color::White);
        session.set_promotion_selector(|_color: Color, _row: usize, _col: usize| PromotionChoice::Knight);

        assert!(session.play_move(1, 0, 0, 0));
        assert_eq!(session.board().get(0, 0), Some(Piece::new(Color::White, PieceKind::Knight, 0, 0)));

        assert!(session.undo());
        assert_eq!(session.board().get(1, 0).map(|p| p.kind()), Some(PieceKind::Pawn));
        assert!(session.redo());
        assert_eq!(session.board().get(0, 0).map(|p| p.kind()), Some(PieceKind::Knight));
    }

    #[test]
    fn test_stalemate_ends_game() {
        // Black to move into a position where White (king a1) has no move.
        let board = board_with(&[
            (Color::White, PieceKind::King, 7, 0),
            (Color::Black, PieceKind::Queen, 4, 1),
            (Color::Black, PieceKind::King, 6, 2),
        ]);
        let mut session = GameSession::from_position(board, Color::Black);
        let outcome = session.try_play_move(4, 1, 5, 1).unwrap();
        assert_eq!(outcome.state, GameState::Stalemate);
        assert!(session.is_game_over());
        assert_eq!(session.outcome(), Some(GameState::Stalemate));
        assert_eq!(session.current_turn(), Color::Black);
        assert_eq!(session.try_play_move(6, 2, 6, 3), Err(MoveError::GameOver));

        assert!(session.undo());
        assert!(!session.is_game_over());
        assert_eq!(session.current_turn(), Color::Black);
        assert!(session.redo());
        assert!(session.is_game_over());
    }

    #[test]
    fn test_load_position_clears_history() {
        let mut session = started();
        assert!(session.play_move(6, 4, 4, 4));
        let board = board_with(&[
            (Color::Black, PieceKind::King, 0, 0),
            (Color::White, PieceKind::Queen, 1, 1),
            (Color::White, PieceKind::King, 2, 2),
        ]);
        session.load_position(&board, Color::Black, true);
        assert!(!session.can_undo());
        assert!(session.is_game_over());
        assert_eq!(session.outcome(), Some(GameState::Checkmate { winner: Color::White }));
        assert_eq!(session.board(), &board);
    }

    #[test]
    fn test_play_opponent() {
        let mut session = started();
        let mut opponent = RandomOpponent::seeded(3);
        let outcome = session.play_opponent(&mut opponent).unwrap();
        assert_eq!(session.current_turn(), Color::Black);
        assert_eq!(session.board().get(outcome.mv.to_row, outcome.mv.to_col).map(|p| p.color()), Some(Color::White));

        let mut minimax = MinimaxOpponent::new(1);
        assert!(session.play_opponent(&mut minimax).is_ok());
        assert_eq!(session.current_turn(), Color::White);
    }

    #[test]
    fn test_play_opponent_without_moves() {
        let board = board_with(&[(Color::Black, PieceKind::King, 0, 0)]);
        let mut session = GameSession::from_position(board, Color::White);
        let mut opponent = RandomOpponent::seeded(3);
        assert_eq!(session.play_opponent(&mut opponent), Err(MoveError::NoLegalMove));
    }
}
