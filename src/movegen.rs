use crate::board::{in_bounds, Board, Color, SIZE};
use crate::rules;

/// A move request: start and end squares, validated fresh on every use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from_row: usize,
    pub from_col: usize,
    pub to_row: usize,
    pub to_col: usize,
}

impl Move {
    pub fn new(from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> Self {
        Self {
            from_row,
            from_col,
            to_row,
            to_col,
        }
    }

    pub fn from(&self) -> (usize, usize) {
        (self.from_row, self.from_col)
    }

    pub fn to(&self) -> (usize, usize) {
        (self.to_row, self.to_col)
    }

    /// Both squares on the board and not the same square.
    pub fn is_valid(&self) -> bool {
        in_bounds(self.from_row, self.from_col)
            && in_bounds(self.to_row, self.to_col)
            && self.from() != self.to()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ongoing,
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::Checkmate { .. } | GameState::Stalemate)
    }
}

/// Check detection and legal move generation. Never mutates the board it is given;
/// trial moves are played on snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn is_square_attacked(&self, board: &Board, row: usize, col: usize, by_color: Color) -> bool {
        board
            .pieces_of(by_color)
            .iter()
            .any(|p| rules::attacks(board, p.row(), p.col(), row, col))
    }

    /// A side without a king on the board is never in check.
    pub fn is_in_check(&self, board: &Board, color: Color) -> bool {
        match board.find_king(color) {
            Some((row, col)) => self.is_square_attacked(board, row, col, color.opposite()),
            None => false,
        }
    }

    /// Plays `mv` on a snapshot and reports whether the mover's own king is then attacked.
    /// Returns false when the start square is empty.
    pub fn leaves_king_in_check(&self, board: &Board, mv: &Move) -> bool {
        let Some(piece) = board.get(mv.from_row, mv.from_col) else {
            return false;
        };
        let mut trial = board.snapshot();
        trial.execute(mv.from_row, mv.from_col, mv.to_row, mv.to_col);
        self.is_in_check(&trial, piece.color())
    }

    /// Pseudo-legal for the piece on the start square and safe for its own king.
    pub fn is_move_legal(&self, board: &Board, mv: &Move) -> bool {
        rules::can_move(board, mv.from_row, mv.from_col, mv.to_row, mv.to_col)
            && !self.leaves_king_in_check(board, mv)
    }

    pub fn has_any_legal_move(&self, board: &Board, color: Color) -> bool {
        self.legal_moves(board, color).next().is_some()
    }

    pub fn is_checkmate(&self, board: &Board, color: Color) -> bool {
        self.is_in_check(board, color) && !self.has_any_legal_move(board, color)
    }

    pub fn is_stalemate(&self, board: &Board, color: Color) -> bool {
        !self.is_in_check(board, color) && !self.has_any_legal_move(board, color)
    }

    /// All legal moves for `color`: pieces in row-major order, destinations by row then column.
    pub fn generate_moves(&self, board: &Board, color: Color) -> Vec<Move> {
        self.legal_moves(board, color).collect()
    }

    /// State of the game from the point of view of `color` being the side to move.
    pub fn game_state(&self, board: &Board, color: Color) -> GameState {
        let in_check = self.is_in_check(board, color);
        let can_move = self.has_any_legal_move(board, color);
        match (in_check, can_move) {
            (true, false) => GameState::Checkmate {
                winner: color.opposite(),
            },
            (false, false) => GameState::Stalemate,
            (true, true) => GameState::Check,
            (false, true) => GameState::Ongoing,
        }
    }

    fn legal_moves<'a>(&'a self, board: &'a Board, color: Color) -> impl Iterator<Item = Move> + 'a {
        board.pieces_of(color).into_iter().flat_map(move |piece| {
            (0..SIZE)
                .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
                .map(move |(row, col)| Move::new(piece.row(), piece.col(), row, col))
                .filter(move |mv| self.is_move_legal(board, mv))
        })
    }
}
