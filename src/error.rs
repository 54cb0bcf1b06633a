use thiserror::Error;

use crate::board::Color;

/// Why a move request was rejected. A rejected move never changes the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,
    #[error("square is off the board")]
    OutOfBounds,
    #[error("no piece at row {row}, column {col}")]
    NoPiece { row: usize, col: usize },
    #[error("it is not {color}'s turn")]
    WrongTurn { color: Color },
    #[error("the piece cannot move there")]
    IllegalMove,
    #[error("the move would leave the king in check")]
    LeavesKingInCheck,
    #[error("no legal move available")]
    NoLegalMove,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid square `{0}`")]
    InvalidSquare(String),
    #[error("invalid move `{0}`")]
    InvalidMove(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected 3 fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("row {row} describes {squares} squares instead of 8")]
    RankLength { row: usize, squares: usize },
    #[error("unknown piece symbol `{0}`")]
    UnknownPiece(char),
    #[error("unknown side to move `{0}`")]
    UnknownSide(String),
    #[error("unknown game status `{0}`")]
    UnknownStatus(String),
}
