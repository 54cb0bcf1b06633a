//! Flat save record of a session: what stands on every square, whose turn it is
//! and whether the game is over. Reading and writing files is left to the caller.
//!
//! Text form is a single line, rows listed from row 0:
//!
//! ```text
//! rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w -
//! ```
//!
//! Uppercase letters are White, digits count empty squares, the last field is
//! `-` for a running game and `over` for a finished one.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Color, Piece, PieceKind, SIZE};
use crate::error::RecordError;
use crate::game::GameSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    squares: [[Option<(Color, PieceKind)>; SIZE]; SIZE],
    side_to_move: Color,
    game_over: bool,
}

impl GameRecord {
    pub fn capture(session: &GameSession) -> Self {
        let mut squares = [[None; SIZE]; SIZE];
        for piece in session.board().pieces() {
            squares[piece.row()][piece.col()] = Some((piece.color(), piece.kind()));
        }
        Self {
            squares,
            side_to_move: session.current_turn(),
            game_over: session.is_game_over(),
        }
    }

    /// Rebuilds the board and flags on `session` and drops its undo/redo history.
    pub fn apply_to(&self, session: &mut GameSession) {
        session.load_position(&self.to_board(), self.side_to_move, self.game_over);
    }

    pub fn to_board(&self) -> Board {
        let mut board = Board::empty();
        for (row, cells) in self.squares.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Some((color, kind)) = *cell {
                    board.place(row, col, Some(Piece::new(color, kind, row, col)));
                }
            }
        }
        board
    }

    /// `WHITE_KING` style token of a square, `None` when empty or off the board.
    pub fn square(&self, row: usize, col: usize) -> Option<String> {
        let (color, kind) = (*self.squares.get(row)?.get(col)?)?;
        Some(format!("{}_{}", color.name(), kind.name()))
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (row, cells) in self.squares.iter().enumerate() {
            if row > 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for cell in cells {
                match cell {
                    Some((color, kind)) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        let symbol = kind.symbol();
                        match color {
                            Color::White => write!(f, "{}", symbol)?,
                            Color::Black => write!(f, "{}", symbol.to_ascii_lowercase())?,
                        }
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
        }

        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let status = if self.game_over { "over" } else { "-" };
        write!(f, " {} {}", side, status)
    }
}

impl FromStr for GameRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        let [placement, side, status] = fields[..] else {
            return Err(RecordError::FieldCount(fields.len()));
        };

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != SIZE {
            return Err(RecordError::RankCount(ranks.len()));
        }

        let mut squares = [[None; SIZE]; SIZE];
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0;
            for symbol in rank.chars() {
                if let Some(run) = symbol.to_digit(10) {
                    col += run as usize;
                    continue;
                }
                let kind = PieceKind::from_symbol(symbol).ok_or(RecordError::UnknownPiece(symbol))?;
                let color = if symbol.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if col < SIZE {
                    squares[row][col] = Some((color, kind));
                }
                col += 1;
            }
            if col != SIZE {
                return Err(RecordError::RankLength { row, squares: col });
            }
        }

        let side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(RecordError::UnknownSide(other.to_string())),
        };
        let game_over = match status {
            "-" => false,
            "over" => true,
            other => return Err(RecordError::UnknownStatus(other.to_string())),
        };

        Ok(Self {
            squares,
            side_to_move,
            game_over,
        })
    }
}
