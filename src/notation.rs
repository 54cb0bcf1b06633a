//! Algebraic coordinates. Row 0 is rank 8 and column 0 is file a, so `a8` is `(0, 0)`
//! and `h1` is `(7, 7)`.

use std::fmt;
use std::str::FromStr;

use crate::board::{in_bounds, SIZE};
use crate::error::NotationError;
use crate::movegen::Move;

/// `"e2"` style name of a square, or `"??"` when it is off the board.
pub fn square_name(row: usize, col: usize) -> String {
    if !in_bounds(row, col) {
        return "??".to_string();
    }
    let file = (b'a' + col as u8) as char;
    let rank = SIZE - row;
    format!("{}{}", file, rank)
}

pub fn parse_square(s: &str) -> Result<(usize, usize), NotationError> {
    let invalid = || NotationError::InvalidSquare(s.to_string());
    let mut chars = s.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(invalid());
    };

    let file = file.to_ascii_lowercase();
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return Err(invalid());
    }
    let col = (file as u8 - b'a') as usize;
    let row = SIZE - (rank as u8 - b'0') as usize;
    Ok((row, col))
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            square_name(self.from_row, self.from_col),
            square_name(self.to_row, self.to_col)
        )
    }
}

impl FromStr for Move {
    type Err = NotationError;

    /// Accepts `e2-e4` and `e2e4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (from, to) = match s.split_once('-') {
            Some(parts) => parts,
            None if s.len() == 4 && s.is_ascii() => s.split_at(2),
            None => return Err(NotationError::InvalidMove(s.to_string())),
        };
        let (from_row, from_col) = parse_square(from)?;
        let (to_row, to_col) = parse_square(to)?;
        Ok(Move::new(from_row, from_col, to_row, to_col))
    }
}
