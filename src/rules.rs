//! Per-piece movement geometry.
//!
//! [`can_move`] answers "may the piece on the start square go to the end square",
//! ignoring whose turn it is and whether the mover's king ends up in check.
//! [`attacks`] answers "does that piece threaten the end square", which only
//! differs for pawns (diagonals threatened even when empty) and kings.

use crate::board::{in_bounds, Board, Color, Piece, PieceKind};

pub fn can_move(board: &Board, sr: usize, sc: usize, er: usize, ec: usize) -> bool {
    let Some(piece) = board.get(sr, sc) else {
        return false;
    };
    if !in_bounds(er, ec) || (sr, sc) == (er, ec) {
        return false;
    }
    if let Some(target) = board.get(er, ec) {
        if target.color() == piece.color() {
            return false;
        }
    }

    let (dr, dc) = delta(sr, sc, er, ec);
    match piece.kind() {
        PieceKind::Pawn => pawn_can_move(board, &piece, er, ec, dr, dc),
        PieceKind::Rook => is_straight(dr, dc) && is_path_clear(board, sr, sc, er, ec),
        PieceKind::Bishop => is_diagonal(dr, dc) && is_path_clear(board, sr, sc, er, ec),
        PieceKind::Queen => {
            (is_straight(dr, dc) || is_diagonal(dr, dc)) && is_path_clear(board, sr, sc, er, ec)
        }
        PieceKind::Knight => is_knight_jump(dr, dc),
        PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
    }
}

pub fn attacks(board: &Board, sr: usize, sc: usize, er: usize, ec: usize) -> bool {
    let Some(piece) = board.get(sr, sc) else {
        return false;
    };
    if !in_bounds(er, ec) || (sr, sc) == (er, ec) {
        return false;
    }

    let (dr, dc) = delta(sr, sc, er, ec);
    match piece.kind() {
        PieceKind::Pawn => dr == piece.color().pawn_direction() && dc.abs() == 1,
        PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
        _ => can_move(board, sr, sc, er, ec),
    }
}

/// True when every square strictly between start and end is empty.
/// Only meaningful for straight or diagonal lines; anything else is reported blocked.
pub fn is_path_clear(board: &Board, sr: usize, sc: usize, er: usize, ec: usize) -> bool {
    if !in_bounds(sr, sc) || !in_bounds(er, ec) || (sr, sc) == (er, ec) {
        return false;
    }
    let (dr, dc) = delta(sr, sc, er, ec);
    if !is_straight(dr, dc) && !is_diagonal(dr, dc) {
        return false;
    }

    let (step_r, step_c) = (dr.signum(), dc.signum());
    let (mut r, mut c) = (sr as i32 + step_r, sc as i32 + step_c);
    while (r, c) != (er as i32, ec as i32) {
        if board.get(r as usize, c as usize).is_some() {
            return false;
        }
        r += step_r;
        c += step_c;
    }
    true
}

fn pawn_can_move(board: &Board, pawn: &Piece, er: usize, ec: usize, dr: i32, dc: i32) -> bool {
    let color = pawn.color();
    let direction = color.pawn_direction();
    let target = board.get(er, ec);

    if dc == 0 {
        if target.is_some() {
            return false;
        }
        if dr == direction {
            return true;
        }
        // Double step: the skipped square must be empty too.
        if dr == 2 * direction && pawn.row() == color.pawn_start_row() {
            let mid_row = (pawn.row() as i32 + direction) as usize;
            return board.get(mid_row, pawn.col()).is_none();
        }
        return false;
    }

    dc.abs() == 1 && dr == direction && is_enemy(target, color)
}

fn is_enemy(target: Option<Piece>, color: Color) -> bool {
    target.map_or(false, |p| p.color() != color)
}

fn delta(sr: usize, sc: usize, er: usize, ec: usize) -> (i32, i32) {
    (er as i32 - sr as i32, ec as i32 - sc as i32)
}

fn is_straight(dr: i32, dc: i32) -> bool {
    dr == 0 || dc == 0
}

fn is_diagonal(dr: i32, dc: i32) -> bool {
    dr.abs() == dc.abs()
}

fn is_knight_jump(dr: i32, dc: i32) -> bool {
    matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2))
}
