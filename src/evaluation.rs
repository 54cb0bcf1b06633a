use crate::board::{Board, Color, PieceKind};
use crate::movegen::MoveGenerator;

pub struct Evaluator {
    // Piece values
    pub pawn_value: i32,
    pub knight_value: i32,
    pub bishop_value: i32,
    pub rook_value: i32,
    pub queen_value: i32,
    pub king_value: i32,

    // Subtracted when the evaluated side stands in check
    pub check_penalty: i32,

    move_generator: MoveGenerator,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            pawn_value: 100,
            knight_value: 300,
            bishop_value: 300,
            rook_value: 500,
            queen_value: 900,
            king_value: 0,
            check_penalty: 10,
            move_generator: MoveGenerator::new(),
        }
    }

    pub fn piece_value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.pawn_value,
            PieceKind::Knight => self.knight_value,
            PieceKind::Bishop => self.bishop_value,
            PieceKind::Rook => self.rook_value,
            PieceKind::Queen => self.queen_value,
            PieceKind::King => self.king_value,
        }
    }

    /// Material balance, positive when White is ahead.
    pub fn material(&self, board: &Board) -> i32 {
        board
            .pieces()
            .map(|piece| {
                let value = self.piece_value(piece.kind());
                match piece.color() {
                    Color::White => value,
                    Color::Black => -value,
                }
            })
            .sum()
    }

    /// Score from `perspective`'s point of view: positive is good for that side.
    pub fn evaluate(&self, board: &Board, perspective: Color) -> i32 {
        let material = self.material(board);
        let score = match perspective {
            Color::White => material,
            Color::Black => -material,
        };

        if self.move_generator.is_in_check(board, perspective) {
            score - self.check_penalty
        } else {
            score
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    #[test]
    fn test_start_position_is_balanced() {
        let evaluator = Evaluator::new();
        let board = Board::new();
        assert_eq!(evaluator.material(&board), 0);
        assert_eq!(evaluator.evaluate(&board, Color::White), 0);
        assert_eq!(evaluator.evaluate(&board, Color::Black), 0);
    }

    #[test]
    fn test_perspective_and_check_penalty() {
        let evaluator = Evaluator::new();
        let mut board = Board::empty();
        board.place(7, 4, Some(Piece::new(Color::White, PieceKind::King, 7, 4)));
        board.place(0, 0, Some(Piece::new(Color::Black, PieceKind::King, 0, 0)));
        board.place(0, 4, Some(Piece::new(Color::Black, PieceKind::Rook, 0, 4)));
        board.place(5, 5, Some(Piece::new(Color::White, PieceKind::Knight, 5, 5)));
        board.place(5, 6, Some(Piece::new(Color::White, PieceKind::Pawn, 5, 6)));

        assert_eq!(evaluator.material(&board), -100);
        // White is in check from the rook on the e-file.
        assert_eq!(evaluator.evaluate(&board, Color::White), -110);
        assert_eq!(evaluator.evaluate(&board, Color::Black), 100);
    }
}
