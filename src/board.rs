use std::fmt;
use std::sync::Arc;

pub const SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Single uppercase letter used for printing and records.
    pub fn symbol(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Case-insensitive inverse of [`PieceKind::symbol`].
    pub fn from_symbol(symbol: char) -> Option<PieceKind> {
        match symbol.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'R' => Some(PieceKind::Rook),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "PAWN",
            PieceKind::Rook => "ROOK",
            PieceKind::Knight => "KNIGHT",
            PieceKind::Bishop => "BISHOP",
            PieceKind::Queen => "QUEEN",
            PieceKind::King => "KING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward pawn step. White starts on rows 6-7 and advances toward row 0.
    pub fn pawn_direction(&self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_start_row(&self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn promotion_row(&self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => SIZE - 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "WHITE",
            Color::Black => "BLACK",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// What a pawn turns into when it reaches its promotion row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionChoice {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl From<PromotionChoice> for PieceKind {
    fn from(choice: PromotionChoice) -> Self {
        match choice {
            PromotionChoice::Queen => PieceKind::Queen,
            PromotionChoice::Rook => PieceKind::Rook,
            PromotionChoice::Bishop => PieceKind::Bishop,
            PromotionChoice::Knight => PieceKind::Knight,
        }
    }
}

/// Picks the promotion piece for a pawn of `color` arriving on `(row, col)`.
///
/// Closures of the matching shape implement this automatically.
pub trait PromotionSelector: Send + Sync {
    fn select(&self, color: Color, row: usize, col: usize) -> PromotionChoice;
}

impl<F> PromotionSelector for F
where
    F: Fn(Color, usize, usize) -> PromotionChoice + Send + Sync,
{
    fn select(&self, color: Color, row: usize, col: usize) -> PromotionChoice {
        self(color, row, col)
    }
}

/// A piece on the board. Its stored position is only changed by the owning [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    row: usize,
    col: usize,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, row: usize, col: usize) -> Self {
        Self { color, kind, row, col }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = self.kind.symbol();
        match self.color {
            Color::White => write!(f, "{}", symbol),
            Color::Black => write!(f, "{}", symbol.to_ascii_lowercase()),
        }
    }
}

pub fn in_bounds(row: usize, col: usize) -> bool {
    row < SIZE && col < SIZE
}

/// The 8x8 grid. Knows nothing about rules beyond executing a move it is told to make.
pub struct Board {
    squares: [[Option<Piece>; SIZE]; SIZE],
    promotion_selector: Option<Arc<dyn PromotionSelector>>,
}

const BACK_RANK: [PieceKind; SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Standard starting layout: Black on rows 0-1, White on rows 6-7.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset_to_standard();
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [[None; SIZE]; SIZE],
            promotion_selector: None,
        }
    }

    pub fn reset_to_standard(&mut self) {
        self.clear();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            self.place(0, col, Some(Piece::new(Color::Black, *kind, 0, col)));
            self.place(1, col, Some(Piece::new(Color::Black, PieceKind::Pawn, 1, col)));
            self.place(6, col, Some(Piece::new(Color::White, PieceKind::Pawn, 6, col)));
            self.place(7, col, Some(Piece::new(Color::White, *kind, 7, col)));
        }
    }

    pub fn clear(&mut self) {
        self.squares = [[None; SIZE]; SIZE];
    }

    pub fn set_promotion_selector<S>(&mut self, selector: S)
    where
        S: PromotionSelector + 'static,
    {
        self.promotion_selector = Some(Arc::new(selector));
    }

    pub fn clear_promotion_selector(&mut self) {
        self.promotion_selector = None;
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        if !in_bounds(row, col) {
            return None;
        }
        self.squares[row][col]
    }

    /// Puts `piece` (or nothing) on `(row, col)` and syncs the piece's stored position.
    /// Out-of-range coordinates are ignored.
    pub fn place(&mut self, row: usize, col: usize, piece: Option<Piece>) {
        if !in_bounds(row, col) {
            return;
        }
        self.squares[row][col] = piece.map(|mut p| {
            p.row = row;
            p.col = col;
            p
        });
    }

    pub fn remove(&mut self, row: usize, col: usize) -> Option<Piece> {
        if !in_bounds(row, col) {
            return None;
        }
        self.squares[row][col].take()
    }

    /// Moves whatever stands on the start square to the end square without any rule check.
    /// Returns the piece that was standing on the end square. A pawn reaching its
    /// promotion row is replaced by the piece picked by the promotion selector (queen if unset).
    pub fn execute(&mut self, sr: usize, sc: usize, er: usize, ec: usize) -> Option<Piece> {
        if !in_bounds(sr, sc) || !in_bounds(er, ec) {
            return None;
        }
        let moving = self.remove(sr, sc)?;
        let captured = self.remove(er, ec);

        let arriving = if moving.kind == PieceKind::Pawn && er == moving.color.promotion_row() {
            let choice = self
                .promotion_selector
                .as_ref()
                .map(|selector| selector.select(moving.color, er, ec))
                .unwrap_or_default();
            Piece::new(moving.color, choice.into(), er, ec)
        } else {
            moving
        };
        self.place(er, ec, Some(arriving));

        captured
    }

    /// Independent copy of the grid. The promotion selector is not carried over,
    /// so trial moves on a snapshot always promote to a queen.
    pub fn snapshot(&self) -> Board {
        Board {
            squares: self.squares,
            promotion_selector: None,
        }
    }

    /// Overwrites every square with the contents of `other`. Keeps this board's selector.
    pub fn restore_from(&mut self, other: &Board) {
        for row in 0..SIZE {
            for col in 0..SIZE {
                self.place(row, col, other.get(row, col));
            }
        }
    }

    /// Pieces of `color` in row-major order.
    pub fn pieces_of(&self, color: Color) -> Vec<Piece> {
        self.pieces().filter(|p| p.color == color).collect()
    }

    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().filter_map(|square| *square)
    }

    pub fn find_king(&self, color: Color) -> Option<(usize, usize)> {
        self.pieces()
            .find(|p| p.color == color && p.kind == PieceKind::King)
            .map(|p| p.position())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Board")
            .field("squares", &self.squares)
            .field("has_promotion_selector", &self.promotion_selector.is_some())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "   a b c d e f g h")?;
        for row in 0..SIZE {
            let rank = SIZE - row;
            write!(f, "{}  ", rank)?;
            for col in 0..SIZE {
                match self.squares[row][col] {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, " {}", rank)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
