use crate::board::{Board, Color};
use crate::evaluation::Evaluator;
use crate::movegen::{Move, MoveGenerator};

/// Score of a side that is checkmated, far outside any material balance.
pub const MATE_SCORE: i32 = 100_000;
const INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u32,
    /// Stop trying further root moves once this many nodes were visited.
    pub max_nodes: Option<u64>,
}

impl SearchConfig {
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    pub fn with_max_nodes(mut self, nodes: Option<u64>) -> Self {
        self.max_nodes = nodes;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_nodes: None,
        }
    }
}

/// Fixed-depth negamax with alpha-beta pruning over board snapshots.
pub struct Search {
    evaluator: Evaluator,
    move_generator: MoveGenerator,
    config: SearchConfig,
    nodes_searched: u64,
}

impl Search {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            evaluator: Evaluator::new(),
            move_generator: MoveGenerator::new(),
            config: config.with_max_depth(config.max_depth),
            nodes_searched: 0,
        }
    }

    /// Best move for `side`, or `None` when `side` has no legal move.
    /// Among equally scored moves the first one generated wins.
    pub fn find_best_move(&mut self, board: &Board, side: Color) -> Option<Move> {
        self.nodes_searched = 0;

        let mut best_move = None;
        let mut best_score = -INFINITY;
        let mut alpha = -INFINITY;
        let beta = INFINITY;

        for mv in self.move_generator.generate_moves(board, side) {
            if best_move.is_some() && self.budget_exhausted() {
                break;
            }

            let mut board_copy = board.snapshot();
            board_copy.execute(mv.from_row, mv.from_col, mv.to_row, mv.to_col);

            let score = -self.negamax(&board_copy, side.opposite(), self.config.max_depth - 1, -beta, -alpha);

            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
        }

        best_move
    }

    fn negamax(&mut self, board: &Board, to_move: Color, depth: u32, mut alpha: i32, beta: i32) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 {
            if !self.move_generator.has_any_legal_move(board, to_move) {
                return self.terminal_score(board, to_move);
            }
            return self.evaluator.evaluate(board, to_move);
        }

        let moves = self.move_generator.generate_moves(board, to_move);
        if moves.is_empty() {
            return self.terminal_score(board, to_move);
        }

        let mut best_score = -INFINITY;
        for mv in moves {
            let mut board_copy = board.snapshot();
            board_copy.execute(mv.from_row, mv.from_col, mv.to_row, mv.to_col);

            let score = -self.negamax(&board_copy, to_move.opposite(), depth - 1, -beta, -alpha);

            best_score = best_score.max(score);
            alpha = alpha.max(score);

            // Alpha-beta pruning
            if alpha >= beta {
                break;
            }
        }

        best_score
    }

    /// Score for a side with no legal move: mated or stalemated.
    fn terminal_score(&self, board: &Board, to_move: Color) -> i32 {
        if self.move_generator.is_in_check(board, to_move) {
            -MATE_SCORE
        } else {
            0
        }
    }

    fn budget_exhausted(&self) -> bool {
        self.config
            .max_nodes
            .map_or(false, |limit| self.nodes_searched >= limit)
    }

    pub fn set_max_depth(&mut self, depth: u32) {
        self.config.max_depth = depth.max(1);
    }

    pub fn set_max_nodes(&mut self, nodes: Option<u64>) {
        self.config.max_nodes = nodes;
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn get_nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}
