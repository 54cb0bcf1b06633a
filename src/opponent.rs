use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{Board, Color};
use crate::movegen::{Move, MoveGenerator};
use crate::search::{Search, SearchConfig};

/// Something that picks a move for `side`. Returns `None` when there is no legal move.
pub trait Opponent {
    fn choose_move(&mut self, board: &Board, side: Color) -> Option<Move>;
}

/// Negamax opponent with a fixed search depth.
pub struct MinimaxOpponent {
    search: Search,
}

impl MinimaxOpponent {
    pub fn new(depth: u32) -> Self {
        Self {
            search: Search::with_config(SearchConfig::default().with_max_depth(depth)),
        }
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            search: Search::with_config(config),
        }
    }

    pub fn depth(&self) -> u32 {
        self.search.config().max_depth
    }

    pub fn nodes_searched(&self) -> u64 {
        self.search.get_nodes_searched()
    }
}

impl Opponent for MinimaxOpponent {
    fn choose_move(&mut self, board: &Board, side: Color) -> Option<Move> {
        self.search.find_best_move(board, side)
    }
}

/// Plays a uniformly random legal move.
pub struct RandomOpponent {
    rng: StdRng,
    move_generator: MoveGenerator,
}

impl RandomOpponent {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible sequence of choices for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            move_generator: MoveGenerator::new(),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for RandomOpponent {
    fn choose_move(&mut self, board: &Board, side: Color) -> Option<Move> {
        let moves = self.move_generator.generate_moves(board, side);
        moves.choose(&mut self.rng).copied()
    }
}
