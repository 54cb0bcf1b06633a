pub mod board;
pub mod console;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod opponent;
pub mod record;
pub mod rules;
pub mod search;
