//! Game domain types: board, decoded state and turn/outcome resolution

pub mod board;
pub mod resolver;
pub mod state;

pub use board::{Board, Mark, Position};
pub use resolver::{turn_indicator, winner, Trophy, TurnIndicator, Winner};
pub use state::{Game, Kind};
