//! Client interfaces: transaction building, game operations and sessions

pub mod game_client;
pub mod session;
pub mod transactions;

pub use game_client::GameClient;
pub use session::{GameSession, QueryState};
pub use transactions::TransactionBuilder;
