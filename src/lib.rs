//! Noughts - a client for tic-tac-toe games that live on a blockchain
//!
//! The game itself runs as objects inside an external execution layer;
//! this crate handles everything on the player's side of the wire:
//! - Fetching and decoding game objects over JSON-RPC
//! - Deriving whose turn it is and who won from decoded state
//! - Building and submitting move, creation and deletion transactions
//! - Refetching state once a write is confirmed

pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod rpc;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{ClientError, ClientResult, RpcError};

// Re-export core game types
pub use game::{Board, Game, Kind, Mark, Position, Trophy, TurnIndicator, Winner};

// Re-export client interfaces
pub use client::{GameClient, GameSession, QueryState, TransactionBuilder};

// Re-export configuration interfaces
pub use config::{ClientConfig, NetworkConfig};

// Re-export the RPC seam
pub use rpc::{RpcApi, RpcClient};

// Re-export identifier types
pub use types::{Address, Digest};
