//! Transaction construction for the game package entry points

use serde_json::json;

use crate::error::{ClientError, ClientResult};
use crate::game::board::Position;
use crate::game::state::Kind;
use crate::rpc::types::{CallArg, MoveCall, Transaction};
use crate::types::Address;

/// Builds call descriptions against one deployed game package. Entry-point
/// names (`new`, `place_mark`, `ended`, `burn`) are part of the on-chain
/// contract.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    package: Address,
}

impl TransactionBuilder {
    pub fn new(package: Address) -> Self {
        Self { package }
    }

    pub fn package(&self) -> &Address {
        &self.package
    }

    fn target(&self, kind: Kind, function: &str) -> String {
        format!("{}::{}::{}", self.package, kind.module(), function)
    }

    /// Create a new game between `x` and `o`.
    pub fn new_game(&self, kind: Kind, x: &Address, o: &Address) -> Transaction {
        Transaction::single(MoveCall {
            target: self.target(kind, "new"),
            arguments: vec![
                CallArg::Pure(json!(x)),
                CallArg::Pure(json!(o)),
            ],
        })
    }

    /// Place a mark on a shared game. The owned variant needs a multi-party
    /// authorization flow that is not implemented, so building the call for
    /// it is refused outright.
    pub fn place_mark(
        &self,
        game: &Address,
        kind: Kind,
        position: Position,
    ) -> ClientResult<Transaction> {
        if kind == Kind::Owned {
            return Err(ClientError::UnsupportedOperation {
                message: "moves on owned games require a multi-party flow".to_string(),
            });
        }

        Ok(Transaction::single(MoveCall {
            target: self.target(kind, "place_mark"),
            arguments: vec![
                CallArg::Object(game.clone()),
                CallArg::Pure(json!(position.row())),
                CallArg::Pure(json!(position.col())),
            ],
        }))
    }

    /// Read-only query for the game's trophy state.
    pub fn ended(&self, game: &Address, kind: Kind) -> Transaction {
        Transaction::single(MoveCall {
            target: self.target(kind, "ended"),
            arguments: vec![CallArg::Object(game.clone())],
        })
    }

    /// Delete a finished game.
    pub fn burn(&self, game: &Address, kind: Kind) -> Transaction {
        Transaction::single(MoveCall {
            target: self.target(kind, "burn"),
            arguments: vec![CallArg::Object(game.clone())],
        })
    }
}
