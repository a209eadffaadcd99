//! High-level game operations over the RPC client

use tracing::{error, info, warn};

use crate::client::transactions::TransactionBuilder;
use crate::error::{ClientError, ClientResult, RpcError};
use crate::game::board::Position;
use crate::game::resolver::Trophy;
use crate::game::state::{Game, Kind};
use crate::rpc::client::RpcApi;
use crate::rpc::types::{
    GetObjectParams, ObjectDataOptions, Transaction, TransactionEffects, TransactionResponse,
};
use crate::types::{Address, Digest};

/// Client for playing games against one deployed package.
///
/// `signer` is the connected player's address, or `None` for a spectator.
/// Signing itself happens in the wallet layer behind the RPC endpoint;
/// this client only names the sender.
pub struct GameClient<R> {
    rpc: R,
    builder: TransactionBuilder,
    signer: Option<Address>,
}

impl<R: RpcApi> GameClient<R> {
    pub fn new(rpc: R, package: Address, signer: Option<Address>) -> Self {
        Self {
            rpc,
            builder: TransactionBuilder::new(package),
            signer,
        }
    }

    /// The connected player, if any.
    pub fn signer(&self) -> Option<&Address> {
        self.signer.as_ref()
    }

    pub fn builder(&self) -> &TransactionBuilder {
        &self.builder
    }

    /// The underlying RPC client, for advanced operations.
    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    fn require_signer(&self) -> ClientResult<&Address> {
        self.signer.as_ref().ok_or_else(|| ClientError::Configuration {
            message: "operation requires a connected player".to_string(),
            field: "signer".to_string(),
        })
    }

    /// Fetch and decode the game with the given ID.
    pub async fn fetch_game(&self, id: &Address) -> ClientResult<Game> {
        let response = self
            .rpc
            .get_object(GetObjectParams {
                object_id: id.clone(),
                options: ObjectDataOptions::default(),
            })
            .await
            .map_err(|e| ClientError::from(e).with_context("fetching game"))?;

        Game::from_object(id, &response, self.builder.package())
    }

    /// Fetch the game's trophy state via a read-only simulation of `ended`.
    /// It does not matter who sends this query, so the zero address does.
    pub async fn fetch_trophy(&self, id: &Address, kind: Kind) -> ClientResult<Trophy> {
        let tx = self.builder.ended(id, kind);
        let results = self
            .rpc
            .dev_inspect(&Address::zero(), &tx)
            .await
            .map_err(|e| ClientError::from(e).with_context("fetching trophy"))?;

        let value = results.first_return_byte().ok_or_else(|| {
            ClientError::from(RpcError::InvalidResponse {
                message: "ended() returned no value".to_string(),
            })
        })?;

        Trophy::try_from(value)
    }

    /// Create a new game between `x` and `o`, returning the created
    /// object's ID.
    pub async fn new_game(&self, kind: Kind, x: &Address, o: &Address) -> ClientResult<Address> {
        let tx = self.builder.new_game(kind, x, o);
        let response = self.submit(&tx).await?;

        let effects = confirmed_effects(&response)?;
        let created = effects
            .created
            .first()
            .ok_or_else(|| {
                ClientError::from(RpcError::InvalidResponse {
                    message: "game creation reported no created objects".to_string(),
                })
            })?
            .reference
            .object_id
            .clone();

        info!(game = %created, %kind, "created game");
        Ok(created)
    }

    /// Place a mark at `position`. Returns the confirmation digest, or
    /// `None` when the game is an owned-variant game, whose move flow is
    /// not supported: that case performs no network calls at all.
    pub async fn place_mark(
        &self,
        id: &Address,
        kind: Kind,
        position: Position,
    ) -> ClientResult<Option<Digest>> {
        if kind == Kind::Owned {
            warn!(game = %id, "owned games are not supported yet, ignoring move");
            return Ok(None);
        }

        let tx = self.builder.place_mark(id, kind, position)?;
        let response = self.submit(&tx).await?;
        confirmed_effects(&response)?;

        info!(game = %id, row = position.row(), col = position.col(), "placed mark");
        Ok(Some(response.digest))
    }

    /// Delete a finished game.
    pub async fn burn(&self, id: &Address, kind: Kind) -> ClientResult<Digest> {
        let tx = self.builder.burn(id, kind);
        let response = self.submit(&tx).await?;
        confirmed_effects(&response)?;

        info!(game = %id, "deleted game");
        Ok(response.digest)
    }

    /// Submit a transaction and wait for its confirmation. Failures are
    /// logged and propagated; the caller decides whether to retry.
    async fn submit(&self, tx: &Transaction) -> ClientResult<TransactionResponse> {
        let sender = self.require_signer()?;

        let accepted = self.rpc.execute_transaction(sender, tx).await.map_err(|e| {
            error!(error = %e, "failed to execute transaction");
            ClientError::from(e).with_context("submitting transaction")
        })?;

        self.rpc
            .wait_for_transaction(&accepted.digest)
            .await
            .map_err(|e| {
                error!(digest = %accepted.digest, error = %e, "confirmation failed");
                ClientError::from(e).with_context("confirming transaction")
            })
    }
}

/// Effects of a confirmed transaction, or an execution error if the
/// transaction ran and failed.
fn confirmed_effects(response: &TransactionResponse) -> ClientResult<&TransactionEffects> {
    let effects = response.effects.as_ref().ok_or_else(|| {
        ClientError::from(RpcError::InvalidResponse {
            message: "confirmed transaction carried no effects".to_string(),
        })
    })?;

    if !effects.status.is_success() {
        return Err(ClientError::Execution {
            digest: response.digest.clone(),
            message: effects
                .status
                .error
                .clone()
                .unwrap_or_else(|| "execution failed".to_string()),
        });
    }

    Ok(effects)
}
