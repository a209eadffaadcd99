//! Per-game query state and refetch orchestration
//!
//! Replaces the reactive query/invalidation layer of a browser front end
//! with explicit request/response calls and manually triggered refetches.
//! A session owns the query state for one game view; nothing here is
//! shared between tasks.

use crate::client::game_client::GameClient;
use crate::error::{ClientError, ClientResult};
use crate::game::board::Position;
use crate::game::resolver::{Trophy, TurnIndicator, Winner};
use crate::game::state::Game;
use crate::rpc::client::RpcApi;
use crate::types::{Address, Digest};

/// State of one remote query. `Ready` goes back to `Pending` only through
/// explicit invalidation; `Failed` stays failed until the caller retries.
#[derive(Debug, Clone)]
pub enum QueryState<T> {
    Pending,
    Ready(T),
    Failed(ClientError),
}

impl<T> QueryState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            QueryState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            QueryState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// A view of one game: its decoded state and trophy flag, kept fresh by
/// explicit refetches after each confirmed write.
pub struct GameSession<R> {
    client: GameClient<R>,
    id: Address,
    game: QueryState<Game>,
    trophy: QueryState<Trophy>,
}

impl<R: RpcApi> GameSession<R> {
    pub fn new(client: GameClient<R>, id: Address) -> Self {
        Self {
            client,
            id,
            game: QueryState::Pending,
            trophy: QueryState::Pending,
        }
    }

    pub fn id(&self) -> &Address {
        &self.id
    }

    pub fn client(&self) -> &GameClient<R> {
        &self.client
    }

    pub fn game(&self) -> &QueryState<Game> {
        &self.game
    }

    pub fn trophy(&self) -> &QueryState<Trophy> {
        &self.trophy
    }

    /// Reset both queries to `Pending` so the next refresh refetches them.
    pub fn invalidate(&mut self) {
        self.game = QueryState::Pending;
        self.trophy = QueryState::Pending;
    }

    /// Fetch the game, then its trophy. The trophy query depends on the
    /// decoded game's kind, so it stays `Pending` while the game query
    /// fails.
    pub async fn refresh(&mut self) {
        match self.client.fetch_game(&self.id).await {
            Ok(game) => {
                let kind = game.kind;
                self.game = QueryState::Ready(game);

                self.trophy = match self.client.fetch_trophy(&self.id, kind).await {
                    Ok(trophy) => QueryState::Ready(trophy),
                    Err(err) => QueryState::Failed(err),
                };
            }
            Err(err) => {
                self.game = QueryState::Failed(err);
                self.trophy = QueryState::Pending;
            }
        }
    }

    /// Place a mark, and once (and only once) the move is confirmed,
    /// invalidate and refetch both queries. A move on an owned game is
    /// ignored upstream and triggers no refetch; a failed submission
    /// leaves the current view intact so the move can be retried.
    pub async fn place_mark(&mut self, position: Position) -> ClientResult<()> {
        let game = self.game.ready().ok_or_else(|| ClientError::InvalidMove {
            message: "game state has not been fetched".to_string(),
        })?;
        let kind = game.kind;

        let confirmed = self.client.place_mark(&self.id, kind, position).await?;

        if confirmed.is_some() {
            self.invalidate();
            self.refresh().await;
        }

        Ok(())
    }

    /// Delete the game. Both queries are invalidated after confirmation;
    /// they are not refetched, since the object no longer exists.
    pub async fn burn(&mut self) -> ClientResult<Digest> {
        let game = self.game.ready().ok_or_else(|| ClientError::InvalidMove {
            message: "game state has not been fetched".to_string(),
        })?;
        let kind = game.kind;

        let digest = self.client.burn(&self.id, kind).await?;
        self.invalidate();

        Ok(digest)
    }

    /// Whose turn it is, as seen by the connected player.
    pub fn turn_indicator(&self) -> Option<TurnIndicator> {
        self.game
            .ready()
            .map(|game| game.turn_indicator(self.client.signer()))
    }

    /// Who won, as seen by the connected player. `None` until both the
    /// game and trophy queries are ready.
    pub fn winner(&self) -> Option<Winner> {
        let game = self.game.ready()?;
        let trophy = *self.trophy.ready()?;
        Some(game.winner(self.client.signer(), trophy))
    }
}
