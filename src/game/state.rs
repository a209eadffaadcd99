//! Game state, decoded from its on-chain object

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ClientError, ClientResult};
use crate::game::board::Board;
use crate::rpc::types::ObjectResponse;
use crate::types::Address;

/// Variants of the tic-tac-toe protocol. A `Shared` game is an object both
/// players can mutate directly; an `Owned` game requires a multi-party
/// authorization flow for each move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Shared,
    Owned,
}

impl Kind {
    /// On-chain module implementing this variant.
    pub fn module(&self) -> &'static str {
        match self {
            Kind::Shared => "shared",
            Kind::Owned => "owned",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.module())
    }
}

impl FromStr for Kind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shared" => Ok(Kind::Shared),
            "owned" => Ok(Kind::Owned),
            other => Err(ClientError::Serialization {
                message: format!("unknown game kind '{}'", other),
            }),
        }
    }
}

/// Serialized field layout of a game object.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GameFields {
    board: Board,
    turn: u8,
    x: Address,
    o: Address,
}

/// State of a game, decoded from its fetched object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// Whether this is a `shared` or an `owned` game
    pub kind: Kind,
    /// Current state of the board
    pub board: Board,
    /// Number of turns played so far
    pub turn: u8,
    /// Address of the player controlling X
    pub x: Address,
    /// Address of the player controlling O
    pub o: Address,
}

/// Anchored pattern matching the game types exported by a package.
fn game_type_pattern(package: &Address) -> ClientResult<Regex> {
    // The package address is canonical hex, so it needs no escaping.
    Regex::new(&format!("^{}::(shared|owned)::Game", package)).map_err(|e| {
        ClientError::Configuration {
            message: format!("failed to build game type pattern: {}", e),
            field: "package_id".to_string(),
        }
    })
}

impl Game {
    /// Decode a game from a fetched object response.
    ///
    /// Fails with [`ClientError::NotFound`] when the object does not exist
    /// and [`ClientError::WrongType`] when it exists but is not a game
    /// published by `package`, for either protocol variant.
    pub fn from_object(
        id: &Address,
        response: &ObjectResponse,
        package: &Address,
    ) -> ClientResult<Game> {
        if let Some(err) = &response.error {
            if err.is_not_exists() {
                return Err(ClientError::NotFound { id: id.clone() });
            }
            return Err(ClientError::WrongType {
                id: id.clone(),
                message: format!("object fetch failed with code '{}'", err.code),
            });
        }

        let data = response
            .data
            .as_ref()
            .ok_or_else(|| ClientError::NotFound { id: id.clone() })?;

        let object_type =
            data.object_type
                .as_deref()
                .ok_or_else(|| ClientError::WrongType {
                    id: id.clone(),
                    message: "object has no type information".to_string(),
                })?;

        let captures = game_type_pattern(package)?
            .captures(object_type)
            .ok_or_else(|| ClientError::WrongType {
                id: id.clone(),
                message: format!("object has type {}", object_type),
            })?;

        // The pattern guarantees the capture is one of the two module names.
        let kind = Kind::from_str(&captures[1])?;

        let content = data.content.as_ref().ok_or_else(|| ClientError::WrongType {
            id: id.clone(),
            message: "object has no content".to_string(),
        })?;

        if content.data_type != "moveObject" {
            return Err(ClientError::WrongType {
                id: id.clone(),
                message: format!("object content is '{}', not a move object", content.data_type),
            });
        }

        let fields: GameFields = serde_json::from_value(content.fields.clone())?;

        let game = Game {
            kind,
            board: fields.board,
            turn: fields.turn,
            x: fields.x,
            o: fields.o,
        };
        game.check_consistency(id)?;

        Ok(game)
    }

    /// Well-formedness of the decoded state: the turn counter matches the
    /// number of marks on the board and never exceeds the board size.
    fn check_consistency(&self, id: &Address) -> ClientResult<()> {
        if self.turn > 9 {
            return Err(ClientError::WrongType {
                id: id.clone(),
                message: format!("turn counter {} exceeds board size", self.turn),
            });
        }

        let marks = self.board.mark_count();
        if marks != self.turn {
            return Err(ClientError::WrongType {
                id: id.clone(),
                message: format!(
                    "board has {} marks but turn counter is {}",
                    marks, self.turn
                ),
            });
        }

        Ok(())
    }

    /// The player whose turn it is now. X moves on even turns, O on odd.
    pub fn current_player(&self) -> &Address {
        if self.turn % 2 == 0 {
            &self.x
        } else {
            &self.o
        }
    }

    /// The player who moves after the current one.
    pub fn next_player(&self) -> &Address {
        if self.turn % 2 == 0 {
            &self.o
        } else {
            &self.x
        }
    }

    /// Re-serialize to the on-chain field layout.
    pub fn to_fields(&self) -> serde_json::Value {
        json!({
            "board": Vec::<u8>::from(self.board.clone()),
            "turn": self.turn,
            "x": self.x,
            "o": self.o,
        })
    }
}
