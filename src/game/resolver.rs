//! Turn and outcome derivation
//!
//! Pure functions from decoded game state, the viewer's address and the
//! independently fetched trophy flag to what the interface should show.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::game::state::Game;
use crate::types::Address;

/// Terminal-state flag of a game, fetched independently of the board via
/// the `ended` entry point. Once `Draw` or `Win`, the board is immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Trophy {
    None,
    Draw,
    Win,
}

impl TryFrom<u8> for Trophy {
    type Error = ClientError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Trophy::None),
            1 => Ok(Trophy::Draw),
            2 => Ok(Trophy::Win),
            other => Err(ClientError::Serialization {
                message: format!("invalid trophy value {}", other),
            }),
        }
    }
}

impl From<Trophy> for u8 {
    fn from(trophy: Trophy) -> Self {
        match trophy {
            Trophy::None => 0,
            Trophy::Draw => 1,
            Trophy::Win => 2,
        }
    }
}

/// Whose turn it is, from the viewer's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnIndicator {
    /// The viewer moves now
    Yours,
    /// The viewer's opponent moves now
    Theirs,
    /// The viewer is not a player, or no viewer is connected
    Spectating,
}

/// Who won, from the viewer's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// Game still in progress
    None,
    /// Game over, nobody won
    Draw,
    /// The viewer won
    You,
    /// The viewer's opponent won
    Them,
    /// Spectator view: X won
    X,
    /// Spectator view: O won
    O,
}

/// Whose turn it is. An absent viewer is always spectating; a viewer
/// playing both sides is reported as `Yours` first.
pub fn turn_indicator(
    current: &Address,
    next: &Address,
    viewer: Option<&Address>,
) -> TurnIndicator {
    match viewer {
        Some(v) if v == current => TurnIndicator::Yours,
        Some(v) if v == next => TurnIndicator::Theirs,
        _ => TurnIndicator::Spectating,
    }
}

/// Who won, given the trophy state observed after the final move.
///
/// The winning move advances the turn counter before the trophy is
/// observed, swapping current and next. The winner is therefore the
/// previous mover, stored as `next` at observation time. The `You` check
/// precedes `Them` so a viewer playing both sides sees their win.
pub fn winner(
    current: &Address,
    next: &Address,
    viewer: Option<&Address>,
    turn: u8,
    trophy: Trophy,
) -> Winner {
    match trophy {
        Trophy::None => Winner::None,
        Trophy::Draw => Winner::Draw,
        Trophy::Win => match viewer {
            Some(v) if v == next => Winner::You,
            Some(v) if v == current => Winner::Them,
            // Spectator: the previous mover by parity. On an even turn X
            // would move now, so O made the winning move.
            _ if turn % 2 == 0 => Winner::O,
            _ => Winner::X,
        },
    }
}

impl Game {
    /// Whose turn it is, as seen by `viewer`.
    pub fn turn_indicator(&self, viewer: Option<&Address>) -> TurnIndicator {
        turn_indicator(self.current_player(), self.next_player(), viewer)
    }

    /// Who won, as seen by `viewer`, given the fetched trophy state.
    pub fn winner(&self, viewer: Option<&Address>, trophy: Trophy) -> Winner {
        winner(
            self.current_player(),
            self.next_player(),
            viewer,
            self.turn,
            trophy,
        )
    }
}
