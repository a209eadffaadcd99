//! Board, marks and positions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// A single cell on the board. Encoded on the wire as 0 (empty), 1 (X)
/// or 2 (O).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Mark {
    Empty,
    X,
    O,
}

impl TryFrom<u8> for Mark {
    type Error = ClientError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mark::Empty),
            1 => Ok(Mark::X),
            2 => Ok(Mark::O),
            other => Err(ClientError::Serialization {
                message: format!("invalid mark value {}", other),
            }),
        }
    }
}

impl From<Mark> for u8 {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Empty => 0,
            Mark::X => 1,
            Mark::O => 2,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Empty => f.write_str("."),
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

/// The 3x3 game board: 9 marks in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Board([Mark; 9]);

impl Board {
    pub fn empty() -> Self {
        Board([Mark::Empty; 9])
    }

    pub fn get(&self, position: Position) -> Mark {
        self.0[position.index()]
    }

    /// Number of non-empty cells. Matches the turn counter on a
    /// well-formed game.
    pub fn mark_count(&self) -> u8 {
        self.0.iter().filter(|m| **m != Mark::Empty).count() as u8
    }

    /// Rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Mark]> {
        self.0.chunks(3)
    }

    pub fn cells(&self) -> &[Mark; 9] {
        &self.0
    }

    #[cfg(test)]
    pub fn from_marks(marks: [Mark; 9]) -> Self {
        Board(marks)
    }
}

impl TryFrom<Vec<u8>> for Board {
    type Error = ClientError;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        if values.len() != 9 {
            return Err(ClientError::Serialization {
                message: format!("board has {} cells, expected 9", values.len()),
            });
        }

        let mut cells = [Mark::Empty; 9];
        for (cell, value) in cells.iter_mut().zip(values) {
            *cell = Mark::try_from(value)?;
        }

        Ok(Board(cells))
    }
}

impl From<Board> for Vec<u8> {
    fn from(board: Board) -> Self {
        board.0.iter().map(|m| u8::from(*m)).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f, "---+---+---")?;
            }
            writeln!(f, " {} | {} | {}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

/// A cell coordinate: row and column, both in `0..3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> ClientResult<Self> {
        if row >= 3 || col >= 3 {
            return Err(ClientError::InvalidMove {
                message: format!("position ({}, {}) is off the board", row, col),
            });
        }
        Ok(Position { row, col })
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Row-major index into the board.
    pub fn index(&self) -> usize {
        (self.row * 3 + self.col) as usize
    }
}
