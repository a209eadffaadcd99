//! Core identifier types shared across the crate

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Number of hex digits in a canonical address
const ADDRESS_DIGITS: usize = 64;

/// Normalized on-chain address, used both for participants and object IDs.
///
/// Stored in canonical form: `0x` followed by exactly 64 lowercase hex
/// digits. Parsing accepts a bare or `0x`-prefixed hex string of up to 64
/// digits and left-pads it with zeros, so `0x2` and
/// `0x0000...0002` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and normalize an address string.
    pub fn parse(input: &str) -> Result<Self, ClientError> {
        let digits = input.strip_prefix("0x").unwrap_or(input);

        if digits.is_empty() {
            return Err(ClientError::InvalidAddress {
                message: "address is empty".to_string(),
            });
        }

        if digits.len() > ADDRESS_DIGITS {
            return Err(ClientError::InvalidAddress {
                message: format!(
                    "address has {} hex digits, expected at most {}",
                    digits.len(),
                    ADDRESS_DIGITS
                ),
            });
        }

        let padded = format!("{:0>width$}", digits.to_lowercase(), width = ADDRESS_DIGITS);

        // Canonical form is even-length, so this also rejects non-hex input.
        hex::decode(&padded).map_err(|e| ClientError::InvalidAddress {
            message: format!("address is not valid hex: {}", e),
        })?;

        Ok(Address(format!("0x{}", padded)))
    }

    /// The all-zeros address, used as the sender for read-only simulations.
    pub fn zero() -> Self {
        Address(format!("0x{}", "0".repeat(ADDRESS_DIGITS)))
    }

    /// Canonical string form (`0x` + 64 lowercase hex digits).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = ClientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Address::parse(&value)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

/// Transaction digest returned by the execution layer on acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(pub String);

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
