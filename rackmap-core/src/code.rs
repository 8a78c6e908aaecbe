use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of characters in a location code: aisle(2) + slot(3) + level(2).
pub const CODE_LEN: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeError {
    #[error("invalid location code {0:?}: expected exactly 7 ASCII digits")]
    InvalidCode(String),
}

/// A validated 7-digit location code `AASSSLL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationCode(String);

impl LocationCode {
    pub fn aisle(&self) -> &str {
        &self.0[0..2]
    }

    pub fn slot(&self) -> &str {
        &self.0[2..5]
    }

    /// The raw two-digit level field, e.g. `"04"`.
    pub fn level_digits(&self) -> &str {
        &self.0[5..7]
    }

    pub fn level(&self) -> u8 {
        // Two ASCII digits always fit in a u8.
        self.level_digits().parse().unwrap_or_default()
    }

    /// Header rows in facility exports use level `00`.
    pub fn is_height_zero(&self) -> bool {
        self.level_digits() == "00"
    }

    /// The `"{aisle}-{slot}"` identifier of the slot this code belongs to.
    pub fn position_id(&self) -> String {
        format!("{}-{}", self.aisle(), self.slot())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LocationCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == CODE_LEN && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(CodeError::InvalidCode(s.to_string()))
        }
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
