use crate::{BettingError, Result};
use numbet_core::Pool;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pick in one of the three pools.
///
/// The variant carries the pool, so two selections are the same wager
/// exactly when they compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", try_from = "RawSelection")]
pub enum Selection {
    #[serde(rename = "numbers")]
    Numeric { value: u8 },
    Andar { digit: u8 },
    Bahar { digit: u8 },
}

/// Wire shape of [`Selection`] before its range is checked.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawSelection {
    #[serde(rename = "numbers")]
    Numeric { value: u8 },
    Andar { digit: u8 },
    Bahar { digit: u8 },
}

impl TryFrom<RawSelection> for Selection {
    type Error = BettingError;

    fn try_from(raw: RawSelection) -> Result<Self> {
        match raw {
            RawSelection::Numeric { value } => Self::numeric(value),
            RawSelection::Andar { digit } => Self::andar(digit),
            RawSelection::Bahar { digit } => Self::bahar(digit),
        }
    }
}

impl Selection {
    pub const NUMERIC_RANGE: std::ops::RangeInclusive<u8> = 1..=100;
    pub const DIGIT_RANGE: std::ops::RangeInclusive<u8> = 0..=9;

    pub fn numeric(value: u8) -> Result<Self> {
        if !Self::NUMERIC_RANGE.contains(&value) {
            return Err(BettingError::InvalidSelection(format!(
                "number must be between 1 and 100, got {}",
                value
            )));
        }
        Ok(Self::Numeric { value })
    }

    pub fn andar(digit: u8) -> Result<Self> {
        Self::check_digit(Pool::Andar, digit)?;
        Ok(Self::Andar { digit })
    }

    pub fn bahar(digit: u8) -> Result<Self> {
        Self::check_digit(Pool::Bahar, digit)?;
        Ok(Self::Bahar { digit })
    }

    /// Build a selection for `pool` from its raw number.
    pub fn in_pool(pool: Pool, number: u8) -> Result<Self> {
        match pool {
            Pool::Numbers => Self::numeric(number),
            Pool::Andar => Self::andar(number),
            Pool::Bahar => Self::bahar(number),
        }
    }

    fn check_digit(pool: Pool, digit: u8) -> Result<()> {
        if !Self::DIGIT_RANGE.contains(&digit) {
            return Err(BettingError::InvalidSelection(format!(
                "{} digit must be between 0 and 9, got {}",
                pool, digit
            )));
        }
        Ok(())
    }

    /// Re-check the range of a selection built from its variants directly.
    pub fn validate(&self) -> Result<()> {
        Self::in_pool(self.pool(), self.number()).map(|_| ())
    }

    pub fn pool(&self) -> Pool {
        match self {
            Self::Numeric { .. } => Pool::Numbers,
            Self::Andar { .. } => Pool::Andar,
            Self::Bahar { .. } => Pool::Bahar,
        }
    }

    pub fn number(&self) -> u8 {
        match *self {
            Self::Numeric { value } => value,
            Self::Andar { digit } | Self::Bahar { digit } => digit,
        }
    }

    /// Every selection a pool offers, in display order.
    pub fn all_in(pool: Pool) -> Vec<Selection> {
        match pool {
            Pool::Numbers => Self::NUMERIC_RANGE
                .map(|value| Self::Numeric { value })
                .collect(),
            Pool::Andar => Self::DIGIT_RANGE.map(|digit| Self::Andar { digit }).collect(),
            Pool::Bahar => Self::DIGIT_RANGE.map(|digit| Self::Bahar { digit }).collect(),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric { value } => write!(f, "{}", value),
            Self::Andar { digit } => write!(f, "Andar {}", digit),
            Self::Bahar { digit } => write!(f, "Bahar {}", digit),
        }
    }
}
