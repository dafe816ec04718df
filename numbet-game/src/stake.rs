use crate::{BettingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_STAKE: u64 = 10;
pub const MAX_STAKE: u64 = 5000;

/// Highest maximum a configuration may set for a single stake.
pub const STAKE_CEILING: u64 = 10_000_000;

/// Quick-pick values offered by the amount dialog.
pub const QUICK_STAKES: [u64; 6] = [10, 50, 100, 200, 500, 1000];

/// Inclusive bounds for a single stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeLimits {
    pub min: u64,
    pub max: u64,
}

impl Default for StakeLimits {
    fn default() -> Self {
        Self {
            min: MIN_STAKE,
            max: MAX_STAKE,
        }
    }
}

impl StakeLimits {
    pub fn new(min: u64, max: u64) -> Result<Self> {
        let limits = Self { min, max };
        limits.validate()?;
        Ok(limits)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min == 0 {
            return Err(BettingError::InvalidLimits(
                "minimum stake must be at least 1".to_string(),
            ));
        }
        if self.min > self.max {
            return Err(BettingError::InvalidLimits(format!(
                "minimum stake {} exceeds maximum {}",
                self.min, self.max
            )));
        }
        if self.max > STAKE_CEILING {
            return Err(BettingError::InvalidLimits(format!(
                "maximum stake {} exceeds ceiling {}",
                self.max, STAKE_CEILING
            )));
        }
        Ok(())
    }

    pub fn contains(&self, amount: u64) -> bool {
        (self.min..=self.max).contains(&amount)
    }

    /// The only way to obtain a [`Stake`].
    pub fn stake(&self, amount: u64) -> Result<Stake> {
        if !self.contains(amount) {
            return Err(BettingError::StakeOutOfRange {
                amount,
                min: self.min,
                max: self.max,
            });
        }
        Ok(Stake(amount))
    }

    /// Parse free-text input as a stake.
    pub fn parse(&self, input: &str) -> Result<Stake> {
        let amount = input
            .trim()
            .parse::<u64>()
            .map_err(|_| BettingError::InvalidAmount(input.trim().to_string()))?;
        self.stake(amount)
    }

    /// Quick-pick values that fall inside these limits.
    pub fn quick_stakes(&self) -> Vec<u64> {
        QUICK_STAKES
            .iter()
            .copied()
            .filter(|amount| self.contains(*amount))
            .collect()
    }
}

/// A stake that has passed the bounds check of some [`StakeLimits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Stake(u64);

impl Stake {
    pub fn amount(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Stake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
