use crate::{Result, Selection, Stake, StakeLimits};

/// Dialog state for choosing the stake of one candidate selection.
///
/// Rejected input leaves the picker open with a message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountPicker {
    candidate: Selection,
    limits: StakeLimits,
    input: String,
    error: Option<String>,
}

impl AmountPicker {
    pub fn new(candidate: Selection, limits: StakeLimits) -> Self {
        Self {
            candidate,
            limits,
            input: String::new(),
            error: None,
        }
    }

    pub fn candidate(&self) -> Selection {
        self.candidate
    }

    pub fn limits(&self) -> StakeLimits {
        self.limits
    }

    pub fn quick_stakes(&self) -> Vec<u64> {
        self.limits.quick_stakes()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Message from the last rejected confirmation, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.error = None;
    }

    /// Validate the current input.
    pub fn confirm(&mut self) -> Result<Stake> {
        match self.limits.parse(&self.input) {
            Ok(stake) => {
                self.error = None;
                Ok(stake)
            }
            Err(e) => {
                tracing::warn!("Rejected stake '{}' for {}: {}", self.input, self.candidate, e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Behaves exactly like typing `amount` and confirming.
    pub fn quick_pick(&mut self, amount: u64) -> Result<Stake> {
        self.set_input(amount.to_string());
        self.confirm()
    }
}
