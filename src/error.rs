use thiserror::Error;

use crate::{
    item::{ItemId, ItemKind},
    patron::PatronId,
};

/// Successful outcome of a circulation operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The item is now checked out to the patron
    CheckedOut,
    /// The item is back in the library
    Returned,
    /// The patron now holds the request on the item
    Requested,
    /// The payment was applied to the patron's balance
    PaymentAccepted,
}

impl Outcome {
    /// Status line reported to callers
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::CheckedOut => "check out successful",
            Self::Returned => "return successful",
            Self::Requested => "request successful",
            Self::PaymentAccepted => "payment successful",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Why a circulation operation was refused. State is never changed on error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CirculationError {
    #[error("patron not found")]
    PatronNotFound,
    #[error("item not found")]
    ItemNotFound,
    #[error("item already checked out")]
    AlreadyCheckedOut,
    #[error("item on hold by other patron")]
    OnHoldByOtherPatron,
    #[error("item already in library")]
    AlreadyInLibrary,
    #[error("item already on hold")]
    AlreadyOnHold,
}

pub type CirculationResult = Result<Outcome, CirculationError>;

/// Status line for any circulation result
#[must_use]
pub fn status_message(result: &CirculationResult) -> String {
    match result {
        Ok(outcome) => outcome.to_string(),
        Err(err) => err.to_string(),
    }
}

/// Errors raised while registering items and patrons
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("item {0} is already catalogued")]
    DuplicateItem(ItemId),
    #[error("patron {0} is already registered")]
    DuplicatePatron(PatronId),
}

/// Errors raised while loading a loan policy
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("failed to read policy: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse policy: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("loan period for {0} must be at least one day")]
    InvalidLoanPeriod(ItemKind),
    #[error("daily fine must be a non-negative amount, got {0}")]
    InvalidDailyFine(f64),
}
