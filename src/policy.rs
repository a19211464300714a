//! Loan policy: how long each kind of item may be kept and what an overdue
//! day costs. Policies are plain JSON documents.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::PolicyError, item::ItemKind};

/// Fine added for each overdue item on each day the clock advances
pub const DEFAULT_DAILY_FINE: f64 = 0.10;

/// Loan periods per item kind and the flat daily fine
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoanPolicy {
    /// Loan period for books, in days
    pub book_days: u32,
    /// Loan period for albums, in days
    pub album_days: u32,
    /// Loan period for movies, in days
    pub movie_days: u32,
    /// Amount charged per overdue item per day
    pub daily_fine: f64,
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            book_days: ItemKind::Book.default_loan_period(),
            album_days: ItemKind::Album.default_loan_period(),
            movie_days: ItemKind::Movie.default_loan_period(),
            daily_fine: DEFAULT_DAILY_FINE,
        }
    }
}

impl LoanPolicy {
    /// Loan period for `kind` under this policy
    #[must_use]
    pub const fn loan_period(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::Book => self.book_days,
            ItemKind::Album => self.album_days,
            ItemKind::Movie => self.movie_days,
        }
    }

    /// Parse and validate a policy from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::Parse` for malformed JSON or unknown fields, and a
    /// validation error if a loan period is zero or the fine is not a
    /// non-negative finite number.
    pub fn from_json_str(json: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Read a policy file
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::Io` if the file cannot be read, otherwise the
    /// same errors as [`LoanPolicy::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check the policy values
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::InvalidLoanPeriod` or `PolicyError::InvalidDailyFine`.
    pub fn validate(&self) -> Result<(), PolicyError> {
        for kind in [ItemKind::Book, ItemKind::Album, ItemKind::Movie] {
            if self.loan_period(kind) == 0 {
                return Err(PolicyError::InvalidLoanPeriod(kind));
            }
        }
        if !self.daily_fine.is_finite() || self.daily_fine < 0.0 {
            return Err(PolicyError::InvalidDailyFine(self.daily_fine));
        }
        Ok(())
    }
}
