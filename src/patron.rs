use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

use crate::item::ItemId;

/// Unique identifier of a registered patron
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PatronId(String);

impl PatronId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatronId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PatronId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for PatronId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PatronId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A library member with their current loans and fine balance.
///
/// A patron only records which items they hold; the items themselves live in
/// the library's holdings and are resolved through it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patron {
    /// Member identifier
    id: PatronId,
    /// Display name
    name: String,
    /// Items currently checked out to this patron
    checked_out: Vec<ItemId>,
    /// Outstanding fines; can go negative after an overpayment
    fine_balance: f64,
}

impl Patron {
    /// Register a new patron with no loans and no fines
    #[must_use]
    pub fn new(id: impl Into<PatronId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), checked_out: Vec::new(), fine_balance: 0.0 }
    }

    #[must_use]
    pub fn id(&self) -> &PatronId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifiers of the items this patron currently has out
    #[must_use]
    pub fn checked_out_items(&self) -> &[ItemId] {
        &self.checked_out
    }

    #[must_use]
    pub fn has_item(&self, item: &ItemId) -> bool {
        self.checked_out.contains(item)
    }

    #[must_use]
    pub fn fine_balance(&self) -> f64 {
        self.fine_balance
    }

    /// Record a loan. The caller guarantees the item is not already recorded.
    pub(crate) fn add_item(&mut self, item: ItemId) {
        self.checked_out.push(item);
    }

    /// Forget a loan; does nothing if the item is not recorded
    pub(crate) fn remove_item(&mut self, item: &ItemId) {
        self.checked_out.retain(|held| held != item);
    }

    /// Add `delta` to the balance. Negative deltas are payments.
    pub(crate) fn amend_fine(&mut self, delta: f64) {
        self.fine_balance += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_missing_item_is_a_no_op() {
        let mut patron = Patron::new("p1", "Alice");
        patron.add_item(ItemId::from("b1"));
        patron.remove_item(&ItemId::from("zz"));
        assert_eq!(patron.checked_out_items(), &[ItemId::from("b1")]);

        patron.remove_item(&ItemId::from("b1"));
        assert!(patron.checked_out_items().is_empty());
        assert!(!patron.has_item(&ItemId::from("b1")));
    }

    #[test]
    fn amend_fine_has_no_lower_bound() {
        let mut patron = Patron::new("p1", "Alice");
        patron.amend_fine(0.5);
        patron.amend_fine(-2.0);
        assert!((patron.fine_balance() - -1.5).abs() < 1e-9);
    }
}
