use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

use crate::patron::PatronId;

/// A day on the library's clock. Day 0 is the day the library opens.
pub type Day = u32;

/// Unique identifier of a catalogued item
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an identifier from anything string-like
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The kind of circulating material. The kind only decides how long a loan lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A book, described by its author
    Book,
    /// A music album, described by its artist
    Album,
    /// A movie, described by its director
    Movie,
}

impl ItemKind {
    /// Number of days a loan of this kind lasts before it is overdue
    #[must_use]
    pub const fn default_loan_period(self) -> u32 {
        match self {
            Self::Book => 21,
            Self::Album => 14,
            Self::Movie => 7,
        }
    }

    /// What the descriptor of this kind of item names
    #[must_use]
    pub const fn creator_role(self) -> &'static str {
        match self {
            Self::Book => "author",
            Self::Album => "artist",
            Self::Movie => "director",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Book => "book",
            Self::Album => "album",
            Self::Movie => "movie",
        };
        f.write_str(name)
    }
}

/// An open loan: who has the item and since when
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Loan {
    /// Patron holding the item
    pub patron: PatronId,
    /// Day the item was checked out
    pub since: Day,
}

/// Where an item currently is
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Location {
    /// Item is on the open shelf
    #[default]
    OnShelf,
    /// Item is out on loan
    CheckedOut(Loan),
    /// Item is in the library but reserved for its requester
    OnHoldShelf,
}

impl Location {
    /// Human-readable name of the location, in the library's own vocabulary
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OnShelf => "ON_SHELF",
            Self::CheckedOut(_) => "CHECKED_OUT",
            Self::OnHoldShelf => "ON_HOLD_SHELF",
        }
    }

    /// The loan, if the item is checked out
    #[must_use]
    pub const fn loan(&self) -> Option<&Loan> {
        match self {
            Self::CheckedOut(loan) => Some(loan),
            Self::OnShelf | Self::OnHoldShelf => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One piece of circulating inventory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    /// Catalogue identifier
    id: ItemId,
    /// Title shown to patrons
    title: String,
    /// Book, album or movie
    kind: ItemKind,
    /// Author, artist or director depending on `kind`
    creator: String,
    /// Fixed when the item is catalogued
    loan_period_days: u32,
    /// Current location, including the loan when checked out
    location: Location,
    /// Patron holding the single outstanding request, if any
    requested_by: Option<PatronId>,
}

impl Item {
    /// Create an item on the shelf with the default loan period for its kind
    #[must_use]
    pub fn new(
        kind: ItemKind,
        id: impl Into<ItemId>,
        title: impl Into<String>,
        creator: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            creator: creator.into(),
            loan_period_days: kind.default_loan_period(),
            location: Location::OnShelf,
            requested_by: None,
        }
    }

    /// Shorthand for a book
    #[must_use]
    pub fn book(id: impl Into<ItemId>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self::new(ItemKind::Book, id, title, author)
    }

    /// Shorthand for an album
    #[must_use]
    pub fn album(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self::new(ItemKind::Album, id, title, artist)
    }

    /// Shorthand for a movie
    #[must_use]
    pub fn movie(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        director: impl Into<String>,
    ) -> Self {
        Self::new(ItemKind::Movie, id, title, director)
    }

    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Author, artist or director
    #[must_use]
    pub fn creator(&self) -> &str {
        &self.creator
    }

    #[must_use]
    pub fn author(&self) -> Option<&str> {
        (self.kind == ItemKind::Book).then_some(self.creator.as_str())
    }

    #[must_use]
    pub fn artist(&self) -> Option<&str> {
        (self.kind == ItemKind::Album).then_some(self.creator.as_str())
    }

    #[must_use]
    pub fn director(&self) -> Option<&str> {
        (self.kind == ItemKind::Movie).then_some(self.creator.as_str())
    }

    #[must_use]
    pub fn loan_period_days(&self) -> u32 {
        self.loan_period_days
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn checked_out_by(&self) -> Option<&PatronId> {
        self.location.loan().map(|loan| &loan.patron)
    }

    #[must_use]
    pub fn date_checked_out(&self) -> Option<Day> {
        self.location.loan().map(|loan| loan.since)
    }

    #[must_use]
    pub fn requested_by(&self) -> Option<&PatronId> {
        self.requested_by.as_ref()
    }

    /// Days the current loan has been open on `today`, if checked out
    #[must_use]
    pub fn days_out(&self, today: Day) -> Option<u32> {
        self.date_checked_out().map(|since| today.saturating_sub(since))
    }

    /// Whether the current loan has run past the loan period on `today`
    #[must_use]
    pub fn is_overdue(&self, today: Day) -> bool {
        self.days_out(today).is_some_and(|days| days > self.loan_period_days)
    }

    /// Only called while the item is being catalogued
    pub(crate) fn set_loan_period(&mut self, days: u32) {
        self.loan_period_days = days;
    }

    /// Move the item; a checked-out location carries the loan with it
    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Place or clear the single outstanding request
    pub(crate) fn set_requested_by(&mut self, patron: Option<PatronId>) {
        self.requested_by = patron;
    }
}
