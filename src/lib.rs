//! Circulation engine for a small library.
//!
//! This crate tracks items, patrons, loans, hold requests and overdue fines
//! over a day counter that the caller advances explicitly.

pub mod error;
pub mod events;
pub mod item;
pub mod library;
pub mod observers;
pub mod patron;
pub mod policy;

pub use error::{CatalogError, CirculationError, CirculationResult, Outcome, PolicyError, status_message};
pub use events::{CirculationEvent, CirculationRecord};
pub use item::{Day, Item, ItemId, ItemKind, Loan, Location};
pub use library::Library;
pub use observers::{CirculationObserver, HoldNotifier, TransitionLogger};
pub use patron::{Patron, PatronId};
pub use policy::LoanPolicy;
