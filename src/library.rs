use std::{
    collections::{BTreeMap, VecDeque},
    fmt,
};

use log::{debug, info, warn};

use crate::{
    error::{CatalogError, CirculationError, CirculationResult, Outcome},
    events::{CirculationEvent, CirculationRecord},
    item::{Day, Item, ItemId, Loan, Location},
    observers::CirculationObserver,
    patron::{Patron, PatronId},
    policy::LoanPolicy,
};

/// Default number of records kept in the history
pub const DEFAULT_HISTORY_SIZE: usize = 100;

/// The circulation desk: owns every item and patron and the day counter.
///
/// All changes to items and patrons go through the library so both sides of
/// a loan always agree. Operations that fail leave the library untouched.
pub struct Library {
    /// All catalogued items, keyed by id
    holdings: BTreeMap<ItemId, Item>,
    /// All registered patrons, keyed by id
    members: BTreeMap<PatronId, Patron>,
    /// Day counter, starts at 0 and only moves forward
    current_date: Day,
    /// Loan periods and daily fine
    policy: LoanPolicy,
    /// Most recent records, oldest first
    history: VecDeque<CirculationRecord>,
    /// Maximum number of history entries to keep
    max_history_size: usize,
    /// Registered observers
    observers: Vec<Box<dyn CirculationObserver>>,
}

// Manual implementation of Debug for Library
impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("holdings", &self.holdings)
            .field("members", &self.members)
            .field("current_date", &self.current_date)
            .field("policy", &self.policy)
            .field("history", &self.history)
            .field("max_history_size", &self.max_history_size)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// Create an empty library on day 0 with the default loan policy
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(LoanPolicy::default())
    }

    /// Create an empty library on day 0 with a custom loan policy
    #[must_use]
    pub fn with_policy(policy: LoanPolicy) -> Self {
        Self {
            holdings: BTreeMap::new(),
            members: BTreeMap::new(),
            current_date: 0,
            policy,
            history: VecDeque::new(),
            max_history_size: DEFAULT_HISTORY_SIZE,
            observers: Vec::new(),
        }
    }

    /// Change how many history records are kept. Zero disables history.
    #[must_use]
    pub fn with_history_limit(mut self, max_history_size: usize) -> Self {
        self.max_history_size = max_history_size;
        self.trim_history();
        self
    }

    /// Register an observer to be notified of every change
    pub fn register_observer(&mut self, observer: Box<dyn CirculationObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub fn current_date(&self) -> Day {
        self.current_date
    }

    #[must_use]
    pub fn policy(&self) -> &LoanPolicy {
        &self.policy
    }

    /// All items, in id order
    pub fn holdings(&self) -> impl Iterator<Item = &Item> {
        self.holdings.values()
    }

    /// All patrons, in id order
    pub fn members(&self) -> impl Iterator<Item = &Patron> {
        self.members.values()
    }

    /// Recorded changes, oldest first
    pub fn history(&self) -> impl ExactSizeIterator<Item = &CirculationRecord> {
        self.history.iter()
    }

    #[must_use]
    pub fn lookup_item(&self, item_id: &str) -> Option<&Item> {
        self.holdings.get(item_id)
    }

    #[must_use]
    pub fn lookup_patron(&self, patron_id: &str) -> Option<&Patron> {
        self.members.get(patron_id)
    }

    /// Catalogue an item. Its loan period is fixed from the library's policy.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateItem` if the id is already in the
    /// holdings; the existing item is kept.
    pub fn add_item(&mut self, mut item: Item) -> Result<(), CatalogError> {
        if self.holdings.contains_key(item.id()) {
            return Err(CatalogError::DuplicateItem(item.id().clone()));
        }

        item.set_loan_period(self.policy.loan_period(item.kind()));
        info!(
            "catalogued {} {} ({:?}), loan period {} days",
            item.kind(),
            item.id(),
            item.title(),
            item.loan_period_days()
        );

        let event = CirculationEvent::ItemAdded { item: item.id().clone(), kind: item.kind() };
        self.holdings.insert(item.id().clone(), item);
        self.record(event);
        Ok(())
    }

    /// Register a patron
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicatePatron` if the id is already registered;
    /// the existing patron is kept.
    pub fn add_patron(&mut self, patron: Patron) -> Result<(), CatalogError> {
        if self.members.contains_key(patron.id()) {
            return Err(CatalogError::DuplicatePatron(patron.id().clone()));
        }

        info!("registered patron {} ({})", patron.id(), patron.name());
        let event = CirculationEvent::PatronAdded { patron: patron.id().clone() };
        self.members.insert(patron.id().clone(), patron);
        self.record(event);
        Ok(())
    }

    /// Check an item out to a patron.
    ///
    /// An item on hold can only be checked out by its requester; doing so
    /// clears the request.
    ///
    /// # Errors
    ///
    /// `PatronNotFound`, `ItemNotFound`, `AlreadyCheckedOut` or
    /// `OnHoldByOtherPatron`.
    pub fn check_out(&mut self, patron_id: &str, item_id: &str) -> CirculationResult {
        let Some(patron) = self.members.get_mut(patron_id) else {
            return Err(CirculationError::PatronNotFound);
        };
        let Some(item) = self.holdings.get_mut(item_id) else {
            return Err(CirculationError::ItemNotFound);
        };

        if item.checked_out_by().is_some() {
            return Err(CirculationError::AlreadyCheckedOut);
        }
        if item.requested_by().is_some_and(|requester| requester != patron.id()) {
            return Err(CirculationError::OnHoldByOtherPatron);
        }

        // Any remaining request belongs to this patron
        let cleared_request = item.requested_by().is_some();
        item.set_location(Location::CheckedOut(Loan {
            patron: patron.id().clone(),
            since: self.current_date,
        }));
        if cleared_request {
            item.set_requested_by(None);
        }
        patron.add_item(item.id().clone());

        debug!("{} checked out {} on day {}", patron.id(), item.id(), self.current_date);
        let event = CirculationEvent::CheckedOut {
            item: item.id().clone(),
            patron: patron.id().clone(),
            cleared_request,
        };
        self.record(event);
        Ok(Outcome::CheckedOut)
    }

    /// Bring an item back into the library.
    ///
    /// The item goes to the hold shelf if someone has requested it, otherwise
    /// back on the open shelf.
    ///
    /// # Errors
    ///
    /// `ItemNotFound` or `AlreadyInLibrary` when the item is on the open shelf.
    pub fn return_item(&mut self, item_id: &str) -> CirculationResult {
        let Some(item) = self.holdings.get_mut(item_id) else {
            return Err(CirculationError::ItemNotFound);
        };

        if *item.location() == Location::OnShelf {
            return Err(CirculationError::AlreadyInLibrary);
        }

        let from_patron = item.checked_out_by().cloned();
        if let Some(holder) = &from_patron
            && let Some(patron) = self.members.get_mut(holder)
        {
            patron.remove_item(item.id());
        }

        let to = if item.requested_by().is_some() { Location::OnHoldShelf } else { Location::OnShelf };
        item.set_location(to.clone());

        debug!("{} returned to {to}", item.id());
        let event = CirculationEvent::Returned { item: item.id().clone(), from_patron, to };
        self.record(event);
        Ok(Outcome::Returned)
    }

    /// Place a request on an item. Only one request per item is allowed.
    ///
    /// An item on the open shelf moves to the hold shelf; a checked-out item
    /// stays out until it is returned.
    ///
    /// # Errors
    ///
    /// `PatronNotFound`, `ItemNotFound` or `AlreadyOnHold`.
    pub fn request_item(&mut self, patron_id: &str, item_id: &str) -> CirculationResult {
        let Some(patron) = self.members.get(patron_id) else {
            return Err(CirculationError::PatronNotFound);
        };
        let Some(item) = self.holdings.get_mut(item_id) else {
            return Err(CirculationError::ItemNotFound);
        };

        if item.requested_by().is_some() {
            return Err(CirculationError::AlreadyOnHold);
        }

        item.set_requested_by(Some(patron.id().clone()));
        if *item.location() == Location::OnShelf {
            item.set_location(Location::OnHoldShelf);
        }

        debug!("{} requested {}", patron.id(), item.id());
        let event = CirculationEvent::Requested {
            item: item.id().clone(),
            patron: patron.id().clone(),
            to: item.location().clone(),
        };
        self.record(event);
        Ok(Outcome::Requested)
    }

    /// Apply a payment to a patron's fines. The amount is not checked, so an
    /// overpayment leaves a negative balance.
    ///
    /// # Errors
    ///
    /// `PatronNotFound`.
    pub fn pay_fine(&mut self, patron_id: &str, amount: f64) -> CirculationResult {
        let Some(patron) = self.members.get_mut(patron_id) else {
            return Err(CirculationError::PatronNotFound);
        };

        patron.amend_fine(-amount);

        debug!("{} paid {amount:.2}, balance {:.2}", patron.id(), patron.fine_balance());
        let event = CirculationEvent::FinePaid {
            patron: patron.id().clone(),
            amount,
            balance: patron.fine_balance(),
        };
        self.record(event);
        Ok(Outcome::PaymentAccepted)
    }

    /// Move the clock forward one day and charge the daily fine for every
    /// overdue loan.
    ///
    /// The fine is flat: each call charges once per item past its loan
    /// period, regardless of how long it has been overdue.
    pub fn advance_day(&mut self) {
        self.current_date = self.current_date.saturating_add(1);
        let today = self.current_date;
        let daily_fine = self.policy.daily_fine;
        info!("advanced to day {today}");

        let mut accrued = Vec::new();
        for patron in self.members.values_mut() {
            let overdue: Vec<(ItemId, u32)> = patron
                .checked_out_items()
                .iter()
                .filter_map(|id| self.holdings.get(id))
                .filter_map(|item| {
                    let days_out = item.days_out(today)?;
                    (days_out > item.loan_period_days()).then(|| (item.id().clone(), days_out))
                })
                .collect();

            for (item, days_out) in overdue {
                patron.amend_fine(daily_fine);
                warn!(
                    "{item} is overdue for {} ({days_out} days out), balance {:.2}",
                    patron.id(),
                    patron.fine_balance()
                );
                accrued.push(CirculationEvent::FineAccrued {
                    patron: patron.id().clone(),
                    item,
                    amount: daily_fine,
                    days_out,
                });
            }
        }

        self.record(CirculationEvent::DayAdvanced { day: today });
        for event in accrued {
            self.record(event);
        }
    }

    /// Items currently checked out to a patron. Empty for unknown patrons.
    #[must_use]
    pub fn items_checked_out_by(&self, patron_id: &str) -> Vec<&Item> {
        self.members
            .get(patron_id)
            .map(|patron| {
                patron.checked_out_items().iter().filter_map(|id| self.holdings.get(id)).collect()
            })
            .unwrap_or_default()
    }

    /// Overdue items today with the number of days past their loan period
    #[must_use]
    pub fn overdue_items(&self) -> Vec<(&Item, u32)> {
        self.holdings
            .values()
            .filter_map(|item| {
                let days_out = item.days_out(self.current_date)?;
                let late = days_out.saturating_sub(item.loan_period_days());
                (late > 0).then_some((item, late))
            })
            .collect()
    }

    /// Stamp an event with today's date, notify observers and keep it in history
    fn record(&mut self, event: CirculationEvent) {
        let record = CirculationRecord { day: self.current_date, event };

        for observer in &self.observers {
            observer.on_event(&record);
        }

        self.history.push_back(record);
        self.trim_history();
    }

    /// Drop the oldest records beyond the history limit
    fn trim_history(&mut self) {
        while self.history.len() > self.max_history_size {
            self.history.pop_front();
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_loan = self.holdings.values().filter(|item| item.checked_out_by().is_some()).count();
        write!(
            f,
            "day {}: {} items, {} patrons, {} on loan",
            self.current_date,
            self.holdings.len(),
            self.members.len(),
            on_loan
        )
    }
}
