use serde::Serialize;

use crate::{
    item::{Day, ItemId, ItemKind, Location},
    patron::PatronId,
};

/// Something that changed in the library
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CirculationEvent {
    /// An item was added to the holdings
    ItemAdded { item: ItemId, kind: ItemKind },
    /// A patron joined
    PatronAdded { patron: PatronId },
    /// An item left the library with a patron
    CheckedOut {
        item: ItemId,
        patron: PatronId,
        /// Whether the checkout consumed the patron's own request
        cleared_request: bool,
    },
    /// An item came back; `to` is where it now sits
    Returned { item: ItemId, from_patron: Option<PatronId>, to: Location },
    /// A patron placed a request on an item
    Requested { item: ItemId, patron: PatronId, to: Location },
    /// A patron paid toward their fines
    FinePaid { patron: PatronId, amount: f64, balance: f64 },
    /// An overdue item added to a patron's fines
    FineAccrued { patron: PatronId, item: ItemId, amount: f64, days_out: u32 },
    /// The clock moved forward one day
    DayAdvanced { day: Day },
}

/// An event stamped with the day it happened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CirculationRecord {
    /// Library day when the event happened
    pub day: Day,
    /// What happened
    pub event: CirculationEvent,
}
