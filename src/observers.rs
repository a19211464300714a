use log::info;

use crate::{
    events::{CirculationEvent, CirculationRecord},
    item::Location,
};

/// Hook called for every recorded change in the library
pub trait CirculationObserver {
    /// Called after the change has been applied
    fn on_event(&self, record: &CirculationRecord);
}

/// Logs every record that occurs in the library
#[derive(Debug)]
pub struct TransitionLogger;

impl CirculationObserver for TransitionLogger {
    fn on_event(&self, record: &CirculationRecord) {
        info!("day {}: {:?}", record.day, record.event);
    }
}

/// Announces items that are waiting on the hold shelf for their requester
#[derive(Debug)]
pub struct HoldNotifier;

impl CirculationObserver for HoldNotifier {
    fn on_event(&self, record: &CirculationRecord) {
        match &record.event {
            CirculationEvent::Returned { item, to: Location::OnHoldShelf, .. } => {
                info!("item {item} returned to the hold shelf for its requester");
            }
            CirculationEvent::Requested { item, patron, to: Location::OnHoldShelf } => {
                info!("item {item} pulled to the hold shelf for {patron}");
            }
            _ => {}
        }
    }
}
