//! Route records produced by the matching engine.

use std::sync::Arc;

use chrono::NaiveDateTime;

use super::Train;

/// Two-leg itinerary: ride `start` to `station`, then `transfer` onwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndirectRoute {
    /// Train leaving the origin
    pub start: Arc<Train>,
    /// Train reaching the destination
    pub transfer: Arc<Train>,
    /// Station where the rider changes trains
    pub station: String,
}

impl IndirectRoute {
    pub fn new(start: Arc<Train>, transfer: Arc<Train>, station: impl Into<String>) -> Self {
        Self {
            start,
            transfer,
            station: station.into(),
        }
    }

    /// When the connecting train is at the transfer station.
    pub fn departs_transfer(&self) -> Option<NaiveDateTime> {
        self.transfer.time_at(&self.station)
    }
}

/// All itineraries found for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSet {
    /// Trains running from origin to destination without a change
    pub direct: Vec<Arc<Train>>,
    /// One-change itineraries, at most one per starting train
    pub indirect: Vec<IndirectRoute>,
}

impl RouteSet {
    /// Returns true if no route of either kind was found.
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.indirect.is_empty()
    }
}

/// The single itinerary chosen for the rider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestRoute {
    Direct(Arc<Train>),
    Indirect(IndirectRoute),
    None,
}

impl BestRoute {
    /// Returns true if nothing was chosen.
    pub fn is_none(&self) -> bool {
        matches!(self, BestRoute::None)
    }
}
