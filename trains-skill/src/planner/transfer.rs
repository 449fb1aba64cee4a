//! Transfer matching: pair trains leaving the origin with trains reaching
//! the destination at a shared station.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::trace;

use crate::domain::{IndirectRoute, Train};

use super::config::MatchConfig;

/// The request a transfer search answers.
pub struct TransferQuery<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
    pub departure: NaiveDateTime,
}

/// Find one-change routes from `candidates` onto trains in `arrivals`.
///
/// `candidates` are origin departures that do not reach the destination;
/// `arrivals` is the destination station's schedule. For each pair the
/// start train's stops are scanned in route order and the first station
/// where a valid change exists is kept; later stations are not considered.
///
/// The output may hold several routes per start train (one per connecting
/// train); see [`super::deduplicate_transfers`].
pub fn find_transfers(
    candidates: &[Arc<Train>],
    arrivals: &[Arc<Train>],
    query: &TransferQuery<'_>,
    config: &MatchConfig,
) -> Vec<IndirectRoute> {
    let mut routes = Vec::new();

    for start in candidates {
        for transfer in arrivals {
            if let Some(station) = transfer_point(start, transfer, query, config) {
                trace!(
                    start = start.id(),
                    transfer = transfer.id(),
                    station,
                    "found transfer"
                );
                routes.push(IndirectRoute::new(start.clone(), transfer.clone(), station));
            }
        }
    }

    routes
}

/// First station on `start`'s route where the rider can change to `transfer`.
fn transfer_point<'t>(
    start: &'t Train,
    transfer: &Train,
    query: &TransferQuery<'_>,
    config: &MatchConfig,
) -> Option<&'t str> {
    // A connecting train that calls at the origin is a direct route in
    // its own right.
    if transfer.calls_at(query.origin) {
        return None;
    }

    let arrival_at_destination = transfer.time_at(query.destination)?;
    if arrival_at_destination <= query.departure {
        return None;
    }

    let min_transfer = config.min_transfer();
    let max_transfer = config.max_transfer();

    start.stops().iter().find_map(|call| {
        if call.station == query.origin {
            return None;
        }

        let start_time = call.stop.time;
        if start_time < query.departure || start_time >= arrival_at_destination {
            return None;
        }

        let transfer_time = transfer.time_at(&call.station)?;

        // The connecting train must reach the station after the first train
        if transfer_time <= start_time {
            return None;
        }

        // ...and still be heading towards the destination from there.
        if arrival_at_destination < transfer_time {
            return None;
        }

        let wait = transfer_time - start_time;
        if wait < min_transfer {
            return None;
        }
        if max_transfer.is_some_and(|max| wait > max) {
            return None;
        }

        Some(call.station.as_str())
    })
}
