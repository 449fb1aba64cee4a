//! Direct matching: split origin departures into direct trains and
//! transfer candidates.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use crate::domain::Train;

/// Origin departures sorted into the two pools the engine works with.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Trains reaching the destination without a change, in schedule order.
    pub direct: Vec<Arc<Train>>,
    /// Trains not calling at the destination, to be tried for a transfer.
    pub candidates: Vec<Arc<Train>>,
}

/// Partition the trains leaving `origin` at or after `departure`.
///
/// A train is direct if it calls at `destination` after both the requested
/// time and its own origin time. A train calling at the destination that
/// fails those checks runs the wrong way (or its data is corrupt) and is
/// dropped from both pools. Trains not calling at the origin at all are
/// skipped.
pub fn partition_departures(
    trains: &[Arc<Train>],
    origin: &str,
    destination: &str,
    departure: NaiveDateTime,
) -> Partition {
    let mut partition = Partition::default();

    for train in trains {
        let Some(start_time) = train.time_at(origin) else {
            debug!(train = train.id(), origin, "train does not call at origin, skipping");
            continue;
        };

        if start_time < departure {
            trace!(train = train.id(), %start_time, "train leaves before requested time");
            continue;
        }

        match train.time_at(destination) {
            Some(arrival) if arrival > departure && arrival > start_time => {
                partition.direct.push(train.clone());
            }
            Some(arrival) => {
                debug!(
                    train = train.id(),
                    %start_time,
                    %arrival,
                    "train reaches destination before leaving origin, skipping"
                );
            }
            None => partition.candidates.push(train.clone()),
        }
    }

    partition
}
