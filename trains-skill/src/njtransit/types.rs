//! Records returned by the NJ Transit operations that do not feed the
//! matcher directly.

use chrono::NaiveDateTime;

use crate::domain::StationStop;

/// One row of a station's daily timetable (`getStationScheduleXML`).
///
/// Unlike the real-time schedule this lists every train of the day and
/// carries no stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledDeparture {
    pub train_id: String,
    pub destination: String,
    /// Timetabled departure from the station
    pub departure: NaiveDateTime,
    /// Position in the feed's listing
    pub index: Option<u32>,
}

/// Every stop of one train (`getTrainStopListJSON`), in route order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainStopList {
    pub train_id: String,
    pub stops: Vec<StationStop>,
}

impl TrainStopList {
    /// The stop at `station`, if the train calls there.
    pub fn stop_at(&self, station: &str) -> Option<&StationStop> {
        self.stops.iter().find(|s| s.station == station)
    }
}
