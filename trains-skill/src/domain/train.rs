//! Train and stop types.
//!
//! A `Train` is one entry of a station's real-time schedule: an id, the
//! destination shown on the board, and every stop the train makes in route
//! order. Stops are keyed by full station name.

use chrono::NaiveDateTime;

use super::error::DomainError;

/// Status the feed reports for a stop.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StopStatus {
    /// The feed reported `OnTime`.
    OnTime,
    /// Anything else, including an empty status element.
    Other(String),
}

impl StopStatus {
    /// Interpret a raw `STOP_STATUS` value.
    pub fn from_feed(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("ontime") => StopStatus::OnTime,
            Some(s) => StopStatus::Other(s.to_string()),
            None => StopStatus::Other(String::new()),
        }
    }

    /// Returns true for `OnTime`.
    pub fn is_on_time(&self) -> bool {
        matches!(self, StopStatus::OnTime)
    }
}

/// A train's call at one station.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stop {
    /// Scheduled (or updated) time at the station
    pub time: NaiveDateTime,
    /// Reported status
    pub status: StopStatus,
    /// Whether the train has already left this station
    pub departed: bool,
}

impl Stop {
    /// Create a stop that has not departed and has no particular status.
    pub fn scheduled(time: NaiveDateTime) -> Self {
        Self {
            time,
            status: StopStatus::Other(String::new()),
            departed: false,
        }
    }
}

/// A station name paired with the train's stop there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationStop {
    pub station: String,
    pub stop: Stop,
}

/// A train from a station schedule.
///
/// Stop station names are unique and kept in route order; both are
/// enforced by [`Train::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Train {
    id: String,
    destination: String,
    stops: Vec<StationStop>,
    scheduled_departure: Option<NaiveDateTime>,
}

impl Train {
    /// Create a train from its stops in route order.
    ///
    /// Fails if the id is blank or a station appears twice.
    pub fn new(
        id: impl Into<String>,
        destination: impl Into<String>,
        stops: Vec<StationStop>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::MissingTrainId);
        }

        for (idx, stop) in stops.iter().enumerate() {
            if stops[..idx].iter().any(|s| s.station == stop.station) {
                return Err(DomainError::DuplicateStop {
                    train: id,
                    station: stop.station.clone(),
                });
            }
        }

        Ok(Self {
            id,
            destination: destination.into(),
            stops,
            scheduled_departure: None,
        })
    }

    /// Attach the timetabled departure from the listing station.
    pub fn with_scheduled_departure(mut self, time: NaiveDateTime) -> Self {
        self.scheduled_departure = Some(time);
        self
    }

    /// Stable identifier of the train (e.g. `"3867"`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Destination label shown on the board.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Timetabled departure from the station whose schedule listed the
    /// train, if the feed gave one.
    pub fn scheduled_departure(&self) -> Option<NaiveDateTime> {
        self.scheduled_departure
    }

    /// All stops in route order.
    pub fn stops(&self) -> &[StationStop] {
        &self.stops
    }

    /// The stop at `station`, if the train calls there.
    pub fn stop_at(&self, station: &str) -> Option<&Stop> {
        self.stops
            .iter()
            .find(|s| s.station == station)
            .map(|s| &s.stop)
    }

    /// Time at `station`, if the train calls there.
    pub fn time_at(&self, station: &str) -> Option<NaiveDateTime> {
        self.stop_at(station).map(|s| s.time)
    }

    /// Returns true if the train calls at `station`.
    pub fn calls_at(&self, station: &str) -> bool {
        self.stop_at(station).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_njt_timestamp;

    fn stop(station: &str, time: &str) -> StationStop {
        StationStop {
            station: station.to_string(),
            stop: Stop::scheduled(parse_njt_timestamp(time).unwrap()),
        }
    }

    fn sample() -> Train {
        Train::new(
            "3867",
            "New York Penn Station",
            vec![
                stop("Chatham", "11-Dec-2018 07:00:00 AM"),
                stop("Summit", "11-Dec-2018 07:10:00 AM"),
                stop("New York Penn Station", "11-Dec-2018 07:55:00 AM"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn lookups() {
        let train = sample();
        assert_eq!(train.id(), "3867");
        assert_eq!(train.destination(), "New York Penn Station");
        assert!(train.calls_at("Summit"));
        assert!(!train.calls_at("Dover"));
        assert_eq!(
            train.time_at("Summit"),
            Some(parse_njt_timestamp("11-Dec-2018 07:10:00 AM").unwrap())
        );
    }

    #[test]
    fn stops_keep_route_order() {
        let names: Vec<_> = sample().stops().iter().map(|s| s.station.clone()).collect();
        assert_eq!(names, ["Chatham", "Summit", "New York Penn Station"]);
    }

    #[test]
    fn rejects_duplicate_station() {
        let result = Train::new(
            "1",
            "Dover",
            vec![
                stop("Chatham", "11-Dec-2018 07:00:00 AM"),
                stop("Chatham", "11-Dec-2018 07:30:00 AM"),
            ],
        );
        assert!(matches!(result, Err(DomainError::DuplicateStop { .. })));
    }

    #[test]
    fn scheduled_departure_is_optional() {
        assert_eq!(sample().scheduled_departure(), None);

        let departs = parse_njt_timestamp("11-Dec-2018 07:00:00 AM").unwrap();
        let train = sample().with_scheduled_departure(departs);
        assert_eq!(train.scheduled_departure(), Some(departs));
    }

    #[test]
    fn rejects_blank_id() {
        assert!(matches!(
            Train::new("  ", "Dover", vec![]),
            Err(DomainError::MissingTrainId)
        ));
    }

    #[test]
    fn status_from_feed() {
        assert!(StopStatus::from_feed(Some("OnTime")).is_on_time());
        assert!(StopStatus::from_feed(Some(" ONTIME ")).is_on_time());
        assert_eq!(
            StopStatus::from_feed(Some("Delayed")),
            StopStatus::Other("Delayed".to_string())
        );
        assert_eq!(StopStatus::from_feed(None), StopStatus::Other(String::new()));
    }
}
