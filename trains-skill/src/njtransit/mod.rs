//! NJ Transit train data client.
//!
//! This module provides an HTTP client for the NJ Transit train data web
//! service and an offline stand-in that serves saved responses.
//!
//! Key characteristics of the service:
//! - Every operation is a form-encoded POST carrying the credentials
//! - Responses are XML; times look like `11-Dec-2018 01:30:00 AM` and are
//!   wall-clock times in New Jersey
//! - `getTrainScheduleXML` lists every train at a station together with
//!   all of its stops, so one call per station is enough for matching
//! - `getStationScheduleXML` is the full-day timetable at a station and
//!   `getTrainStopListJSON` wraps one train's stops as JSON inside XML

mod client;
mod error;
mod mock;
mod parse;
mod types;

pub use client::{NjtClient, NjtConfig};
pub use error::ScheduleError;
pub use mock::{MockNjtClient, STATION_LIST_FILE, STATION_SCHEDULE_DIR, TRAIN_STOPS_DIR};
pub use parse::{
    parse_station_list, parse_station_schedule, parse_train_schedule, parse_train_stops,
};
pub use types::{ScheduledDeparture, TrainStopList};

use crate::domain::{StationCode, Train};
use crate::planner::ScheduleProvider;

/// Either the live service or saved responses, chosen at startup.
#[derive(Debug, Clone)]
pub enum NjtSource {
    Live(NjtClient),
    Mock(MockNjtClient),
}

impl NjtSource {
    /// Every station on the network as `(code, name)`.
    pub async fn fetch_station_list(&self) -> Result<Vec<(StationCode, String)>, ScheduleError> {
        match self {
            NjtSource::Live(client) => client.fetch_station_list().await,
            NjtSource::Mock(client) => client.fetch_station_list(),
        }
    }

    /// The day's scheduled departures from `station`.
    pub async fn fetch_station_schedule(
        &self,
        station: &StationCode,
    ) -> Result<Vec<ScheduledDeparture>, ScheduleError> {
        match self {
            NjtSource::Live(client) => client.fetch_station_schedule(station).await,
            NjtSource::Mock(client) => client.fetch_station_schedule(station),
        }
    }

    /// Every stop of one train.
    pub async fn fetch_train_stops(&self, train_id: &str) -> Result<TrainStopList, ScheduleError> {
        match self {
            NjtSource::Live(client) => client.fetch_train_stops(train_id).await,
            NjtSource::Mock(client) => client.fetch_train_stops(train_id),
        }
    }
}

impl ScheduleProvider for NjtSource {
    async fn fetch_departures(&self, station: &StationCode) -> Result<Vec<Train>, ScheduleError> {
        match self {
            NjtSource::Live(client) => client.fetch_departures(station).await,
            NjtSource::Mock(client) => client.fetch_departures(station).await,
        }
    }
}
