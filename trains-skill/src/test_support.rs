//! Shared fixtures for unit tests.
//!
//! Synthetic network: line 1 runs stations `11`..`19`, line 2 runs `2A`..`2D`
//! and then joins line 1 at `15`. Every fixture train calls at its stops
//! exactly 30 minutes apart, starting from its first departure.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;

use crate::domain::{StationCode, StationStop, Stop, StopStatus, Train};
use crate::njtransit::ScheduleError;
use crate::planner::ScheduleProvider;
use crate::stations::StationNames;

/// Date all fixture times fall on.
pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 12, 11).unwrap()
}

/// `HH:MM` on the fixture date.
pub fn at(hhmm: &str) -> NaiveDateTime {
    let time = NaiveTime::parse_from_str(hhmm, "%H:%M").unwrap();
    date().and_time(time)
}

/// Full name of a fixture station code.
pub fn station_name(code: &str) -> String {
    let (line, stop) = code.split_at(1);
    format!("Line {line} Station {stop}")
}

pub fn code(s: &str) -> StationCode {
    StationCode::parse(s).unwrap()
}

/// Every station of the fixture network, as (code, name).
pub fn network() -> Vec<(StationCode, String)> {
    ["11", "12", "13", "14", "15", "16", "17", "18", "19", "2A", "2B", "2C", "2D"]
        .iter()
        .map(|c| (code(c), station_name(c)))
        .collect()
}

pub fn station_names() -> StationNames {
    StationNames::from_pairs(network())
}

/// A train departing its first stop at `depart` and calling every 30 minutes.
pub fn generated_train(id: &str, depart: &str, stops: &[&str]) -> Train {
    let first = at(depart);
    let destination = stops.last().map(|c| station_name(c)).unwrap_or_default();
    let stops = stops
        .iter()
        .enumerate()
        .map(|(idx, c)| StationStop {
            station: station_name(c),
            stop: Stop::scheduled(first + Duration::minutes(30 * idx as i64)),
        })
        .collect();
    Train::new(id, destination, stops).unwrap()
}

/// A train with explicit `(station name, HH:MM)` stops.
pub fn train(id: &str, stops: &[(&str, &str)]) -> Arc<Train> {
    let stops = stops
        .iter()
        .map(|(station, hhmm)| StationStop {
            station: station.to_string(),
            stop: Stop {
                time: at(hhmm),
                status: StopStatus::OnTime,
                departed: false,
            },
        })
        .collect::<Vec<_>>();
    let destination = stops
        .last()
        .map(|s| s.station.clone())
        .unwrap_or_default();
    Arc::new(Train::new(id, destination, stops).unwrap())
}

/// `mins` minutes after midnight on the fixture date.
pub fn minutes(mins: i64) -> NaiveDateTime {
    date().and_time(NaiveTime::MIN) + Duration::minutes(mins)
}

/// Random trains over `stations`: a shuffled subset called at arbitrary
/// times within ten hours, in no particular order.
pub fn arb_train(stations: &'static [&'static str]) -> impl Strategy<Value = Arc<Train>> {
    (
        Just(stations.to_vec()).prop_shuffle(),
        1..=stations.len(),
        prop::collection::vec(0i64..600, stations.len()),
        0u16..1000,
    )
        .prop_map(|(order, len, times, id)| {
            let stops = order[..len]
                .iter()
                .zip(times)
                .map(|(station, mins)| StationStop {
                    station: station.to_string(),
                    stop: Stop::scheduled(minutes(mins)),
                })
                .collect();
            let destination = order[len - 1].to_string();
            Arc::new(Train::new(format!("P{id}"), destination, stops).unwrap())
        })
}

/// Fixture timetable: train id → (first departure, stop codes).
pub type Timetable = Vec<(&'static str, &'static str, Vec<&'static str>)>;

/// Direct #02 and #06, transfer #05 → #04 at station 15.
pub fn schedule_1() -> Timetable {
    vec![
        ("01", "01:00", vec!["11", "12", "13", "14", "15", "16", "17", "18", "19"]),
        ("02", "02:00", vec!["11", "12", "13", "14", "16", "17", "19"]),
        ("03", "00:00", vec!["2A", "2B", "2C", "2D", "15", "16", "17", "18"]),
        ("04", "03:00", vec!["2A", "2B", "2C", "2D", "15", "16", "17", "19"]),
        ("05", "02:30", vec!["11", "12", "13", "14", "15", "18"]),
        ("06", "04:30", vec!["11", "12", "13", "19"]),
    ]
}

/// Like `schedule_1` without the feeder #05: no transfer exists.
pub fn schedule_2() -> Timetable {
    schedule_1()
        .into_iter()
        .filter(|(id, _, _)| *id != "05")
        .collect()
}

/// Adds #07, at station 15 at 04:55 and at 19 at 06:25, beating #04.
pub fn schedule_3() -> Timetable {
    let mut timetable = schedule_1();
    timetable.push(("07", "02:55", vec!["2A", "2B", "2C", "2D", "15", "16", "17", "19"]));
    timetable
}

/// Adds #07 three minutes after #05 reaches 15, and #08 before it.
pub fn schedule_4() -> Timetable {
    let mut timetable = schedule_1();
    timetable.push(("07", "02:33", vec!["2A", "2B", "2C", "2D", "15", "16", "17", "19"]));
    timetable.push(("08", "02:25", vec!["2A", "2B", "2C", "2D", "15", "16", "17", "19"]));
    timetable
}

/// Provider serving a fixture timetable as the live feed would at `now`.
///
/// A station's schedule lists every train calling there, minus trains that
/// already left that station before `now`.
pub struct FixtureProvider {
    trains: Vec<Train>,
    now: NaiveDateTime,
    failing: HashSet<StationCode>,
    fetches: AtomicUsize,
}

impl FixtureProvider {
    pub fn new(timetable: Timetable, now: &str) -> Self {
        let trains = timetable
            .iter()
            .map(|(id, depart, stops)| generated_train(id, depart, stops))
            .collect();
        Self {
            trains,
            now: at(now),
            failing: HashSet::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Make fetches for `station` fail with an upstream error.
    pub fn failing_at(mut self, station: &str) -> Self {
        self.failing.insert(code(station));
        self
    }

    /// Number of schedule fetches served so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn schedule_for(&self, station: &StationCode) -> Vec<Train> {
        let name = station_name(station.as_str());
        self.trains
            .iter()
            .filter(|t| t.time_at(&name).is_some_and(|time| time > self.now))
            .cloned()
            .collect()
    }
}

impl ScheduleProvider for FixtureProvider {
    async fn fetch_departures(&self, station: &StationCode) -> Result<Vec<Train>, ScheduleError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(station) {
            return Err(ScheduleError::Status {
                status: 503,
                message: "fixture outage".to_string(),
            });
        }
        Ok(self.schedule_for(station))
    }
}
