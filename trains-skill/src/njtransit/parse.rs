//! Decoding of NJ Transit payloads into domain types.
//!
//! Malformed entries are skipped rather than failing the whole payload: a
//! train without an id, a stop without a usable time, a station listed
//! twice. Only a document that is not XML at all is an error.

use chrono::NaiveDateTime;
use roxmltree::{Document, Node};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{StationCode, StationStop, Stop, StopStatus, Train, parse_njt_timestamp};

use super::error::ScheduleError;
use super::types::{ScheduledDeparture, TrainStopList};

/// Trimmed, non-empty text of the first child element named `tag`.
fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Parse a `getTrainScheduleXML` response.
///
/// Every `ITEM` becomes a [`Train`] carrying all of its `STOPS/STOP`
/// entries in document order.
pub fn parse_train_schedule(xml: &str) -> Result<Vec<Train>, ScheduleError> {
    let doc = Document::parse(xml)?;

    let trains = doc
        .descendants()
        .filter(|n| n.has_tag_name("ITEM"))
        .filter_map(parse_item)
        .collect();

    Ok(trains)
}

fn parse_item(item: Node<'_, '_>) -> Option<Train> {
    let Some(id) = child_text(item, "TRAIN_ID") else {
        debug!("schedule item without TRAIN_ID, skipping");
        return None;
    };
    let Some(destination) = child_text(item, "DESTINATION") else {
        debug!(train = id, "schedule item without DESTINATION, skipping");
        return None;
    };

    let mut stops: Vec<StationStop> = Vec::new();
    for stop in item.descendants().filter(|n| n.has_tag_name("STOP")) {
        push_stop(
            &mut stops,
            id,
            RawStop {
                name: child_text(stop, "NAME"),
                time: child_text(stop, "TIME"),
                status: child_text(stop, "STOP_STATUS"),
                departed: child_text(stop, "DEPARTED"),
            },
        );
    }

    let train = match Train::new(id, destination, stops) {
        Ok(train) => train,
        Err(e) => {
            debug!(train = id, error = %e, "invalid train, skipping");
            return None;
        }
    };
    Some(match scheduled_departure(item) {
        Some(departs) => train.with_scheduled_departure(departs),
        None => train,
    })
}

fn scheduled_departure(item: Node<'_, '_>) -> Option<NaiveDateTime> {
    let raw = child_text(item, "SCHED_DEP_DATE")?;
    parse_njt_timestamp(raw)
        .inspect_err(|e| debug!(error = %e, "unparseable SCHED_DEP_DATE"))
        .ok()
}

/// Stop fields as they appear on the wire, in either payload format.
struct RawStop<'a> {
    name: Option<&'a str>,
    time: Option<&'a str>,
    status: Option<&'a str>,
    departed: Option<&'a str>,
}

/// Validate `raw` and append it to `stops`, logging why if it is dropped.
fn push_stop(stops: &mut Vec<StationStop>, train: &str, raw: RawStop<'_>) {
    let Some(name) = raw.name.map(str::trim).filter(|s| !s.is_empty()) else {
        debug!(train, "stop without NAME, skipping");
        return;
    };
    let Some(raw_time) = raw.time.map(str::trim).filter(|s| !s.is_empty()) else {
        debug!(train, station = name, "stop without TIME, skipping");
        return;
    };
    let time = match parse_njt_timestamp(raw_time) {
        Ok(time) => time,
        Err(e) => {
            debug!(train, station = name, error = %e, "unparseable stop time, skipping");
            return;
        }
    };
    if stops.iter().any(|s| s.station == name) {
        debug!(train, station = name, "station listed twice, keeping first");
        return;
    }

    stops.push(StationStop {
        station: name.to_string(),
        stop: Stop {
            time,
            status: StopStatus::from_feed(raw.status),
            departed: raw.departed.map(str::trim) == Some("YES"),
        },
    });
}

/// Parse a `getStationScheduleXML` response: the station's timetable for
/// the day.
///
/// Items missing an id, a destination or a readable `SCHED_DEP_DATE` are
/// skipped.
pub fn parse_station_schedule(xml: &str) -> Result<Vec<ScheduledDeparture>, ScheduleError> {
    let doc = Document::parse(xml)?;

    let departures = doc
        .descendants()
        .filter(|n| n.has_tag_name("ITEM"))
        .filter_map(|item| {
            let train_id = child_text(item, "TRAIN_ID")?;
            let Some(destination) = child_text(item, "DESTINATION") else {
                debug!(train = train_id, "timetable item without DESTINATION, skipping");
                return None;
            };
            let Some(departure) = scheduled_departure(item) else {
                debug!(train = train_id, "timetable item without departure, skipping");
                return None;
            };
            Some(ScheduledDeparture {
                train_id: train_id.to_string(),
                destination: destination.to_string(),
                departure,
                index: child_text(item, "ITEM_INDEX").and_then(|i| i.parse().ok()),
            })
        })
        .collect();

    Ok(departures)
}

#[derive(Debug, Deserialize)]
struct StopListEnvelope {
    #[serde(rename = "Train")]
    train: WireTrain,
}

#[derive(Debug, Deserialize)]
struct WireTrain {
    #[serde(rename = "Train_ID")]
    train_id: String,
    #[serde(rename = "STOPS")]
    stops: WireStops,
}

#[derive(Debug, Deserialize)]
struct WireStops {
    #[serde(rename = "STOP", default)]
    stop: Vec<WireStop>,
}

#[derive(Debug, Deserialize)]
struct WireStop {
    #[serde(rename = "NAME")]
    name: Option<String>,
    #[serde(rename = "TIME")]
    time: Option<String>,
    #[serde(rename = "STOP_STATUS")]
    status: Option<String>,
    #[serde(rename = "DEPARTED")]
    departed: Option<String>,
}

/// Parse a `getTrainStopListJSON` response.
///
/// The service wraps a JSON document in a single XML element; the JSON
/// holds the train id and its stops.
pub fn parse_train_stops(xml: &str) -> Result<TrainStopList, ScheduleError> {
    let doc = Document::parse(xml)?;
    let json = doc
        .root_element()
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ScheduleError::Payload("stop list response has no JSON body".into()))?;

    let envelope: StopListEnvelope = serde_json::from_str(json)?;
    let train_id = envelope.train.train_id.trim().to_string();

    let mut stops = Vec::new();
    for stop in &envelope.train.stops.stop {
        push_stop(
            &mut stops,
            &train_id,
            RawStop {
                name: stop.name.as_deref(),
                time: stop.time.as_deref(),
                status: stop.status.as_deref(),
                departed: stop.departed.as_deref(),
            },
        );
    }

    Ok(TrainStopList { train_id, stops })
}

/// Parse a `getStationListXML` response into `(code, name)` pairs.
///
/// Entries with an invalid code or a name spanning several lines are
/// skipped.
pub fn parse_station_list(xml: &str) -> Result<Vec<(StationCode, String)>, ScheduleError> {
    let doc = Document::parse(xml)?;

    let stations = doc
        .descendants()
        .filter(|n| n.has_tag_name("STATION"))
        .filter_map(|station| {
            let raw_code = child_text(station, "STATION_2CHAR")?;
            let name = child_text(station, "STATIONNAME")?;
            if name.contains('\n') {
                debug!(code = raw_code, "multi-line station name, skipping");
                return None;
            }
            match StationCode::parse_normalized(raw_code) {
                Ok(code) => Some((code, name.to_string())),
                Err(e) => {
                    debug!(code = raw_code, error = %e, "invalid station code, skipping");
                    None
                }
            }
        })
        .collect();

    Ok(stations)
}
