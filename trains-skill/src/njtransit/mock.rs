//! Mock NJ Transit client for running without API access.
//!
//! Loads saved responses from a directory and serves them as if they were
//! live.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{StationCode, Train};
use crate::planner::ScheduleProvider;

use super::error::ScheduleError;
use super::parse::{
    parse_station_list, parse_station_schedule, parse_train_schedule, parse_train_stops,
};
use super::types::{ScheduledDeparture, TrainStopList};

/// File holding the saved `getStationListXML` response.
pub const STATION_LIST_FILE: &str = "stations.xml";

/// Subdirectory of saved `getStationScheduleXML` responses, `{CODE}.xml`.
pub const STATION_SCHEDULE_DIR: &str = "daily";

/// Subdirectory of saved `getTrainStopListJSON` responses, `{TRAIN_ID}.xml`.
pub const TRAIN_STOPS_DIR: &str = "stops";

/// Mock client that serves responses from XML files.
///
/// Expects one `{CODE}.xml` real-time schedule per station (e.g. `NY.xml`,
/// `CM.xml`) and, optionally, a `stations.xml` station list plus the
/// `daily/` and `stops/` subdirectories.
#[derive(Debug, Clone)]
pub struct MockNjtClient {
    schedules: Arc<HashMap<StationCode, String>>,
    timetables: Arc<HashMap<StationCode, String>>,
    train_stops: Arc<HashMap<String, String>>,
    station_list: Option<Arc<String>>,
}

/// Every `.xml` file directly inside `dir`, with its contents.
fn xml_files(dir: &Path) -> Result<Vec<(PathBuf, String)>, ScheduleError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("xml") {
            continue;
        }
        let xml = std::fs::read_to_string(&path)?;
        files.push((path, xml));
    }
    Ok(files)
}

fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

fn station_code(path: &Path) -> Option<StationCode> {
    let code = file_stem(path).and_then(|s| StationCode::parse(s).ok());
    if code.is_none() {
        debug!(?path, "file name is not a station code, skipping");
    }
    code
}

impl MockNjtClient {
    /// Load every response file under `data_dir`.
    ///
    /// Files are parsed once here so that a broken file fails at startup
    /// rather than on first request.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let data_dir = data_dir.as_ref();
        let mut schedules = HashMap::new();
        let mut station_list = None;

        for (path, xml) in xml_files(data_dir)? {
            if path.file_name().and_then(|s| s.to_str()) == Some(STATION_LIST_FILE) {
                parse_station_list(&xml)?;
                station_list = Some(Arc::new(xml));
                continue;
            }
            let Some(code) = station_code(&path) else {
                continue;
            };
            parse_train_schedule(&xml)?;
            schedules.insert(code, xml);
        }

        let mut timetables = HashMap::new();
        let daily = data_dir.join(STATION_SCHEDULE_DIR);
        if daily.is_dir() {
            for (path, xml) in xml_files(&daily)? {
                let Some(code) = station_code(&path) else {
                    continue;
                };
                parse_station_schedule(&xml)?;
                timetables.insert(code, xml);
            }
        }

        let mut train_stops = HashMap::new();
        let stops = data_dir.join(TRAIN_STOPS_DIR);
        if stops.is_dir() {
            for (path, xml) in xml_files(&stops)? {
                let Some(train_id) = file_stem(&path) else {
                    continue;
                };
                parse_train_stops(&xml)?;
                train_stops.insert(train_id.to_string(), xml);
            }
        }

        info!(
            dir = %data_dir.display(),
            stations = schedules.len(),
            timetables = timetables.len(),
            trains = train_stops.len(),
            "loaded mock responses"
        );

        Ok(Self {
            schedules: Arc::new(schedules),
            timetables: Arc::new(timetables),
            train_stops: Arc::new(train_stops),
            station_list,
        })
    }

    /// Codes with a schedule file, sorted.
    pub fn stations(&self) -> Vec<StationCode> {
        let mut codes: Vec<_> = self.schedules.keys().copied().collect();
        codes.sort();
        codes
    }

    /// Mimics [`super::NjtClient::train_schedule`].
    pub fn train_schedule(&self, station: &StationCode) -> Result<Vec<Train>, ScheduleError> {
        let xml = self
            .schedules
            .get(station)
            .ok_or(ScheduleError::UnknownStation(*station))?;
        parse_train_schedule(xml)
    }

    /// Mimics [`super::NjtClient::fetch_station_schedule`].
    pub fn fetch_station_schedule(
        &self,
        station: &StationCode,
    ) -> Result<Vec<ScheduledDeparture>, ScheduleError> {
        let xml = self
            .timetables
            .get(station)
            .ok_or(ScheduleError::UnknownStation(*station))?;
        parse_station_schedule(xml)
    }

    /// Mimics [`super::NjtClient::fetch_train_stops`].
    pub fn fetch_train_stops(&self, train_id: &str) -> Result<TrainStopList, ScheduleError> {
        let xml = self
            .train_stops
            .get(train_id)
            .ok_or_else(|| ScheduleError::UnknownTrain(train_id.to_string()))?;
        parse_train_stops(xml)
    }

    /// Mimics [`super::NjtClient::fetch_station_list`].
    pub fn fetch_station_list(&self) -> Result<Vec<(StationCode, String)>, ScheduleError> {
        let xml = self.station_list.as_ref().ok_or_else(|| ScheduleError::Status {
            status: 404,
            message: format!("no {STATION_LIST_FILE} in mock data"),
        })?;
        parse_station_list(xml)
    }
}

impl ScheduleProvider for MockNjtClient {
    async fn fetch_departures(&self, station: &StationCode) -> Result<Vec<Train>, ScheduleError> {
        self.train_schedule(station)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SCHEDULE: &str = r#"<STATION><ITEMS><ITEM>
        <TRAIN_ID>6620</TRAIN_ID>
        <DESTINATION>Hoboken</DESTINATION>
        <STOPS>
          <STOP><NAME>Chatham</NAME><TIME>11-Dec-2018 07:00:00 AM</TIME></STOP>
          <STOP><NAME>Hoboken</NAME><TIME>11-Dec-2018 07:55:00 AM</TIME></STOP>
        </STOPS>
    </ITEM></ITEMS></STATION>"#;

    const STATIONS: &str = r#"<STATIONS>
        <STATION><STATION_2CHAR>CM</STATION_2CHAR><STATIONNAME>Chatham</STATIONNAME></STATION>
        <STATION><STATION_2CHAR>HB</STATION_2CHAR><STATIONNAME>Hoboken</STATIONNAME></STATION>
    </STATIONS>"#;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    #[tokio::test]
    async fn serves_schedule_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CM.xml"), SCHEDULE).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("README.xml"), "<ignored/>").unwrap();

        let client = MockNjtClient::new(dir.path()).unwrap();

        assert_eq!(client.stations(), [code("CM")]);
        let trains = client.fetch_departures(&code("CM")).await.unwrap();
        assert_eq!(trains.len(), 1);
        assert_eq!(trains[0].id(), "6620");
    }

    #[tokio::test]
    async fn missing_station_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CM.xml"), SCHEDULE).unwrap();
        let client = MockNjtClient::new(dir.path()).unwrap();

        let err = client.fetch_departures(&code("NY")).await.unwrap_err();

        assert!(matches!(err, ScheduleError::UnknownStation(c) if c == code("NY")));
    }

    #[test]
    fn station_list_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STATION_LIST_FILE), STATIONS).unwrap();

        let client = MockNjtClient::new(dir.path()).unwrap();

        let stations = client.fetch_station_list().unwrap();
        assert_eq!(stations.len(), 2);
        assert!(client.stations().is_empty());
    }

    #[test]
    fn no_station_list_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = MockNjtClient::new(dir.path()).unwrap();

        assert!(client.fetch_station_list().is_err());
    }

    const TIMETABLE: &str = r#"<STATION><ITEMS><ITEM>
        <ITEM_INDEX>0</ITEM_INDEX>
        <SCHED_DEP_DATE>11-Dec-2018 07:00:00 AM</SCHED_DEP_DATE>
        <DESTINATION>Hoboken</DESTINATION>
        <TRAIN_ID>6620</TRAIN_ID>
    </ITEM></ITEMS></STATION>"#;

    const STOP_LIST: &str = r#"<string>{"Train":{"Train_ID":"6620","STOPS":{"STOP":[
        {"NAME":"Chatham","TIME":"11-Dec-2018 07:00:00 AM","DEPARTED":"NO","STOP_STATUS":""},
        {"NAME":"Hoboken","TIME":"11-Dec-2018 07:55:00 AM","DEPARTED":"NO","STOP_STATUS":""}
    ]}}}</string>"#;

    #[test]
    fn serves_timetables_and_stop_lists() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(STATION_SCHEDULE_DIR)).unwrap();
        fs::create_dir(dir.path().join(TRAIN_STOPS_DIR)).unwrap();
        fs::write(dir.path().join(STATION_SCHEDULE_DIR).join("CM.xml"), TIMETABLE).unwrap();
        fs::write(dir.path().join(TRAIN_STOPS_DIR).join("6620.xml"), STOP_LIST).unwrap();

        let client = MockNjtClient::new(dir.path()).unwrap();

        // Timetables are not real-time schedules.
        assert!(client.stations().is_empty());
        let timetable = client.fetch_station_schedule(&code("CM")).unwrap();
        assert_eq!(timetable.len(), 1);
        assert_eq!(timetable[0].train_id, "6620");

        let stops = client.fetch_train_stops("6620").unwrap();
        assert_eq!(stops.stops.len(), 2);
    }

    #[test]
    fn unknown_timetable_and_train() {
        let dir = tempfile::tempdir().unwrap();
        let client = MockNjtClient::new(dir.path()).unwrap();

        assert!(matches!(
            client.fetch_station_schedule(&code("CM")),
            Err(ScheduleError::UnknownStation(_))
        ));
        assert!(matches!(
            client.fetch_train_stops("6620"),
            Err(ScheduleError::UnknownTrain(id)) if id == "6620"
        ));
    }

    #[test]
    fn broken_stop_list_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(TRAIN_STOPS_DIR)).unwrap();
        fs::write(dir.path().join(TRAIN_STOPS_DIR).join("1.xml"), "<string>[]</string>").unwrap();

        let err = MockNjtClient::new(dir.path()).unwrap_err();

        assert!(matches!(err, ScheduleError::Json(_)));
    }

    #[test]
    fn broken_file_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CM.xml"), "not xml").unwrap();

        let err = MockNjtClient::new(dir.path()).unwrap_err();

        assert!(matches!(err, ScheduleError::Xml(_)));
    }

    #[test]
    fn missing_dir_is_io_error() {
        let err = MockNjtClient::new("/nonexistent/mock/dir").unwrap_err();

        assert!(matches!(err, ScheduleError::Io(_)));
    }
}
