//! NJ Transit train data HTTP client.
//!
//! Every call is a form-encoded POST carrying the account credentials;
//! responses are XML documents decoded by [`super::parse`].

use std::time::Duration;

use tracing::debug;

use crate::domain::{StationCode, Train};
use crate::planner::ScheduleProvider;

use super::error::ScheduleError;
use super::parse::{
    parse_station_list, parse_station_schedule, parse_train_schedule, parse_train_stops,
};
use super::types::{ScheduledDeparture, TrainStopList};

/// Default base URL for the NJ Transit train data service.
const DEFAULT_BASE_URL: &str = "https://traindata.njtransit.com:8092/NJTTrainData.asmx";

/// Configuration for the NJ Transit client.
#[derive(Debug, Clone)]
pub struct NjtConfig {
    /// Account user name
    pub username: String,
    /// Account API key, sent as the `password` form field
    pub apikey: String,
    /// Base URL for the service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Restrict schedules to NJ Transit trains
    pub njt_only: bool,
}

impl NjtConfig {
    /// Create a new config with the given credentials.
    pub fn new(username: impl Into<String>, apikey: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            apikey: apikey.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            njt_only: false,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Only list NJ Transit trains in schedules.
    pub fn with_njt_only(mut self, njt_only: bool) -> Self {
        self.njt_only = njt_only;
        self
    }
}

/// NJ Transit train data client.
#[derive(Debug, Clone)]
pub struct NjtClient {
    http: reqwest::Client,
    config: NjtConfig,
}

impl NjtClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NjtConfig) -> Result<Self, ScheduleError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    fn njt_only_flag(&self) -> &'static str {
        if self.config.njt_only { "true" } else { "" }
    }

    fn url(&self, operation: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), operation)
    }

    /// POST `form` to `operation` and return the response body.
    async fn post(&self, operation: &str, form: &[(&str, &str)]) -> Result<String, ScheduleError> {
        let mut fields = vec![
            ("username", self.config.username.as_str()),
            ("password", self.config.apikey.as_str()),
        ];
        fields.extend_from_slice(form);

        let response = self
            .http
            .post(self.url(operation))
            .header(reqwest::header::ACCEPT, "application/xml")
            .form(&fields)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ScheduleError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScheduleError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }

    /// Real-time schedule for a station: every train listed there, with
    /// all of its stops.
    pub async fn train_schedule(&self, station: &StationCode) -> Result<Vec<Train>, ScheduleError> {
        let body = self
            .post(
                "getTrainScheduleXML",
                &[("station", station.as_str()), ("NJT_Only", self.njt_only_flag())],
            )
            .await?;

        let trains = parse_train_schedule(&body)?;
        debug!(%station, count = trains.len(), "parsed train schedule");
        Ok(trains)
    }

    /// The station's timetable for the whole day. Not real time: no stops,
    /// no status.
    pub async fn fetch_station_schedule(
        &self,
        station: &StationCode,
    ) -> Result<Vec<ScheduledDeparture>, ScheduleError> {
        let body = self
            .post(
                "getStationScheduleXML",
                &[("station", station.as_str()), ("NJT_Only", self.njt_only_flag())],
            )
            .await?;

        let departures = parse_station_schedule(&body)?;
        debug!(%station, count = departures.len(), "parsed station timetable");
        Ok(departures)
    }

    /// Every stop of one train.
    pub async fn fetch_train_stops(&self, train_id: &str) -> Result<TrainStopList, ScheduleError> {
        let body = self
            .post("getTrainStopListJSON", &[("trainID", train_id)])
            .await?;
        parse_train_stops(&body)
    }

    /// Every station on the network as `(code, name)`.
    pub async fn fetch_station_list(&self) -> Result<Vec<(StationCode, String)>, ScheduleError> {
        let body = self.post("getStationListXML", &[]).await?;
        parse_station_list(&body)
    }
}

impl ScheduleProvider for NjtClient {
    async fn fetch_departures(&self, station: &StationCode) -> Result<Vec<Train>, ScheduleError> {
        self.train_schedule(station).await
    }
}
