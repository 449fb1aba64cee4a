//! Itinerary engine: fetch both station schedules and match them.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::domain::{BestRoute, RouteSet, StationCode, Train};
use crate::njtransit::ScheduleError;
use crate::stations::StationDirectory;

use super::config::MatchConfig;
use super::dedup::deduplicate_transfers;
use super::direct::partition_departures;
use super::select::select_best;
use super::transfer::{TransferQuery, find_transfers};

/// Error from route computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Station code is malformed or not in the directory
    #[error("unknown station: {0:?}")]
    InvalidStation(String),

    /// Origin and destination are the same station
    #[error("origin and destination are the same station")]
    SameStation,
}

/// Trait for providing station schedules.
///
/// This abstraction allows the engine to be tested with fixture data.
pub trait ScheduleProvider {
    /// Every train currently listed for `station`, with all of its stops.
    fn fetch_departures(
        &self,
        station: &StationCode,
    ) -> impl Future<Output = Result<Vec<Train>, ScheduleError>> + Send;
}

/// A resolved station: its code and its full name.
#[derive(Debug, Clone)]
struct Endpoint {
    code: StationCode,
    name: String,
}

/// Route engine over a schedule provider and station directory.
pub struct Engine<P, D> {
    provider: P,
    directory: D,
    config: MatchConfig,
}

impl<P, D> Engine<P, D>
where
    P: ScheduleProvider + Sync,
    D: StationDirectory + Sync,
{
    /// Create a new engine.
    pub fn new(provider: P, directory: D, config: MatchConfig) -> Self {
        Self {
            provider,
            directory,
            config,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Find every direct and one-change route between two stations.
    ///
    /// `origin` and `destination` are station codes. Both are validated
    /// before anything is fetched. A schedule that cannot be fetched is
    /// treated as empty, so an upstream outage yields an empty set rather
    /// than an error.
    pub async fn compute_routes(
        &self,
        origin: &str,
        destination: &str,
        departure: NaiveDateTime,
    ) -> Result<RouteSet, PlanError> {
        let origin = self.resolve(origin)?;
        let destination = self.resolve(destination)?;
        if origin.code == destination.code {
            return Err(PlanError::SameStation);
        }

        let origin_trains = self.fetch(&origin.code).await;
        let destination_trains = self.fetch(&destination.code).await;

        let partition =
            partition_departures(&origin_trains, &origin.name, &destination.name, departure);

        let query = TransferQuery {
            origin: &origin.name,
            destination: &destination.name,
            departure,
        };
        let transfers = find_transfers(
            &partition.candidates,
            &destination_trains,
            &query,
            &self.config,
        );
        let found = transfers.len();
        let indirect = deduplicate_transfers(transfers, &destination.name);

        info!(
            origin = %origin.code,
            destination = %destination.code,
            %departure,
            direct = partition.direct.len(),
            transfers = found,
            indirect = indirect.len(),
            "computed routes"
        );

        Ok(RouteSet {
            direct: partition.direct,
            indirect,
        })
    }

    /// Pick the best of `routes`; station arguments are full names.
    pub fn select_best(&self, origin: &str, destination: &str, routes: &RouteSet) -> BestRoute {
        select_best(origin, destination, routes, &self.config)
    }

    fn resolve(&self, input: &str) -> Result<Endpoint, PlanError> {
        let code = StationCode::parse_normalized(input)
            .map_err(|_| PlanError::InvalidStation(input.to_string()))?;
        let name = self
            .directory
            .name_for(&code)
            .ok_or_else(|| PlanError::InvalidStation(input.to_string()))?;
        Ok(Endpoint {
            code,
            name: name.to_string(),
        })
    }

    async fn fetch(&self, station: &StationCode) -> Vec<Arc<Train>> {
        match self.provider.fetch_departures(station).await {
            Ok(trains) => {
                debug!(%station, count = trains.len(), "fetched schedule");
                trains.into_iter().map(Arc::new).collect()
            }
            Err(e) => {
                warn!(%station, error = %e, "failed to fetch schedule, treating as empty");
                Vec::new()
            }
        }
    }
}
