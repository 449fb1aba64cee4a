//! Domain types for the trains skill.
//!
//! This module contains the core domain model types that represent
//! validated schedule data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod route;
mod station;
mod time;
mod train;

pub use error::DomainError;
pub use route::{BestRoute, IndirectRoute, RouteSet};
pub use station::{InvalidStationCode, StationCode};
pub use time::{
    NETWORK_TIME_ZONE, NJT_TIMESTAMP_FORMAT, TimeError, format_njt_timestamp, parse_njt_timestamp,
    to_network_time,
};
pub use train::{StationStop, Stop, StopStatus, Train};
