//! Itinerary matching.
//!
//! This module answers: "which trains get me from here to there, directly
//! or with one change, and which of them should I take?"
//!
//! Matching works on two station schedules fetched per request: every
//! train listed at the origin and every train listed at the destination.
//! Origin trains reaching the destination are direct routes; the rest are
//! paired with destination trains at a shared intermediate station.

mod config;
mod dedup;
mod direct;
mod engine;
mod select;
mod transfer;


pub use config::{CrossCategoryTieBreak, MatchConfig};
pub use dedup::deduplicate_transfers;
pub use direct::{Partition, partition_departures};
pub use engine::{Engine, PlanError, ScheduleProvider};
pub use select::select_best;
pub use transfer::{TransferQuery, find_transfers};
