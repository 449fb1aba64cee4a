//! Jersey Trains voice skill server.
//!
//! Answers "when is the next train from my home station to X?" for the
//! NJ Transit rail network, including itineraries with one change of
//! trains.

pub mod cache;
pub mod domain;
pub mod home;
pub mod njtransit;
pub mod planner;
pub mod skill;
pub mod stations;

#[cfg(test)]
pub(crate) mod test_support;
