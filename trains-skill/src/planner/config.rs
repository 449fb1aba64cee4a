//! Matching configuration for the itinerary engine.

use chrono::Duration;

/// How to choose between the best direct and best transfer route when both
/// reach the destination at the same minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossCategoryTieBreak {
    /// Arrival decides alone; on a tie the direct train wins.
    #[default]
    PreferDirect,
    /// On a tie the route leaving later wins, then the direct train.
    LatestDeparture,
}

/// Configuration parameters for route matching.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Minimum time between the two trains at the transfer station (minutes).
    /// Connections tighter than this are rejected.
    pub min_transfer_mins: i64,

    /// Maximum wait at the transfer station (minutes).
    /// `None` accepts any wait.
    pub max_transfer_mins: Option<i64>,

    /// Tie-break between direct and transfer winners.
    pub tie_break: CrossCategoryTieBreak,
}

impl MatchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        min_transfer_mins: i64,
        max_transfer_mins: Option<i64>,
        tie_break: CrossCategoryTieBreak,
    ) -> Self {
        Self {
            min_transfer_mins,
            max_transfer_mins,
            tie_break,
        }
    }

    /// Set the minimum transfer time.
    pub fn with_min_transfer(mut self, mins: i64) -> Self {
        self.min_transfer_mins = mins;
        self
    }

    /// Cap the transfer wait.
    pub fn with_max_transfer(mut self, mins: Option<i64>) -> Self {
        self.max_transfer_mins = mins;
        self
    }

    /// Set the cross-category tie-break.
    pub fn with_tie_break(mut self, tie_break: CrossCategoryTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Returns the minimum transfer time as a Duration.
    pub fn min_transfer(&self) -> Duration {
        Duration::minutes(self.min_transfer_mins)
    }

    /// Returns the maximum transfer wait as a Duration, if capped.
    pub fn max_transfer(&self) -> Option<Duration> {
        self.max_transfer_mins.map(Duration::minutes)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_transfer_mins: 5,
            max_transfer_mins: None,
            tie_break: CrossCategoryTieBreak::PreferDirect,
        }
    }
}
