//! Best-route selection.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::domain::{BestRoute, IndirectRoute, RouteSet, Train};

use super::config::{CrossCategoryTieBreak, MatchConfig};

/// When a candidate leaves the origin and reaches the destination.
#[derive(Debug, Clone, Copy)]
struct Timing {
    depart: NaiveDateTime,
    arrive: NaiveDateTime,
}

fn direct_timing(train: &Train, origin: &str, destination: &str) -> Option<Timing> {
    Some(Timing {
        depart: train.time_at(origin)?,
        arrive: train.time_at(destination)?,
    })
}

fn indirect_timing(route: &IndirectRoute, origin: &str, destination: &str) -> Option<Timing> {
    Some(Timing {
        depart: route.start.time_at(origin)?,
        arrive: route.transfer.time_at(destination)?,
    })
}

fn best_direct<'a>(
    trains: &'a [Arc<Train>],
    origin: &str,
    destination: &str,
) -> Option<(&'a Arc<Train>, Timing)> {
    trains
        .iter()
        .filter_map(|t| Some((t, direct_timing(t, origin, destination)?)))
        .min_by_key(|(t, timing)| (timing.arrive, Reverse(timing.depart), t.id().to_string()))
}

fn best_indirect<'a>(
    routes: &'a [IndirectRoute],
    origin: &str,
    destination: &str,
) -> Option<(&'a IndirectRoute, Timing)> {
    routes
        .iter()
        .filter_map(|r| Some((r, indirect_timing(r, origin, destination)?)))
        .min_by_key(|(r, timing)| {
            (
                timing.arrive,
                Reverse(timing.depart),
                r.start.id().to_string(),
                r.transfer.id().to_string(),
            )
        })
}

/// Pick the single best itinerary from `routes`.
///
/// Within each category the earliest arrival at `destination` wins, then the
/// latest departure from `origin`, then the lowest train id. Between the two
/// category winners a strictly earlier arrival wins; an exact tie is settled
/// by [`MatchConfig::tie_break`]. Routes missing an origin or destination
/// stop are ignored.
pub fn select_best(
    origin: &str,
    destination: &str,
    routes: &RouteSet,
    config: &MatchConfig,
) -> BestRoute {
    let direct = best_direct(&routes.direct, origin, destination);
    let indirect = best_indirect(&routes.indirect, origin, destination);

    match (direct, indirect) {
        (None, None) => BestRoute::None,
        (Some((train, _)), None) => BestRoute::Direct(train.clone()),
        (None, Some((route, _))) => BestRoute::Indirect(route.clone()),
        (Some((train, d)), Some((route, i))) => {
            let indirect_wins = match config.tie_break {
                CrossCategoryTieBreak::PreferDirect => i.arrive < d.arrive,
                CrossCategoryTieBreak::LatestDeparture => {
                    i.arrive < d.arrive || (i.arrive == d.arrive && i.depart > d.depart)
                }
            };
            if indirect_wins {
                BestRoute::Indirect(route.clone())
            } else {
                BestRoute::Direct(train.clone())
            }
        }
    }
}
