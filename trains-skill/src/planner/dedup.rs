//! Collapse transfer options that share a starting train.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::domain::IndirectRoute;

/// Keep one route per starting train: the one whose connecting train
/// reaches `destination` first.
///
/// On an arrival tie the route seen first is kept. The output lists starting
/// trains in order of first appearance. Routes whose connecting train has no
/// stop at `destination` cannot be ranked and are dropped.
pub fn deduplicate_transfers(routes: Vec<IndirectRoute>, destination: &str) -> Vec<IndirectRoute> {
    let mut kept: Vec<(IndirectRoute, NaiveDateTime)> = Vec::with_capacity(routes.len());
    let mut by_start: HashMap<String, usize> = HashMap::new();

    for route in routes {
        let Some(arrival) = route.transfer.time_at(destination) else {
            debug!(
                start = route.start.id(),
                transfer = route.transfer.id(),
                "connecting train has no destination stop, dropping"
            );
            continue;
        };

        match by_start.get(route.start.id()) {
            Some(&idx) => {
                if arrival < kept[idx].1 {
                    kept[idx] = (route, arrival);
                }
            }
            None => {
                by_start.insert(route.start.id().to_string(), kept.len());
                kept.push((route, arrival));
            }
        }
    }

    kept.into_iter().map(|(route, _)| route).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::train;

    fn route(start: &str, transfer: &str, arrives: &str) -> IndirectRoute {
        IndirectRoute::new(
            train(start, &[("Chatham", "07:00"), ("Newark", "07:40")]),
            train(transfer, &[("Newark", "07:50"), ("Hoboken", arrives)]),
            "Newark",
        )
    }

    fn pairs(routes: &[IndirectRoute]) -> Vec<(&str, &str)> {
        routes
            .iter()
            .map(|r| (r.start.id(), r.transfer.id()))
            .collect()
    }

    #[test]
    fn earliest_arrival_kept() {
        let routes = vec![route("05", "04", "08:30"), route("05", "07", "08:25")];

        let deduped = deduplicate_transfers(routes, "Hoboken");

        assert_eq!(pairs(&deduped), [("05", "07")]);
    }

    #[test]
    fn first_seen_wins_tie() {
        let routes = vec![route("05", "04", "08:30"), route("05", "07", "08:30")];

        let deduped = deduplicate_transfers(routes, "Hoboken");

        assert_eq!(pairs(&deduped), [("05", "04")]);
    }

    #[test]
    fn order_of_first_appearance_kept() {
        let routes = vec![
            route("B", "x", "09:00"),
            route("A", "y", "08:20"),
            route("B", "z", "08:10"),
        ];

        let deduped = deduplicate_transfers(routes, "Hoboken");

        assert_eq!(pairs(&deduped), [("B", "z"), ("A", "y")]);
    }

    #[test]
    fn exact_duplicates_collapse() {
        let r = route("05", "04", "08:30");

        let deduped = deduplicate_transfers(vec![r.clone(), r.clone()], "Hoboken");

        assert_eq!(deduped, vec![r]);
    }

    #[test]
    fn route_without_destination_stop_dropped() {
        let routes = vec![route("05", "04", "08:30")];

        assert!(deduplicate_transfers(routes, "Secaucus").is_empty());
    }

    #[test]
    fn empty_input() {
        assert!(deduplicate_transfers(Vec::new(), "Hoboken").is_empty());
    }
}
