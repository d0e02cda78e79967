use indexmap::map::Entry;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use super::config::{RouteConfig, Strategy};
use crate::constants::{STOP_PENALTY, TRANSFER_PENALTY};
use crate::models::{Connections, NetworkGraph, Neighbor, Stations};

/// Search state: the station reached and the line ridden into it (`None` at the origin)
type State<'a> = (&'a str, Option<&'a str>);

#[derive(Debug)]
struct SmallestHolder {
    cost: f64,
    index: usize,
}

impl PartialEq for SmallestHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SmallestHolder {}

impl PartialOrd for SmallestHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestHolder {
    // Reversed so the max-heap yields the cheapest entry; equal costs pop in discovery order
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Cost of leaving `state` over `edge`
fn move_cost(graph: &NetworkGraph, state: State<'_>, edge: &Neighbor<'_>, config: &RouteConfig) -> f64 {
    let (station_id, current_line) = state;
    let is_transfer = current_line.is_some_and(|line| line != edge.line);

    match config.strategy {
        Strategy::MinTime => {
            let mut cost = config.hop_time_sec(edge.distance_km);
            if current_line.is_some() {
                cost += if is_transfer {
                    config.transfer_time_sec
                } else {
                    let at_transfer_station = graph.station(station_id).is_some_and(|station| station.is_transfer);
                    config.dwell_time_sec(at_transfer_station)
                };
            }
            cost
        }
        Strategy::MinTransfers | Strategy::MinStops => {
            let mut cost = 0.0;
            if is_transfer {
                cost += TRANSFER_PENALTY;
            }
            cost + STOP_PENALTY
        }
    }
}

/// Cheapest station sequence from `start` to `end` over (station, line) states
///
/// The first time any state at `end` is settled its cost is minimal, so the
/// search stops there.
pub(crate) fn cheapest_path<'a>(
    graph: &'a NetworkGraph,
    start: &'a str,
    end: &str,
    config: &RouteConfig,
) -> Option<(Vec<&'a str>, f64)> {
    let mut to_see: BinaryHeap<SmallestHolder> = BinaryHeap::new();
    to_see.push(SmallestHolder { cost: 0.0, index: 0 });

    let mut parents: IndexMap<State<'a>, (usize, f64)> = IndexMap::new();
    parents.insert((start, None), (usize::MAX, 0.0));

    let mut settled: HashSet<usize> = HashSet::new();

    while let Some(SmallestHolder { cost, index }) = to_see.pop() {
        if !settled.insert(index) {
            continue;
        }

        let Some((&state, &(_, best))) = parents.get_index(index) else {
            continue;
        };
        if cost > best {
            continue;
        }

        if state.0 == end {
            return Some((reverse_path(&parents, index), cost));
        }

        for edge in graph.neighbors(state.0) {
            let new_cost = cost + move_cost(graph, state, &edge, config);
            let successor = (edge.to, Some(edge.line));

            let successor_index = match parents.entry(successor) {
                Entry::Vacant(e) => {
                    let n = e.index();
                    e.insert((index, new_cost));
                    n
                }
                Entry::Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        continue;
                    }
                }
            };

            to_see.push(SmallestHolder {
                cost: new_cost,
                index: successor_index,
            });
        }
    }

    None
}

fn reverse_path<'a>(parents: &IndexMap<State<'a>, (usize, f64)>, target: usize) -> Vec<&'a str> {
    let mut path = Vec::new();
    let mut index = target;

    while let Some((&(station_id, _), &(parent, _))) = parents.get_index(index) {
        path.push(station_id);
        index = parent;
    }

    path.reverse();
    path
}
