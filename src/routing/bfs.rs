use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use crate::models::{Connections, NetworkGraph};

/// Fewest-hop station sequence from `start` to `end`
///
/// Neighbors are expanded in the graph's pinned order, so among equally short
/// paths the result is stable across runs.
pub(crate) fn fewest_stops<'a>(graph: &'a NetworkGraph, start: &'a str, end: &str) -> Option<Vec<&'a str>> {
    let mut parents: HashMap<&'a str, Option<&'a str>> = HashMap::new();
    parents.insert(start, None);

    let mut queue = VecDeque::from([start]);

    while let Some(station_id) = queue.pop_front() {
        if station_id == end {
            return Some(reverse_path(&parents, station_id));
        }

        for neighbor in graph.neighbors(station_id) {
            if let Entry::Vacant(e) = parents.entry(neighbor.to) {
                e.insert(Some(station_id));
                queue.push_back(neighbor.to);
            }
        }
    }

    None
}

fn reverse_path<'a>(parents: &HashMap<&'a str, Option<&'a str>>, target: &'a str) -> Vec<&'a str> {
    let mut path = vec![target];
    let mut current = target;

    while let Some(&Some(parent)) = parents.get(current) {
        path.push(parent);
        current = parent;
    }

    path.reverse();
    path
}
