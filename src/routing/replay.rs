use super::config::RouteConfig;
use super::types::{RouteResult, RouteStep};
use crate::geometry::round_half_up;
use crate::models::{Connections, NetworkGraph, Stations};

/// Walk a station sequence and compute its itinerary and totals
///
/// For each hop the edge on the line currently held is preferred; otherwise the
/// first connecting edge is taken and, past the first hop, a transfer is recorded.
/// Returns `None` if the path is empty or two consecutive stations are not connected.
pub(crate) fn replay<S: AsRef<str>>(graph: &NetworkGraph, path: &[S], config: &RouteConfig) -> Option<RouteResult> {
    if path.is_empty() {
        return None;
    }

    let mut steps = Vec::new();
    let mut total_time = 0.0;
    let mut total_distance = 0.0;
    let mut total_transfers = 0;
    let mut current_line: Option<String> = None;
    let last_hop = path.len().saturating_sub(2);

    for (i, pair) in path.windows(2).enumerate() {
        let (from, to) = (pair[0].as_ref(), pair[1].as_ref());

        let neighbors = graph.neighbors(from);
        let held = neighbors
            .iter()
            .find(|edge| edge.to == to && current_line.as_deref() == Some(edge.line));
        let Some(edge) = held.or_else(|| neighbors.iter().find(|edge| edge.to == to)) else {
            log::warn!("No connection between {from} and {to}, cannot replay path");
            return None;
        };

        if i > 0 {
            if current_line.as_deref().is_some_and(|line| line != edge.line) {
                total_transfers += 1;
                total_time += config.transfer_time_sec;
                steps.push(RouteStep::Transfer {
                    station_id: from.to_string(),
                    line_id: edge.line.to_string(),
                    duration_sec: config.transfer_time_sec,
                });
            } else {
                let at_transfer_station = graph.station(from).is_some_and(|station| station.is_transfer);
                total_time += config.dwell_time_sec(at_transfer_station);
            }
        }

        current_line = Some(edge.line.to_string());

        let distance_km = config.hop_distance(edge.distance_km);
        let duration_sec = config.hop_time_sec(edge.distance_km);
        total_distance += distance_km;
        total_time += duration_sec;

        if i == 0 {
            steps.push(RouteStep::Start {
                station_id: from.to_string(),
                line_id: edge.line.to_string(),
            });
        }

        let station_id = to.to_string();
        let line_id = edge.line.to_string();
        steps.push(if i == last_hop {
            RouteStep::End { station_id, line_id, distance_km, duration_sec }
        } else {
            RouteStep::Move { station_id, line_id, distance_km, duration_sec }
        });
    }

    Some(RouteResult {
        path: path.iter().map(|id| id.as_ref().to_string()).collect(),
        steps,
        total_time_sec: round_half_up(total_time),
        total_distance_km: round_half_up(total_distance * 100.0) / 100.0,
        total_transfers,
        total_stops: path.len() - 1,
    })
}
