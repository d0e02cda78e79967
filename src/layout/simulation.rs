use std::collections::HashMap;
use std::f64::consts::FRAC_PI_4;
use std::sync::atomic::{AtomicBool, Ordering};

use super::config::LayoutConfig;
use crate::geometry::{ccw_gap, nearest_octolinear_angle, snap_to_grid};
#[allow(unused_imports)]
use crate::logging::debug_log;
use crate::models::Diagram;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Body {
    pub x: f64,
    pub y: f64,
    vx: f64,
    vy: f64,
}

/// Force-directed relaxation of a diagram towards an octolinear, grid-aligned drawing
///
/// Forces only accumulate into velocities during an iteration; positions move
/// once at the end, so the result depends on node and link order alone.
pub(crate) struct Simulation<'c> {
    bodies: Vec<Body>,
    links: Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
    config: &'c LayoutConfig,
}

impl<'c> Simulation<'c> {
    pub fn new(diagram: &Diagram, config: &'c LayoutConfig) -> Self {
        let bodies: Vec<Body> = diagram
            .nodes
            .iter()
            .map(|node| Body { x: node.x, y: node.y, ..Body::default() })
            .collect();

        let index_of: HashMap<&str, usize> = diagram
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        let mut links = Vec::with_capacity(diagram.links.len());
        let mut adjacency = vec![Vec::new(); bodies.len()];
        for link in &diagram.links {
            let (Some(&source), Some(&target)) = (index_of.get(link.source.as_str()), index_of.get(link.target.as_str()))
            else {
                log::warn!("Link {} - {} references a node outside the diagram, skipping", link.source, link.target);
                continue;
            };
            links.push((source, target));
            adjacency[source].push(target);
            adjacency[target].push(source);
        }

        Self { bodies, links, adjacency, config }
    }

    /// Run every iteration unless `cancel` is raised
    ///
    /// Returns `false` if the run was cancelled; positions are then partially relaxed.
    pub fn run(&mut self, cancel: Option<&AtomicBool>) -> bool {
        if self.bodies.is_empty() {
            return true;
        }

        #[cfg(feature = "perf_timing")]
        let started = std::time::Instant::now();

        for iteration in 0..self.config.iterations {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                debug_log!("Layout cancelled at iteration {iteration}");
                return false;
            }
            self.tick(iteration);
        }

        #[cfg(feature = "perf_timing")]
        log::debug!(
            "Layout of {} nodes / {} links took {:.2}ms",
            self.bodies.len(),
            self.links.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );

        true
    }

    pub fn tick(&mut self, iteration: usize) {
        self.apply_repulsion();
        self.apply_links(self.config.is_warm(iteration));
        self.apply_angular_separation();
        self.apply_straightening();
        if self.config.is_late(iteration) {
            self.apply_grid_snap();
        }
        self.integrate(self.config.step(iteration));
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    fn apply_repulsion(&mut self) {
        let n = self.bodies.len();
        for j in 0..n {
            for k in (j + 1)..n {
                let dx = self.bodies[k].x - self.bodies[j].x;
                let dy = self.bodies[k].y - self.bodies[j].y;
                let mut dist_sq = dx * dx + dy * dy;
                if dist_sq == 0.0 {
                    dist_sq = 1.0;
                }
                let dist = dist_sq.sqrt();
                if dist >= self.config.repulsion_range {
                    continue;
                }

                let force = self.config.repulsion / dist_sq;
                let fx = dx / dist * force;
                let fy = dy / dist * force;
                self.bodies[j].vx -= fx;
                self.bodies[j].vy -= fy;
                self.bodies[k].vx += fx;
                self.bodies[k].vy += fy;
            }
        }
    }

    /// Spring towards the rest length, plus a torque towards the nearest 45° once warm
    fn apply_links(&mut self, octolinear: bool) {
        for &(source, target) in &self.links {
            let dx = self.bodies[target].x - self.bodies[source].x;
            let dy = self.bodies[target].y - self.bodies[source].y;
            let mut dist = (dx * dx + dy * dy).sqrt();
            if dist == 0.0 {
                dist = 1.0;
            }

            let force = (dist - self.config.link_distance) * self.config.spring_strength;
            let fx = dx / dist * force;
            let fy = dy / dist * force;
            self.bodies[source].vx += fx;
            self.bodies[source].vy += fy;
            self.bodies[target].vx -= fx;
            self.bodies[target].vy -= fy;

            if octolinear {
                let angle = dy.atan2(dx);
                let rotate = (angle - nearest_octolinear_angle(angle)).sin() * self.config.octolinear_strength * dist;
                let rfx = -dy / dist * rotate;
                let rfy = dx / dist * rotate;
                self.bodies[source].vx += rfx;
                self.bodies[source].vy += rfy;
                self.bodies[target].vx -= rfx;
                self.bodies[target].vy -= rfy;
            }
        }
    }

    /// Push apart neighbors whose incident edges are closer than 45° around a shared node
    fn apply_angular_separation(&mut self) {
        let impulse_scale = self.config.angular_damping;
        let mut around: Vec<(usize, f64)> = Vec::new();

        for center in 0..self.bodies.len() {
            let neighbors = &self.adjacency[center];
            if neighbors.len() <= 1 {
                continue;
            }

            let origin = self.bodies[center];
            around.clear();
            around.extend(neighbors.iter().map(|&n| {
                let body = &self.bodies[n];
                (n, (body.y - origin.y).atan2(body.x - origin.x))
            }));
            around.sort_by(|a, b| a.1.total_cmp(&b.1));

            for k in 0..around.len() {
                let (current, current_angle) = around[k];
                let (next, next_angle) = around[(k + 1) % around.len()];
                let gap = ccw_gap(current_angle, next_angle);
                if gap >= FRAC_PI_4 {
                    continue;
                }

                // `current` turns clockwise and `next` counter-clockwise, widening the gap
                let force = self.config.angular_strength * (FRAC_PI_4 - gap);
                self.bodies[current].vx += current_angle.sin() * force * impulse_scale;
                self.bodies[current].vy -= current_angle.cos() * force * impulse_scale;
                self.bodies[next].vx -= next_angle.sin() * force * impulse_scale;
                self.bodies[next].vy += next_angle.cos() * force * impulse_scale;
            }
        }
    }

    /// Pull pass-through stations onto the line between their two neighbors
    fn apply_straightening(&mut self) {
        for i in 0..self.bodies.len() {
            let [a, b] = self.adjacency[i][..] else {
                continue;
            };
            let mid_x = (self.bodies[a].x + self.bodies[b].x) / 2.0;
            let mid_y = (self.bodies[a].y + self.bodies[b].y) / 2.0;
            let body = &mut self.bodies[i];
            body.vx += (mid_x - body.x) * self.config.straighten_strength;
            body.vy += (mid_y - body.y) * self.config.straighten_strength;
        }
    }

    fn apply_grid_snap(&mut self) {
        for body in &mut self.bodies {
            let (grid_x, grid_y) = snap_to_grid(body.x, body.y, self.config.grid_size);
            body.vx += (grid_x - body.x) * self.config.grid_snap_strength;
            body.vy += (grid_y - body.y) * self.config.grid_snap_strength;
        }
    }

    fn integrate(&mut self, step: f64) {
        for body in &mut self.bodies {
            body.x += body.vx * step;
            body.y += body.vy * step;
            body.vx *= self.config.velocity_damping;
            body.vy *= self.config.velocity_damping;
        }
    }
}
