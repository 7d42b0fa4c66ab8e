//! Procedural network globe: scattered nodes, curved arcs between them, and
//! the per-frame animation of arc opacity and traveling markers.
//!
//! Everything random is drawn once in [`Globe::generate`]. After that the
//! globe is read-only and [`Globe::update`] is a pure function of elapsed
//! time, so any frame can be reproduced by passing the same elapsed value.

use crate::config::GlobeConfig;
use crate::error::GlobeError;
use crate::geometry::{lat_lon_to_cartesian, lerp, quadratic_bezier, Vec3};
use log::debug;
use rand::Rng;
use serde::Serialize;
use std::f32::consts::TAU;

/// Points sampled along every arc (t = 0.0, 0.1, ..., 1.0)
pub const PATH_SAMPLES: usize = 11;
/// Marker progress per second of elapsed time
pub const FLOW_SPEED: f32 = 0.5;
/// Per-arc phase stagger for both the opacity pulse and marker progress
pub const ARC_PHASE_STEP: f32 = 0.1;
pub const ARC_OPACITY_MIN: f32 = 0.3;
pub const ARC_OPACITY_MAX: f32 = 0.6;

/// A fixed endpoint on the globe surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub position: Vec3,
    pub pulse_speed: f32,
    pub pulse_offset: f32,
}

impl Node {
    /// Pulse level in [0, 1] at `elapsed`.
    pub fn pulse(&self, elapsed: f32) -> f32 {
        ((elapsed * self.pulse_speed + self.pulse_offset).sin() + 1.0) / 2.0
    }
}

/// A curved connection between two nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arc {
    pub start: usize,
    pub end: usize,
    pub control: Vec3,
    pub path: [Vec3; PATH_SAMPLES],
}

impl Arc {
    /// Build the arc from `start` to `end` with its control point lifted to
    /// `elevation` above the origin.
    pub fn between(nodes: &[Node], start: usize, end: usize, elevation: f32) -> Result<Self, GlobeError> {
        let from = node_position(nodes, start)?;
        let to = node_position(nodes, end)?;
        if start == end {
            return Err(GlobeError::SelfLoop { index: start });
        }

        // Antipodal endpoints have no midpoint direction; bend over any
        // great circle through `from` instead.
        let direction = ((from + to) * 0.5)
            .try_normalized()
            .unwrap_or_else(|| from.any_perpendicular());
        let control = direction * elevation;

        let path = std::array::from_fn(|j| {
            let t = j as f32 / (PATH_SAMPLES - 1) as f32;
            quadratic_bezier(from, control, to, t)
        });

        Ok(Self { start, end, control, path })
    }

    /// Position along the sampled polyline at `progress` in [0, 1).
    ///
    /// Interpolates linearly between the two samples around `progress`; the
    /// result never leaves the last segment.
    pub fn point_at(&self, progress: f32) -> Vec3 {
        let segments = (PATH_SAMPLES - 1) as f32;
        let scaled = progress.clamp(0.0, 1.0) * segments;
        let segment = (scaled.floor() as usize).min(PATH_SAMPLES - 2);
        let fraction = (scaled - segment as f32).clamp(0.0, 1.0);
        self.path[segment].lerp(self.path[segment + 1], fraction)
    }
}

fn node_position(nodes: &[Node], index: usize) -> Result<Vec3, GlobeError> {
    nodes
        .get(index)
        .map(|n| n.position)
        .ok_or(GlobeError::NodeIndex { index, nodes: nodes.len() })
}

/// Uniform draw from [min, max), collapsing to `min` for an empty range.
fn sample<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Scatter `config.node_count` nodes over the sphere of `config.node_radius`.
pub fn scatter_nodes<R: Rng + ?Sized>(config: &GlobeConfig, rng: &mut R) -> Vec<Node> {
    (0..config.node_count)
        .map(|_| {
            let lat = rng.gen_range(-90.0..90.0);
            let lon = rng.gen_range(-180.0..180.0);
            Node {
                position: lat_lon_to_cartesian(lat, lon, config.node_radius),
                pulse_speed: sample(rng, config.pulse_speed_min, config.pulse_speed_max),
                pulse_offset: rng.gen_range(0.0..TAU),
            }
        })
        .collect()
}

/// Join random node pairs with `config.arc_count` arcs.
///
/// Duplicate pairs are allowed; self-loops are not. Fails when arcs are
/// requested but fewer than two nodes exist.
pub fn build_arcs<R: Rng + ?Sized>(nodes: &[Node], config: &GlobeConfig, rng: &mut R) -> Result<Vec<Arc>, GlobeError> {
    if config.arc_count == 0 {
        return Ok(Vec::new());
    }
    if nodes.len() < 2 {
        return Err(GlobeError::TooFewNodes {
            nodes: nodes.len(),
            arcs: config.arc_count,
        });
    }

    (0..config.arc_count)
        .map(|_| {
            let start = rng.gen_range(0..nodes.len());
            let mut end = rng.gen_range(0..nodes.len());
            while end == start {
                end = rng.gen_range(0..nodes.len());
            }
            let elevation = sample(rng, config.elevation_min, config.elevation_max);
            Arc::between(nodes, start, end, elevation)
        })
        .collect()
}

/// Opacity of arc `index` at `elapsed`, in [0.3, 0.6].
pub fn arc_opacity(elapsed: f32, index: usize) -> f32 {
    let pulse = (elapsed * FLOW_SPEED + index as f32 * ARC_PHASE_STEP).sin();
    lerp(ARC_OPACITY_MIN, ARC_OPACITY_MAX, (pulse + 1.0) / 2.0)
}

/// Normalized marker progress of arc `index` at `elapsed`, in [0, 1).
pub fn marker_progress(elapsed: f32, index: usize) -> f32 {
    (elapsed * FLOW_SPEED + index as f32 * ARC_PHASE_STEP).rem_euclid(1.0)
}

/// Clamp the clock input to a finite, non-negative value.
fn sanitize_elapsed(elapsed: f32) -> f32 {
    if elapsed.is_finite() && elapsed > 0.0 {
        elapsed
    } else {
        0.0
    }
}

/// Animated outputs for a single frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDelta {
    pub elapsed: f32,
    /// Globe spin around +Y, in [0, 2π)
    pub rotation: f32,
    pub arc_opacity: Vec<f32>,
    /// One traveling marker per arc
    pub markers: Vec<Vec3>,
    pub node_pulse: Vec<f32>,
}

/// The generated globe, immutable for its lifetime
#[derive(Debug, Clone)]
pub struct Globe {
    config: GlobeConfig,
    nodes: Vec<Node>,
    arcs: Vec<Arc>,
}

impl Globe {
    /// Validate `config` and draw all nodes and arcs from `rng`.
    pub fn generate<R: Rng + ?Sized>(config: GlobeConfig, rng: &mut R) -> Result<Self, GlobeError> {
        config.validate()?;
        let nodes = scatter_nodes(&config, rng);
        let arcs = build_arcs(&nodes, &config, rng)?;
        debug!("generated globe with {} nodes and {} arcs", nodes.len(), arcs.len());
        Ok(Self { config, nodes, arcs })
    }

    /// Assemble a globe from prebuilt parts, checking every arc's indices.
    pub fn from_parts(config: GlobeConfig, nodes: Vec<Node>, arcs: Vec<Arc>) -> Result<Self, GlobeError> {
        for arc in &arcs {
            for index in [arc.start, arc.end] {
                if index >= nodes.len() {
                    return Err(GlobeError::NodeIndex { index, nodes: nodes.len() });
                }
            }
            if arc.start == arc.end {
                return Err(GlobeError::SelfLoop { index: arc.start });
            }
        }
        Ok(Self { config, nodes, arcs })
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn rotation(&self, elapsed: f32) -> f32 {
        let angle = (sanitize_elapsed(elapsed) * self.config.rotation_speed).rem_euclid(TAU);
        // rem_euclid may round up to the divisor
        if angle >= TAU { 0.0 } else { angle }
    }

    /// Recompute every animated output from `elapsed` seconds.
    pub fn update(&self, elapsed: f32) -> SceneDelta {
        let elapsed = sanitize_elapsed(elapsed);
        SceneDelta {
            elapsed,
            rotation: self.rotation(elapsed),
            arc_opacity: (0..self.arcs.len()).map(|i| arc_opacity(elapsed, i)).collect(),
            markers: self
                .arcs
                .iter()
                .enumerate()
                .map(|(i, arc)| arc.point_at(marker_progress(elapsed, i)))
                .collect(),
            node_pulse: self.nodes.iter().map(|n| n.pulse(elapsed)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: f32, y: f32, z: f32) -> Node {
        Node {
            position: Vec3::new(x, y, z),
            pulse_speed: 0.2,
            pulse_offset: 0.0,
        }
    }

    #[test]
    fn between_rejects_self_loop() {
        let nodes = vec![node(1.0, 0.0, 0.0), node(0.0, 1.0, 0.0)];
        assert_eq!(Arc::between(&nodes, 1, 1, 1.3), Err(GlobeError::SelfLoop { index: 1 }));
    }

    #[test]
    fn between_rejects_missing_node() {
        let nodes = vec![node(1.0, 0.0, 0.0)];
        assert_eq!(
            Arc::between(&nodes, 0, 3, 1.3),
            Err(GlobeError::NodeIndex { index: 3, nodes: 1 })
        );
    }

    #[test]
    fn antipodal_arc_keeps_elevation() {
        let nodes = vec![node(1.005, 0.0, 0.0), node(-1.005, 0.0, 0.0)];
        let arc = Arc::between(&nodes, 0, 1, 1.4).unwrap();
        assert!((arc.control.length() - 1.4).abs() < 1e-5);
        assert!(arc.path.iter().all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite()));
    }

    #[test]
    fn control_point_is_lifted_midpoint_direction() {
        let nodes = vec![node(1.0, 0.0, 0.0), node(0.0, 1.0, 0.0)];
        let arc = Arc::between(&nodes, 0, 1, 1.2).unwrap();
        let expected = Vec3::new(1.0, 1.0, 0.0).try_normalized().unwrap() * 1.2;
        assert!(arc.control.distance(expected) < 1e-5);
    }

    #[test]
    fn point_at_end_stays_on_last_segment() {
        let nodes = vec![node(1.0, 0.0, 0.0), node(0.0, 0.0, 1.0)];
        let arc = Arc::between(&nodes, 0, 1, 1.3).unwrap();
        let almost = arc.point_at(1.0 - f32::EPSILON);
        assert!(almost.distance(arc.path[PATH_SAMPLES - 1]) < 1e-3);
        // Out-of-range progress clamps instead of indexing past the path
        assert!(arc.point_at(1.5).distance(arc.path[PATH_SAMPLES - 1]) < 1e-5);
        assert!(arc.point_at(-0.5).distance(arc.path[0]) < 1e-5);
    }

    #[test]
    fn progress_wraps_every_two_seconds() {
        assert!((marker_progress(0.0, 0)).abs() < 1e-6);
        assert!((marker_progress(1.0, 0) - 0.5).abs() < 1e-6);
        assert!((marker_progress(2.0, 0)).abs() < 1e-6);
        assert!((marker_progress(0.0, 3) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn opacity_extremes() {
        // sin(π/2) = 1 at elapsed = π for arc 0
        assert!((arc_opacity(std::f32::consts::PI, 0) - ARC_OPACITY_MAX).abs() < 1e-5);
        assert!((arc_opacity(3.0 * std::f32::consts::PI, 0) - ARC_OPACITY_MIN).abs() < 1e-5);
    }

    #[test]
    fn bad_elapsed_is_treated_as_zero() {
        assert_eq!(sanitize_elapsed(f32::NAN), 0.0);
        assert_eq!(sanitize_elapsed(-3.0), 0.0);
        assert_eq!(sanitize_elapsed(f32::INFINITY), 0.0);
        assert_eq!(sanitize_elapsed(1.5), 1.5);
    }

    #[test]
    fn from_parts_checks_indices() {
        let nodes = vec![node(1.0, 0.0, 0.0), node(0.0, 1.0, 0.0)];
        let arc = Arc::between(&nodes, 0, 1, 1.3).unwrap();
        let short = vec![nodes[0].clone()];
        assert_eq!(
            Globe::from_parts(GlobeConfig::default(), short, vec![arc]).unwrap_err(),
            GlobeError::NodeIndex { index: 1, nodes: 1 }
        );
    }
}
