use crate::error::GlobeError;
use serde::{Deserialize, Serialize};

/// Tuning constants for globe generation and animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub node_count: usize,
    pub arc_count: usize,
    pub node_radius: f32,
    pub elevation_min: f32,
    pub elevation_max: f32,
    pub pulse_speed_min: f32,
    pub pulse_speed_max: f32,
    /// Globe spin in radians per second of elapsed time
    pub rotation_speed: f32,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            node_count: 30,
            arc_count: 40,
            node_radius: 1.005,
            elevation_min: 1.2,
            elevation_max: 1.5,
            pulse_speed_min: 0.1,
            pulse_speed_max: 0.4,
            rotation_speed: 0.06,  // 0.001 rad/frame at 60 fps
        }
    }
}

impl GlobeConfig {
    /// Check every sampled range before any random draw happens.
    pub fn validate(&self) -> Result<(), GlobeError> {
        check_range("elevation", self.elevation_min, self.elevation_max)?;
        check_range("pulse_speed", self.pulse_speed_min, self.pulse_speed_max)?;
        if !self.node_radius.is_finite() || self.node_radius <= 0.0 {
            return Err(GlobeError::InvalidRange {
                name: "node_radius",
                min: 0.0,
                max: self.node_radius,
            });
        }
        if !self.rotation_speed.is_finite() {
            return Err(GlobeError::InvalidRange {
                name: "rotation_speed",
                min: self.rotation_speed,
                max: self.rotation_speed,
            });
        }
        if self.arc_count > 0 && self.node_count < 2 {
            return Err(GlobeError::TooFewNodes {
                nodes: self.node_count,
                arcs: self.arc_count,
            });
        }
        Ok(())
    }
}

fn check_range(name: &'static str, min: f32, max: f32) -> Result<(), GlobeError> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(GlobeError::InvalidRange { name, min, max })
    }
}

/// Longest accepted frame interval, in seconds
pub const MAX_TIME_STEP: f32 = 10.0;

/// Terminal presentation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Viewer tilt in degrees (positive looks down on the north pole)
    pub tilt: f32,
    /// Color scheme (0-9)
    pub color_scheme: u8,
    /// Seconds per frame
    pub time_step: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tilt: 20.0,
            color_scheme: 0,
            time_step: 0.033,
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<(), GlobeError> {
        if !(0.0..=MAX_TIME_STEP).contains(&self.time_step) {
            return Err(GlobeError::OutOfBounds {
                name: "time_step",
                value: self.time_step,
                min: 0.0,
                max: MAX_TIME_STEP,
            });
        }
        if !self.tilt.is_finite() {
            return Err(GlobeError::OutOfBounds {
                name: "tilt",
                value: self.tilt,
                min: -90.0,
                max: 90.0,
            });
        }
        Ok(())
    }
}

/// Everything the interactive loop needs to start
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub globe: GlobeConfig,
    pub display: DisplayConfig,
    pub seed: Option<u64>,
    /// Initial time scale applied to elapsed time
    pub speed: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GlobeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_elevation_is_rejected() {
        let config = GlobeConfig {
            elevation_min: 1.5,
            elevation_max: 1.2,
            ..GlobeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GlobeError::InvalidRange { name: "elevation", .. })
        ));
    }

    #[test]
    fn single_node_with_arcs_is_rejected() {
        let config = GlobeConfig {
            node_count: 1,
            ..GlobeConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(GlobeError::TooFewNodes { nodes: 1, arcs: 40 })
        );
    }

    #[test]
    fn display_defaults_are_valid() {
        assert_eq!(DisplayConfig::default().validate(), Ok(()));
    }

    #[test]
    fn unusable_time_step_is_rejected() {
        for time_step in [f32::INFINITY, f32::NAN, -0.5, 1e30] {
            let display = DisplayConfig {
                time_step,
                ..DisplayConfig::default()
            };
            assert!(
                matches!(display.validate(), Err(GlobeError::OutOfBounds { name: "time_step", .. })),
                "time_step {} accepted",
                time_step
            );
        }
    }

    #[test]
    fn empty_globe_is_allowed() {
        let config = GlobeConfig {
            node_count: 0,
            arc_count: 0,
            ..GlobeConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
