//! Static scene description handed to a host renderer.
//!
//! The animated half of the scene is [`SceneDelta`](crate::globe::SceneDelta);
//! this module describes the meshes, materials and geometry that stay fixed
//! for the globe's lifetime.

use crate::geometry::Vec3;
use crate::globe::{Globe, ARC_OPACITY_MAX, PATH_SAMPLES};
use serde::Serialize;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        Some(Self::new((value >> 16) as u8, (value >> 8) as u8, value as u8))
    }
}

/// Colors shared by the whole scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Palette {
    pub base: Rgb,
    pub highlight: Rgb,
    pub glow: Rgb,
    pub connections: Rgb,
    pub points: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base: Rgb::new(0x1a, 0x2b, 0x4d),
            highlight: Rgb::new(0x2a, 0x41, 0x75),
            glow: Rgb::new(0x4d, 0x68, 0xa1),
            connections: Rgb::new(0xd0, 0x4d, 0xff),
            points: Rgb::new(0xd0, 0x4d, 0xff),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Material {
    /// Lit wireframe material
    Wireframe {
        color: Rgb,
        emissive: Rgb,
        emissive_intensity: f32,
        specular: Rgb,
        shininess: f32,
        opacity: f32,
    },
    /// Unlit flat color
    Basic { color: Rgb, opacity: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SphereMesh {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub material: Material,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub points: [Vec3; PATH_SAMPLES],
    pub color: Rgb,
    /// Opacity before the per-frame pulse is applied
    pub base_opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointMarker {
    pub position: Vec3,
    pub radius: f32,
    pub color: Rgb,
    pub opacity: f32,
}

/// Styling shared by every traveling marker. Positions come per frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelerStyle {
    pub radius: f32,
    pub color: Rgb,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDescription {
    /// Uniform scale applied to the whole group
    pub scale: f32,
    pub globe: SphereMesh,
    pub glow: SphereMesh,
    pub arcs: Vec<Polyline>,
    pub nodes: Vec<PointMarker>,
    pub travelers: TravelerStyle,
    pub traveler_count: usize,
}

impl SceneDescription {
    pub fn new(globe: &Globe, palette: &Palette) -> Self {
        Self {
            scale: 1.45,
            globe: SphereMesh {
                radius: 1.0,
                width_segments: 64,
                height_segments: 32,
                material: Material::Wireframe {
                    color: palette.base,
                    emissive: palette.highlight,
                    emissive_intensity: 0.1,
                    specular: palette.glow,
                    shininess: 5.0,
                    opacity: 0.9,
                },
            },
            glow: SphereMesh {
                radius: 1.03,
                width_segments: 32,
                height_segments: 16,
                material: Material::Basic {
                    color: palette.glow,
                    opacity: 0.05,
                },
            },
            arcs: globe
                .arcs()
                .iter()
                .map(|arc| Polyline {
                    points: arc.path,
                    color: palette.connections,
                    base_opacity: ARC_OPACITY_MAX,
                })
                .collect(),
            nodes: globe
                .nodes()
                .iter()
                .map(|node| PointMarker {
                    position: node.position,
                    radius: 0.01,
                    color: palette.points,
                    opacity: 0.8,
                })
                .collect(),
            travelers: TravelerStyle {
                radius: 0.007,
                color: palette.connections,
                opacity: 1.0,
            },
            traveler_count: globe.arcs().len(),
        }
    }
}

impl Globe {
    /// Static scene with the default palette.
    pub fn scene(&self) -> SceneDescription {
        SceneDescription::new(self, &Palette::default())
    }
}
