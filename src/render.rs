//! Braille rendering surface for the globe scene.
//!
//! Projects the scene the way the original camera saw it (eye at z = 3.5,
//! 50° vertical field of view, whole group scaled by 1.45) and rasterizes
//! it onto a [`BrailleCanvas`].

use crate::braille::BrailleCanvas;
use crate::controls::{layer_color, Layer};
use crate::geometry::Vec3;
use crate::globe::{Globe, SceneDelta, ARC_OPACITY_MAX, ARC_OPACITY_MIN};
use crate::scene::Palette;
use crate::terminal::Terminal;
use crossterm::style::Color;
use std::f32::consts::TAU;

const CAMERA_DISTANCE: f32 = 3.5;
const HALF_FOV: f32 = 25.0 * std::f32::consts::PI / 180.0;
const GROUP_SCALE: f32 = 1.45;
const GLOW_RADIUS: f32 = 1.03;
/// Slow camera orbit around the group, one turn every two minutes
const ORBIT_SPEED: f32 = TAU / 120.0;
/// Graticule spacing in degrees
const GRID_STEP: usize = 30;
/// Share of the smaller canvas half-extent the field of view maps to
const FIT: f32 = 0.9;

/// Viewer state that is not part of the scene
#[derive(Debug, Clone, Copy)]
pub struct View {
    pub tilt: f32,
    pub zoom: f32,
    pub scheme: u8,
}

/// Perspective camera looking down -Z from (0, 0, CAMERA_DISTANCE)
struct Camera {
    orbit: f32,
    tilt: f32,
    center_x: f32,
    center_y: f32,
    pixels_per_unit: f32,
}

impl Camera {
    fn new(canvas: &BrailleCanvas, view: &View, elapsed: f32) -> Self {
        let (w, h) = canvas.size();
        let half = (w.min(h) as f32) / 2.0;
        Self {
            orbit: elapsed * ORBIT_SPEED,
            tilt: view.tilt,
            center_x: w as f32 / 2.0,
            center_y: h as f32 / 2.0,
            pixels_per_unit: half * FIT * view.zoom / HALF_FOV.tan(),
        }
    }

    /// Scene point to camera-relative world space.
    fn to_world(&self, p: Vec3) -> Vec3 {
        (p * GROUP_SCALE).rotate_y(self.orbit).rotate_x(self.tilt)
    }

    /// True when the globe sphere hides `world` from the eye.
    fn occluded(&self, world: Vec3) -> bool {
        let eye = Vec3::new(0.0, 0.0, CAMERA_DISTANCE);
        let d = world - eye;
        // |eye + t d|^2 = R^2, looking for a hit strictly before the point
        let a = d.dot(d);
        let b = 2.0 * eye.dot(d);
        let c = eye.dot(eye) - GROUP_SCALE * GROUP_SCALE;
        let disc = b * b - 4.0 * a * c;
        if a <= f32::EPSILON || disc <= 0.0 {
            return false;
        }
        let t = (-b - disc.sqrt()) / (2.0 * a);
        t > 0.0 && t < 1.0 - 1e-3
    }

    /// Dot coordinates of a world-space point, or `None` behind the eye.
    fn project_world(&self, world: Vec3) -> Option<(i32, i32)> {
        let depth = CAMERA_DISTANCE - world.z;
        if depth <= 0.1 {
            return None;
        }
        let x = self.center_x + world.x / depth * self.pixels_per_unit;
        let y = self.center_y - world.y / depth * self.pixels_per_unit;
        Some((x.round() as i32, y.round() as i32))
    }

    /// Project a visible scene point.
    fn project(&self, p: Vec3) -> Option<(i32, i32)> {
        let world = self.to_world(p);
        if self.occluded(world) {
            return None;
        }
        self.project_world(world)
    }
}

/// Owns the dot canvas and draws frames into a [`Terminal`]
pub struct GlobeRenderer {
    canvas: BrailleCanvas,
    palette: Palette,
}

impl GlobeRenderer {
    pub fn new(cols: u16, rows: u16, palette: Palette) -> Self {
        Self {
            canvas: BrailleCanvas::new(cols, rows),
            palette,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.canvas.resize(cols, rows);
    }

    pub fn canvas(&self) -> &BrailleCanvas {
        &self.canvas
    }

    /// Rasterize one frame into the canvas.
    pub fn rasterize(&mut self, globe: &Globe, delta: &SceneDelta, view: &View) {
        self.canvas.clear();
        let camera = Camera::new(&self.canvas, view, delta.elapsed);

        self.draw_glow(&camera);
        self.draw_grid(&camera, delta.rotation);

        for (i, arc) in globe.arcs().iter().enumerate() {
            let opacity = delta.arc_opacity.get(i).copied().unwrap_or(ARC_OPACITY_MAX);
            let layer = if opacity >= (ARC_OPACITY_MIN + ARC_OPACITY_MAX) / 2.0 {
                Layer::ArcBright
            } else {
                Layer::ArcDim
            };
            for pair in arc.path.windows(2) {
                if let (Some((x0, y0)), Some((x1, y1))) = (camera.project(pair[0]), camera.project(pair[1])) {
                    self.canvas.line(x0, y0, x1, y1, layer as u8);
                }
            }
        }

        for (i, node) in globe.nodes().iter().enumerate() {
            let pulse = delta.node_pulse.get(i).copied().unwrap_or(0.0);
            if let Some((x, y)) = camera.project(node.position) {
                self.canvas.diamond(x, y, (pulse * 2.0).round() as i32, Layer::Node as u8);
            }
        }

        for &marker in &delta.markers {
            if let Some((x, y)) = camera.project(marker) {
                self.canvas.diamond(x, y, 1, Layer::Marker as u8);
            }
        }
    }

    /// Outline of the glow sphere as seen from the eye.
    fn draw_glow(&mut self, camera: &Camera) {
        let r = GLOW_RADIUS * GROUP_SCALE;
        // Silhouette circle: tangent cone from the eye
        let sin_a = (r / CAMERA_DISTANCE).min(1.0);
        let rim = sin_a / (1.0 - sin_a * sin_a).sqrt();
        let radius_px = rim * camera.pixels_per_unit;
        let steps = (radius_px * TAU).ceil().max(16.0) as usize;
        for i in 0..steps {
            let a = i as f32 / steps as f32 * TAU;
            let x = camera.center_x + a.cos() * radius_px;
            let y = camera.center_y + a.sin() * radius_px;
            self.canvas.plot(x.round() as i32, y.round() as i32, Layer::Glow as u8);
        }
    }

    /// Latitude/longitude graticule of the spinning unit sphere.
    fn draw_grid(&mut self, camera: &Camera, spin: f32) {
        let point = |lat: f32, lon: f32| {
            let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
            let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
            Vec3::new(cos_lat * sin_lon, sin_lat, cos_lat * cos_lon).rotate_y(spin)
        };

        for lat in (-60..=60).step_by(GRID_STEP) {
            for lon in 0..360 {
                if let Some((x, y)) = camera.project(point(lat as f32, lon as f32)) {
                    self.canvas.plot(x, y, Layer::Grid as u8);
                }
            }
        }
        for lon in (0..360).step_by(GRID_STEP) {
            for lat in -90..=90 {
                if let Some((x, y)) = camera.project(point(lat as f32, lon as f32)) {
                    self.canvas.plot(x, y, Layer::Grid as u8);
                }
            }
        }
    }

    /// Rasterize and copy the canvas into the terminal buffer.
    pub fn draw(&mut self, term: &mut Terminal, globe: &Globe, delta: &SceneDelta, view: &View) {
        self.rasterize(globe, delta, view);

        let (cols, rows) = term.size();
        term.clear();
        for cy in 0..rows as usize {
            for cx in 0..cols as usize {
                if let Some((ch, level)) = self.canvas.cell(cx, cy) {
                    if let Some(layer) = Layer::from_level(level) {
                        let (color, bold) = layer_color(view.scheme, &self.palette, layer);
                        term.set(cx as i32, cy as i32, ch, Some(color), bold);
                    }
                }
            }
        }
    }
}

/// One-line summary drawn on the bottom row.
pub fn render_status(term: &mut Terminal, globe: &Globe, elapsed: f32, time_scale: f32, paused: bool) {
    let (_, rows) = term.size();
    if rows < 3 {
        return;
    }
    let status = format!(
        " nodes {}  arcs {}  t {:.1}s  x{}{}  ? help ",
        globe.nodes().len(),
        globe.arcs().len(),
        elapsed,
        time_scale,
        if paused { "  PAUSED" } else { "" }
    );
    term.set_str(0, rows as i32 - 1, &status, Some(Color::DarkGrey), false);
}
