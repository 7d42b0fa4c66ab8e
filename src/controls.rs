//! Interactive state for the terminal globe

use crate::scene::{Palette, Rgb};
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::style::Color;
use std::f32::consts::FRAC_PI_2;

const TILT_STEP: f32 = 0.05;
const ZOOM_STEP: f32 = 1.2;
const ZOOM_MIN: f32 = 0.3;
const ZOOM_MAX: f32 = 3.0;

/// Time scale per digit key, `0` being the slowest
const TIME_SCALES: [f32; 10] = [0.1, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 5.0, 8.0];

/// The digit row with Shift held; a symbol's position is the scheme it picks
const SHIFTED_DIGITS: &str = ")!@#$%^&*(";

/// Terminal schemes 1-9, each a ramp from rim to brightest arc
const RAMPS: [[Color; 4]; 9] = [
    [Color::DarkBlue, Color::Blue, Color::DarkMagenta, Color::Magenta],          // dusk
    [Color::DarkBlue, Color::DarkCyan, Color::Cyan, Color::White],               // ice
    [Color::DarkRed, Color::Red, Color::DarkYellow, Color::Yellow],              // ember
    [Color::DarkGreen, Color::Green, Color::DarkYellow, Color::White],           // forest
    [Color::DarkGrey, Color::Grey, Color::White, Color::White],                  // mono
    [Color::AnsiValue(94), Color::AnsiValue(136), Color::AnsiValue(178), Color::AnsiValue(220)], // amber
    [Color::DarkMagenta, Color::Magenta, Color::Red, Color::White],              // rose
    [Color::AnsiValue(23), Color::AnsiValue(30), Color::AnsiValue(37), Color::AnsiValue(51)],    // sea
    [Color::DarkBlue, Color::Blue, Color::Magenta, Color::White],                // neon
];

/// What the frame loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
    Regenerate,
}

/// Drawing layers, ordered so that later layers win when dots overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Layer {
    Glow = 1,
    Grid = 2,
    ArcDim = 3,
    ArcBright = 4,
    Node = 5,
    Marker = 6,
}

impl Layer {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Layer::Glow),
            2 => Some(Layer::Grid),
            3 => Some(Layer::ArcDim),
            4 => Some(Layer::ArcBright),
            5 => Some(Layer::Node),
            6 => Some(Layer::Marker),
            _ => None,
        }
    }
}

/// Runtime state for interactive controls
pub struct Controls {
    pub time_scale: f32,   // Multiplier on wall-clock time
    pub color_scheme: u8,  // 0 = scene palette, 1-9 = terminal schemes
    pub paused: bool,
    pub show_help: bool,
    pub tilt: f32,         // Radians, clamped to ±π/2
    pub zoom: f32,
}

impl Controls {
    pub fn new(time_scale: f32, color_scheme: u8, tilt_degrees: f32) -> Self {
        Self {
            time_scale,
            color_scheme: color_scheme.min(9),
            paused: false,
            show_help: false,
            tilt: tilt_degrees.to_radians().clamp(-FRAC_PI_2, FRAC_PI_2),
            zoom: 1.0,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> KeyAction {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('r') => return KeyAction::Regenerate,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Up | KeyCode::Char('k') => {
                self.tilt = (self.tilt + TILT_STEP).min(FRAC_PI_2);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.tilt = (self.tilt - TILT_STEP).max(-FRAC_PI_2);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.zoom = (self.zoom * ZOOM_STEP).min(ZOOM_MAX);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.zoom = (self.zoom / ZOOM_STEP).max(ZOOM_MIN);
            }
            KeyCode::Char('z') => self.zoom = 1.0,
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(digit) = c.to_digit(10) {
                    self.time_scale = TIME_SCALES[digit as usize];
                }
            }
            // Shift+digit
            KeyCode::Char(c) => {
                if let Some(scheme) = SHIFTED_DIGITS.find(c) {
                    self.color_scheme = scheme as u8;
                }
            }
            _ => {}
        }
        KeyAction::Continue
    }
}

fn rgb(color: Rgb) -> Color {
    Color::Rgb { r: color.r, g: color.g, b: color.b }
}

fn scaled(color: Rgb, factor: f32) -> Color {
    let f = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
    Color::Rgb { r: f(color.r), g: f(color.g), b: f(color.b) }
}

/// Color for a drawing layer under the given scheme
pub fn layer_color(scheme: u8, palette: &Palette, layer: Layer) -> (Color, bool) {
    if scheme == 0 {
        return match layer {
            Layer::Glow => (rgb(palette.highlight), false),
            Layer::Grid => (rgb(palette.glow), false),
            Layer::ArcDim => (scaled(palette.connections, 0.6), false),
            Layer::ArcBright => (rgb(palette.connections), false),
            Layer::Node => (rgb(palette.points), true),
            Layer::Marker => (Color::White, true),
        };
    }
    let ramp = &RAMPS[usize::from(scheme.min(9)) - 1];
    match layer {
        Layer::Glow => (ramp[0], false),
        Layer::Grid => (ramp[1], false),
        Layer::ArcDim => (ramp[2], false),
        Layer::ArcBright => (ramp[3], false),
        Layer::Node => (ramp[3], true),
        Layer::Marker => (Color::White, true),
    }
}
