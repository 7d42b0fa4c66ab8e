//! Procedural network globe.
//!
//! Nodes are scattered on a sphere, random pairs are joined by quadratic
//! Bézier arcs, and [`Globe::update`] turns an elapsed-time value into the
//! animated half of the scene: spin, arc opacity, node pulse and one
//! traveling marker per arc.
//!
//! ```
//! use netglobe::{Globe, GlobeConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let globe = Globe::generate(GlobeConfig::default(), &mut rng).unwrap();
//! let frame = globe.update(1.25);
//! assert_eq!(frame.markers.len(), globe.arcs().len());
//! ```
//!
//! The remaining modules make up the terminal front-end.

pub mod braille;
pub mod clock;
pub mod config;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod globe;
pub mod help;
pub mod render;
pub mod scene;
pub mod settings;
pub mod terminal;

pub use config::GlobeConfig;
pub use error::GlobeError;
pub use geometry::Vec3;
pub use globe::{arc_opacity, build_arcs, marker_progress, scatter_nodes, Arc, Globe, Node, SceneDelta, PATH_SAMPLES};
pub use scene::{Palette, SceneDescription};
