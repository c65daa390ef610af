//! Deterministic simulation module
//!
//! All physics lives here. Fixed timestep only, no rendering or platform
//! dependencies; the tick reports bounce events instead of playing sounds.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{hits_boundary, outward_normal, reflect};
pub use state::{Ball, Boundary, SimState, TrailPoint};
pub use tick::{Bounce, tick};
