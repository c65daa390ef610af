//! Simulation state and core types
//!
//! Everything the per-tick update mutates lives in one owned [`SimState`];
//! there are no globals.

use glam::Vec2;

use crate::consts::*;
use crate::hsv_to_rgb;

/// The bouncing ball
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// The shrinking circular boundary the ball is confined to
#[derive(Debug, Clone, Copy)]
pub struct Boundary {
    /// Fixed center, never moves
    pub center: Vec2,
    /// Current radius; non-increasing except for the floor clamp
    pub radius: f32,
    /// Starting radius, used for the audio pitch ratio
    pub initial_radius: f32,
}

impl Boundary {
    /// Smallest radius the boundary is allowed to shrink to
    pub fn floor(&self, ball_radius: f32) -> f32 {
        ball_radius + BOUNDARY_FLOOR_MARGIN
    }

    /// Shrink progress: 1.0 at start, approaching 0 as the circle closes
    pub fn shrink_ratio(&self) -> f32 {
        self.radius / self.initial_radius
    }
}

/// One recorded ball position, kept forever
#[derive(Debug, Clone, Copy)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub color: [f32; 3],
}

/// Complete simulation state, advanced by [`tick`](super::tick)
#[derive(Debug, Clone)]
pub struct SimState {
    pub ball: Ball,
    pub boundary: Boundary,
    /// Every position the ball has occupied, one per tick. Never evicted;
    /// only filtered at render time. Unbounded growth is a documented
    /// property of this toy, not an oversight.
    pub trail: Vec<TrailPoint>,
    /// World-space offset subtracted from everything at render time
    pub camera: Vec2,
    /// Rainbow hue in degrees, advances each tick
    pub hue: f32,
    pub bounces: u64,
    pub ticks: u64,
}

impl SimState {
    /// Fresh state from the fixed start constants. Nothing survives a
    /// restart; there is no persistence to load from.
    pub fn new() -> Self {
        let center = Vec2::new(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0);
        Self {
            ball: Ball {
                pos: center + Vec2::new(0.0, BALL_START_DY),
                vel: Vec2::new(BALL_START_VX, 0.0),
                radius: BALL_RADIUS,
            },
            boundary: Boundary {
                center,
                radius: BOUNDARY_RADIUS,
                initial_radius: BOUNDARY_RADIUS,
            },
            trail: Vec::new(),
            camera: Vec2::ZERO,
            hue: 0.0,
            bounces: 0,
            ticks: 0,
        }
    }

    /// Current ball color from the hue cycle
    pub fn ball_color(&self) -> [f32; 3] {
        hsv_to_rgb(self.hue, 1.0, 1.0)
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_matches_start_constants() {
        let state = SimState::new();
        assert_eq!(state.boundary.radius, BOUNDARY_RADIUS);
        assert_eq!(state.ball.radius, BALL_RADIUS);
        assert_eq!(state.ball.vel, Vec2::new(BALL_START_VX, 0.0));
        assert_eq!(
            state.ball.pos,
            state.boundary.center + Vec2::new(0.0, BALL_START_DY)
        );
        assert!(state.trail.is_empty());
        assert_eq!(state.bounces, 0);
    }

    #[test]
    fn boundary_floor_tracks_ball_radius() {
        let state = SimState::new();
        assert_eq!(state.boundary.floor(state.ball.radius), 25.0);
    }
}
