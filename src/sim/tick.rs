//! Fixed timestep simulation tick
//!
//! One call advances the world by one 90 Hz step. Purely numeric: the only
//! edge case is a zero-length contact normal, handled in
//! [`outward_normal`](super::collision::outward_normal).

use glam::Vec2;

use super::collision::{hits_boundary, outward_normal, reflect};
use super::state::{SimState, TrailPoint};
use crate::consts::*;

/// Emitted when the ball hits the boundary, so the caller can key a sound
/// off the shrink progress without the sim knowing about audio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    /// `radius / initial_radius` after this bounce's shrink
    pub shrink_ratio: f32,
    /// Total bounces so far, this one included
    pub count: u64,
}

/// Advance the simulation by one tick. Returns the bounce event if the ball
/// hit the boundary during this step.
pub fn tick(state: &mut SimState) -> Option<Bounce> {
    state.ticks += 1;

    // Gravity, then integrate
    state.ball.vel.y += GRAVITY;
    state.ball.pos += state.ball.vel;

    // Camera follows the ball until the boundary is small enough that it
    // should stay centered on screen instead
    let half = Vec2::new(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0);
    state.camera = if state.boundary.radius < CAMERA_SNAP_RADIUS {
        state.boundary.center - half
    } else {
        state.ball.pos - half
    };

    // Rainbow cycle, then record this position forever
    state.hue = (state.hue + HUE_STEP).rem_euclid(360.0);
    state.trail.push(TrailPoint {
        pos: state.ball.pos,
        color: state.ball_color(),
    });

    let boundary = state.boundary;
    if !hits_boundary(
        state.ball.pos,
        state.ball.radius,
        boundary.center,
        boundary.radius,
    ) {
        return None;
    }

    let n = outward_normal(boundary.center, state.ball.pos);

    // Pin the ball to the inside of the boundary, reflect, and pump a
    // little extra energy in
    state.ball.pos = boundary.center + n * (boundary.radius - state.ball.radius);
    state.ball.vel = reflect(state.ball.vel, n) * BOUNCE_DAMPING;

    state.boundary.radius *= SHRINK_FACTOR;
    state.bounces += 1;

    let bounce = Bounce {
        shrink_ratio: state.boundary.shrink_ratio(),
        count: state.bounces,
    };

    // Never let the container shrink past the ball
    let floor = state.boundary.floor(state.ball.radius);
    if state.boundary.radius < floor {
        state.boundary.radius = floor;
    }

    Some(bounce)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A state with the ball drifting well inside the boundary
    fn free_flight_state() -> SimState {
        let mut state = SimState::new();
        state.ball.pos = state.boundary.center;
        state.ball.vel = Vec2::new(2.0, -1.0);
        state
    }

    /// A state one tick away from hitting the bottom of the boundary
    fn imminent_collision_state() -> SimState {
        let mut state = SimState::new();
        state.ball.pos = state.boundary.center + Vec2::new(0.0, 329.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        state
    }

    #[test]
    fn free_flight_only_applies_gravity() {
        let mut state = free_flight_state();
        let before = state.clone();

        let bounce = tick(&mut state);

        assert!(bounce.is_none());
        assert_eq!(state.boundary.radius, before.boundary.radius);
        assert_eq!(state.bounces, before.bounces);
        assert_eq!(state.ball.vel.x, before.ball.vel.x);
        assert!((state.ball.vel.y - (before.ball.vel.y + GRAVITY)).abs() < 1e-6);
    }

    #[test]
    fn trail_grows_by_exactly_one_per_tick() {
        let mut state = SimState::new();
        for n in 1..=500 {
            tick(&mut state);
            assert_eq!(state.trail.len(), n);
        }
    }

    #[test]
    fn collision_pins_ball_to_boundary_interior() {
        let mut state = imminent_collision_state();

        let bounce = tick(&mut state);

        assert!(bounce.is_some());
        let dist = (state.ball.pos - state.boundary.center).length();
        let expected = state.boundary.radius / SHRINK_FACTOR - state.ball.radius;
        // Position was clamped against the pre-shrink radius
        assert!((dist - expected).abs() < 1e-3);
    }

    #[test]
    fn first_collision_shrinks_350_to_348_25() {
        let mut state = imminent_collision_state();
        tick(&mut state);
        assert!((state.boundary.radius - 348.25).abs() < 1e-3);
        assert_eq!(state.bounces, 1);
    }

    #[test]
    fn collision_reflects_and_injects_energy() {
        let mut state = imminent_collision_state();
        let speed_at_impact = {
            // Velocity at the collision tick includes that tick's gravity
            let v = state.ball.vel + Vec2::new(0.0, GRAVITY);
            v.length()
        };

        tick(&mut state);

        // Downward motion turned upward, scaled by the damping factor
        assert!(state.ball.vel.y < 0.0);
        assert!((state.ball.vel.length() - speed_at_impact * BOUNCE_DAMPING).abs() < 1e-4);
    }

    #[test]
    fn reflection_without_damping_preserves_speed() {
        // The elastic identity |v'| == |v|, checked through the raw helper
        let v = Vec2::new(3.7, -2.1);
        let n = outward_normal(Vec2::ZERO, Vec2::new(5.0, 8.0));
        assert!((reflect(v, n).length() - v.length()).abs() < 1e-5);
    }

    #[test]
    fn zero_distance_collision_uses_fixed_normal() {
        let mut state = SimState::new();
        // Shrink the boundary to the ball's own size so dead center counts
        // as contact, and aim the ball to land exactly on the center this
        // tick (the -GRAVITY offset cancels the gravity the tick applies)
        state.boundary.radius = state.ball.radius;
        state.ball.vel = Vec2::new(5.0, -GRAVITY);
        state.ball.pos = state.boundary.center - Vec2::new(5.0, 0.0);

        let bounce = tick(&mut state);

        assert!(bounce.is_some());
        // d == 0: the normal defaulted to +X, so the x velocity flipped
        assert!((state.ball.vel.x - (-5.0 * BOUNCE_DAMPING)).abs() < 1e-5);
        assert!(state.ball.vel.y.abs() < 1e-6);
        assert!(state.ball.pos.x.is_finite() && state.ball.pos.y.is_finite());
        assert!((state.ball.pos - state.boundary.center).length() < 1e-6);
    }

    #[test]
    fn boundary_radius_never_drops_below_floor() {
        let mut state = SimState::new();
        let floor = state.boundary.floor(state.ball.radius);

        let mut reached_floor = false;
        for _ in 0..1_000_000 {
            tick(&mut state);
            assert!(state.boundary.radius >= floor);
            if state.boundary.radius == floor {
                reached_floor = true;
                break;
            }
        }
        assert!(reached_floor, "boundary never shrank to its floor");

        // Every later bounce holds the radius exactly at the floor
        let mut later_bounces = 0;
        for _ in 0..10_000 {
            if tick(&mut state).is_some() {
                later_bounces += 1;
                assert_eq!(state.boundary.radius, floor);
            }
        }
        assert!(later_bounces > 0);
    }

    #[test]
    fn bounce_reports_post_shrink_ratio() {
        let mut state = imminent_collision_state();
        let bounce = tick(&mut state).expect("collision expected");
        assert!((bounce.shrink_ratio - 348.25 / 350.0).abs() < 1e-5);
        assert_eq!(bounce.count, 1);
    }

    #[test]
    fn camera_tracks_ball_then_snaps_to_center() {
        let half = Vec2::new(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0);

        let mut state = free_flight_state();
        tick(&mut state);
        assert!((state.camera - (state.ball.pos - half)).length() < 1e-6);

        let mut state = free_flight_state();
        state.boundary.radius = CAMERA_SNAP_RADIUS - 1.0;
        state.ball.pos = state.boundary.center;
        state.ball.vel = Vec2::ZERO;
        tick(&mut state);
        assert!((state.camera - (state.boundary.center - half)).length() < 1e-6);
    }
}
