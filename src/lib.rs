//! Ringfall - a ball bouncing inside a shrinking circular boundary
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collision, trail)
//! - `renderer`: wgpu rendering pipeline (shapes + text)
//! - `audio`: Bounce feedback (synthesized tone or pre-sliced clip)
//! - `status`: Cross-process status snapshot (written by the sim,
//!   polled by the `ringfall-info` viewer)

pub mod audio;
pub mod renderer;
pub mod sim;
pub mod status;

pub use sim::{SimState, tick};
pub use status::StatusSnapshot;

/// Fixed configuration constants
pub mod consts {
    /// Simulation timestep (90 Hz, matching the original frame rate)
    pub const SIM_DT: f32 = 1.0 / 90.0;
    /// Maximum substeps per redraw to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Viewer poll interval (~30 Hz; stats don't need more)
    pub const INFO_POLL_MS: u64 = 33;

    /// Main window dimensions
    pub const WIDTH: u32 = 576;
    pub const HEIGHT: u32 = 1024;
    /// Info window dimensions
    pub const INFO_WIDTH: u32 = 300;
    pub const INFO_HEIGHT: u32 = 200;

    /// Per-tick downward acceleration
    pub const GRAVITY: f32 = 0.3;
    /// Post-reflection velocity scale. Above 1: every bounce injects
    /// energy. Intentional, keeps the toy lively as the circle closes in.
    pub const BOUNCE_DAMPING: f32 = 1.02;
    /// Multiplicative boundary shrink per bounce
    pub const SHRINK_FACTOR: f32 = 0.995;

    /// Boundary starting radius
    pub const BOUNDARY_RADIUS: f32 = 350.0;
    /// Margin added to the ball radius for the boundary floor
    pub const BOUNDARY_FLOOR_MARGIN: f32 = 5.0;
    /// Below this radius the camera locks onto the boundary center
    pub const CAMERA_SNAP_RADIUS: f32 = 40.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_START_VX: f32 = 4.0;
    /// Vertical start offset from the boundary center (negative = above)
    pub const BALL_START_DY: f32 = -200.0;
    /// Ball border width in pixels
    pub const BALL_BORDER: f32 = 2.0;

    /// Hue degrees advanced per tick for the rainbow cycle
    pub const HUE_STEP: f32 = 2.0;
    /// Trail discs are drawn at this fraction of the ball radius
    pub const TRAIL_SCALE: f32 = 0.7;
    /// Boundary outline width in pixels
    pub const BOUNDARY_OUTLINE: f32 = 3.0;

    /// Synthesized tone parameters
    pub const TONE_SAMPLE_RATE: u32 = 22_050;
    pub const TONE_DURATION_SECS: f32 = 0.08;
    /// Frequency map: `TONE_BASE_HZ - ratio * TONE_SPAN_HZ`, so a full-size
    /// boundary beeps near 300 Hz and a fully shrunk one near 800 Hz
    pub const TONE_BASE_HZ: f32 = 800.0;
    pub const TONE_SPAN_HZ: f32 = 500.0;
    pub const TONE_MIN_HZ: f32 = 250.0;
    pub const TONE_MAX_HZ: f32 = 1200.0;
    /// Envelope decay rate for the tone (amplitude = e^(-t * rate))
    pub const TONE_DECAY_RATE: f32 = 15.0;

    /// External clip slice length
    pub const CLIP_SEGMENT_SECS: f32 = 0.5;

    /// Label drawn above the boundary
    pub const LABEL_TEXT: &str = "ringfall";
    pub const LABEL_SIZE: f32 = 28.0;
    /// Gap between the boundary's top edge and the label box
    pub const LABEL_GAP: f32 = 30.0;
}

/// Convert HSV to RGB. `h` in degrees [0, 360), `s` and `v` in [0, 1].
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = h.rem_euclid(360.0) / 60.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i as u32 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn hsv_primaries() {
        assert!(close(hsv_to_rgb(0.0, 1.0, 1.0), [1.0, 0.0, 0.0]));
        assert!(close(hsv_to_rgb(120.0, 1.0, 1.0), [0.0, 1.0, 0.0]));
        assert!(close(hsv_to_rgb(240.0, 1.0, 1.0), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn hsv_wraps_past_360() {
        assert!(close(hsv_to_rgb(360.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0)));
        assert!(close(hsv_to_rgb(480.0, 1.0, 1.0), hsv_to_rgb(120.0, 1.0, 1.0)));
    }

    #[test]
    fn hsv_zero_saturation_is_grey() {
        assert!(close(hsv_to_rgb(200.0, 0.0, 0.5), [0.5, 0.5, 0.5]));
    }
}
