//! Boundary to the scalar motion engine.
//!
//! A [`MotionHandle`] drives one scalar over time, either by seeking a
//! [`Target1f`] or by following a [`Spline`]. Runtime operations are generic
//! over the handle type so the value read on the hot path is a direct call.
//!
//! [`engine`] holds a small single-threaded reference implementation.

pub mod engine;
pub mod spline;
pub mod target;

use serde::{Deserialize, Serialize};

use crate::kind::OperationKind;
use crate::range::Range;

pub use engine::{MotionEngine, ScalarMotor};
pub use spline::{Spline, SplineNode};
pub use target::{Target1f, TargetNode};

/// Integer engine time, in ticks.
pub type MotionTime = i32;

/// Configuration a motion handle is built from. Copied at construction, so
/// the caller's instance only has to live for that call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionInit {
    /// Values are clamped into this range unless `modular` is set.
    pub range: Range,
    /// Values wrap around `range` (angles) instead of clamping.
    pub modular: bool,
}

impl MotionInit {
    pub const fn new(range: Range, modular: bool) -> Self {
        Self { range, modular }
    }

    /// Rotations wrap in the angle window; everything else is unrestricted.
    pub fn for_kind(kind: OperationKind) -> Self {
        Self {
            range: kind.valid_range(),
            modular: kind.is_rotate(),
        }
    }
}

impl Default for MotionInit {
    fn default() -> Self {
        Self::new(Range::UNRESTRICTED, false)
    }
}

/// How a new spline is entered.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplinePlayback {
    /// Spline x at which playback starts.
    pub start_x: f32,
    /// Duration over which the current value blends into the spline. Also
    /// used as the blend time when a constant is blended into a driven value.
    pub blend_x: f32,
    /// Multiplier on elapsed time.
    pub playback_rate: f32,
}

impl SplinePlayback {
    pub fn new(start_x: f32, blend_x: f32, playback_rate: f32) -> Self {
        Self {
            start_x,
            blend_x,
            playback_rate,
        }
    }

    pub fn with_blend(blend_x: f32) -> Self {
        Self {
            blend_x,
            ..Self::default()
        }
    }

    /// Blend duration rounded down to engine ticks.
    #[inline]
    pub fn blend_time(&self) -> MotionTime {
        self.blend_x as MotionTime
    }
}

impl Default for SplinePlayback {
    fn default() -> Self {
        Self {
            start_x: 0.0,
            blend_x: 0.0,
            playback_rate: 1.0,
        }
    }
}

/// Per-scalar motion handle owned by exactly one runtime operation.
///
/// Releasing engine resources happens in `Drop`.
pub trait MotionHandle {
    /// Context handles are built against; outlives every handle.
    type Engine;

    fn new(init: &MotionInit, engine: &Self::Engine) -> Self
    where
        Self: Sized;

    /// Seek `target`, superseding whatever the handle was doing.
    fn set_target(&mut self, target: &Target1f);

    /// Follow `spline`, entering it as described by `playback`.
    fn set_spline(&mut self, spline: &Spline, playback: &SplinePlayback);

    /// Scale how fast spline playback advances. Target seeks keep their own
    /// duration. A rate of 0 or below holds the spline where it is.
    fn set_playback_rate(&mut self, rate: f32);

    fn value(&self) -> f32;

    fn velocity(&self) -> f32;

    /// Value the handle is currently heading to.
    fn target_value(&self) -> f32;

    /// Ticks until the current target or spline end is reached.
    fn time_remaining(&self) -> MotionTime;

    /// Signed distance left to travel.
    fn difference(&self) -> f32 {
        self.target_value() - self.value()
    }
}
