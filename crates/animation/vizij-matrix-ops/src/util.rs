//! Small helpers on top of motion handles.

use serde::{Deserialize, Serialize};

use crate::motion::{MotionHandle, Target1f};

/// Direction to boost a settled value in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TwitchDirection {
    None,
    Positive,
    Negative,
}

/// Thresholds for "at the target and stopped".
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settled1f {
    /// Largest distance to the target still considered arrived.
    pub max_difference: f32,
    /// Largest speed still considered stopped.
    pub max_velocity: f32,
}

impl Settled1f {
    pub fn new(max_difference: f32, max_velocity: f32) -> Self {
        Self {
            max_difference,
            max_velocity,
        }
    }

    #[inline]
    pub fn settled(&self, difference: f32, velocity: f32) -> bool {
        difference.abs() <= self.max_difference && velocity.abs() <= self.max_velocity
    }

    pub fn settled_handle<M: MotionHandle>(&self, handle: &M) -> bool {
        self.settled(handle.difference(), handle.velocity())
    }
}

/// Give a settled handle a velocity kick in `direction`. Useful to show that
/// input registered even when the value cannot change; a spring-like handle
/// then settles back.
pub fn twitch<M: MotionHandle>(
    direction: TwitchDirection,
    velocity: f32,
    settled: &Settled1f,
    handle: &mut M,
) {
    let velocity = match direction {
        TwitchDirection::None => return,
        TwitchDirection::Positive => velocity,
        TwitchDirection::Negative => -velocity,
    };
    if settled.settled_handle(handle) {
        handle.set_target(&Target1f::current_with_velocity(handle.value(), velocity));
    }
}
