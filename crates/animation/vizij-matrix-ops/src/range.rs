//! Numeric ranges and angle normalization.
//!
//! Rotations are kept inside the canonical `(-pi, pi]` window. Blending two
//! raw angles that sit on opposite sides of the wrap point would otherwise
//! travel the long way around the circle.

use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// Closed interval `[start, end]`. A range with `start > end` is treated as
/// unrestricted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub start: f32,
    pub end: f32,
}

impl Range {
    /// Canonical angle window. The lower bound is exclusive, see
    /// [`contains_angle`].
    pub const ANGLE: Range = Range {
        start: -PI,
        end: PI,
    };

    /// No restriction on the value.
    pub const UNRESTRICTED: Range = Range {
        start: f32::INFINITY,
        end: f32::NEG_INFINITY,
    };

    #[inline]
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// True when the range actually restricts values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        !self.is_valid() || (self.start <= value && value <= self.end)
    }

    #[inline]
    pub fn length(&self) -> f32 {
        if self.is_valid() {
            self.end - self.start
        } else {
            f32::INFINITY
        }
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if self.is_valid() {
            value.clamp(self.start, self.end)
        } else {
            value
        }
    }
}

/// True when `angle` lies in `(-pi, pi]`.
#[inline]
pub fn contains_angle(angle: f32) -> bool {
    -PI < angle && angle <= PI
}

/// Wrap `angle` into `(-pi, pi]`.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    if contains_angle(angle) {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
