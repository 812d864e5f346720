//! Short-lived descriptions of how one operation should behave.
//!
//! Descriptors borrow their motion config, targets and splines from the
//! animation asset that produced them. The lifetime `'a` ties a descriptor
//! (and any sequence holding it) to that asset.

use crate::error::MatrixOpError;
use crate::ids::OpId;
use crate::kind::OperationKind;
use crate::motion::{MotionInit, Spline, SplinePlayback, Target1f};
use crate::range::contains_angle;

/// Value setup carried by a descriptor. Every variant except `Constant`
/// names the motion config used to build a driving handle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OpSetup<'a> {
    /// Driven, but no initial value: the handle keeps the engine default.
    Undriven { motion: &'a MotionInit },
    /// Never changes over time.
    Constant(f32),
    /// Driven, starting from `initial`.
    Seeded { motion: &'a MotionInit, initial: f32 },
    /// Driven, seeking `target`.
    EasedTarget {
        motion: &'a MotionInit,
        target: &'a Target1f,
    },
    /// Driven, following `spline`.
    SplineDriven {
        motion: &'a MotionInit,
        spline: &'a Spline,
        playback: SplinePlayback,
    },
}

impl<'a> OpSetup<'a> {
    /// Motion config, if this setup needs a driving handle.
    #[inline]
    pub fn motion(&self) -> Option<&'a MotionInit> {
        match *self {
            OpSetup::Constant(_) => None,
            OpSetup::Undriven { motion }
            | OpSetup::Seeded { motion, .. }
            | OpSetup::EasedTarget { motion, .. }
            | OpSetup::SplineDriven { motion, .. } => Some(motion),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OpSetup::Undriven { .. } => "undriven",
            OpSetup::Constant(_) => "constant",
            OpSetup::Seeded { .. } => "seeded",
            OpSetup::EasedTarget { .. } => "eased-target",
            OpSetup::SplineDriven { .. } => "spline",
        }
    }
}

/// How operation `id` of kind `kind` should be initialized or changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OperationDescriptor<'a> {
    id: OpId,
    kind: OperationKind,
    setup: OpSetup<'a>,
}

impl<'a> OperationDescriptor<'a> {
    /// Driven operation whose value is left at the handle's default.
    pub fn undriven(id: OpId, kind: OperationKind, motion: &'a MotionInit) -> Self {
        Self {
            id,
            kind,
            setup: OpSetup::Undriven { motion },
        }
    }

    /// Constant operation. Rotations must already be in `(-pi, pi]`.
    pub fn constant(id: OpId, kind: OperationKind, value: f32) -> Result<Self, MatrixOpError> {
        check_constant(kind, value)?;
        Ok(Self {
            id,
            kind,
            setup: OpSetup::Constant(value),
        })
    }

    /// Driven operation that starts at `initial`.
    pub fn seeded(id: OpId, kind: OperationKind, motion: &'a MotionInit, initial: f32) -> Self {
        Self {
            id,
            kind,
            setup: OpSetup::Seeded { motion, initial },
        }
    }

    /// Driven operation that seeks `target`.
    pub fn eased_target(
        id: OpId,
        kind: OperationKind,
        motion: &'a MotionInit,
        target: &'a Target1f,
    ) -> Self {
        Self {
            id,
            kind,
            setup: OpSetup::EasedTarget { motion, target },
        }
    }

    /// Driven operation that follows `spline`.
    pub fn spline_driven(
        id: OpId,
        kind: OperationKind,
        motion: &'a MotionInit,
        spline: &'a Spline,
        playback: SplinePlayback,
    ) -> Self {
        Self {
            id,
            kind,
            setup: OpSetup::SplineDriven {
                motion,
                spline,
                playback,
            },
        }
    }

    #[inline]
    pub fn id(&self) -> OpId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    #[inline]
    pub fn setup(&self) -> &OpSetup<'a> {
        &self.setup
    }

    /// End x of the driving spline, for spline-driven descriptors.
    pub fn spline_end_x(&self) -> Option<f32> {
        match self.setup {
            OpSetup::SplineDriven { spline, .. } => Some(spline.end_x()),
            _ => None,
        }
    }
}

/// Rotation constants must be pre-normalized.
pub(crate) fn check_constant(kind: OperationKind, value: f32) -> Result<(), MatrixOpError> {
    if kind.is_rotate() && !contains_angle(value) {
        return Err(MatrixOpError::AngleOutOfRange { kind, value });
    }
    Ok(())
}
