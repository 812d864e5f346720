//! Runtime operation: the persistent per-slot value of one matrix operation.
//!
//! An operation is either a constant scalar or owns a motion handle. Which of
//! the two is decided once, at construction, from whether the first
//! descriptor names a motion config, and never changes afterwards.
//!
//! Crossfades go through [`RuntimeOperation::blend_to_op`] when the next
//! animation still defines the operation (matched by [`OpId`]) and through
//! [`RuntimeOperation::blend_to_default`] when it does not, so the dropped
//! operation eases to its neutral value instead of freezing or popping.

use serde::{Deserialize, Serialize};

use crate::descriptor::{check_constant, OpSetup, OperationDescriptor};
use crate::error::MatrixOpError;
use crate::ids::OpId;
use crate::kind::OperationKind;
use crate::motion::{MotionHandle, MotionTime, SplinePlayback, Target1f};

/// Storage mode, fixed for an operation's lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpMode {
    ConstantValue,
    MotionDriven,
}

/// Either a raw scalar or an owned handle; the arm is the mode.
#[derive(Debug)]
enum AnimatedValue<M> {
    Constant(f32),
    Motion(M),
}

/// One operation of a matrix chain, generic over the motion handle so reads
/// are statically dispatched.
#[derive(Debug)]
pub struct RuntimeOperation<M: MotionHandle> {
    id: OpId,
    kind: OperationKind,
    value: AnimatedValue<M>,
}

impl<M: MotionHandle> RuntimeOperation<M> {
    /// Build from the first descriptor that introduces this operation.
    ///
    /// A motion handle is created against `engine` when the descriptor names
    /// a motion config. The value is then set up as [`Self::blend_to_op`]
    /// would with a zero-length blend.
    pub fn new(
        descriptor: &OperationDescriptor<'_>,
        engine: &M::Engine,
    ) -> Result<Self, MatrixOpError> {
        let value = match descriptor.setup().motion() {
            Some(init) => AnimatedValue::Motion(M::new(init, engine)),
            None => AnimatedValue::Constant(descriptor.kind().neutral_value()),
        };
        let mut op = Self {
            id: descriptor.id(),
            kind: descriptor.kind(),
            value,
        };
        op.blend_to_op(descriptor, &SplinePlayback::default())?;
        Ok(op)
    }

    /// Id used to match this operation across animations.
    #[inline]
    pub fn id(&self) -> OpId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    #[inline]
    pub fn mode(&self) -> OpMode {
        match self.value {
            AnimatedValue::Constant(_) => OpMode::ConstantValue,
            AnimatedValue::Motion(_) => OpMode::MotionDriven,
        }
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> f32 {
        match &self.value {
            AnimatedValue::Constant(v) => *v,
            AnimatedValue::Motion(handle) => handle.value(),
        }
    }

    /// True when `descriptor` describes this same logical operation. Kind is
    /// not compared.
    #[inline]
    pub fn matches(&self, descriptor: &OperationDescriptor<'_>) -> bool {
        self.id == descriptor.id()
    }

    /// True when [`Self::blend_to_op`] would accept `descriptor`'s variant.
    pub fn accepts(&self, descriptor: &OperationDescriptor<'_>) -> bool {
        match self.value {
            AnimatedValue::Motion(_) => true,
            AnimatedValue::Constant(_) => matches!(descriptor.setup(), OpSetup::Constant(_)),
        }
    }

    /// Retarget this operation to follow `descriptor`.
    ///
    /// Driven operations ease into constants over `playback.blend_x`; splines
    /// are entered with the descriptor's own playback. Constant operations
    /// only accept constants and change instantly.
    pub fn blend_to_op(
        &mut self,
        descriptor: &OperationDescriptor<'_>,
        playback: &SplinePlayback,
    ) -> Result<(), MatrixOpError> {
        match &mut self.value {
            AnimatedValue::Motion(handle) => match *descriptor.setup() {
                OpSetup::Undriven { .. } => {}
                OpSetup::Constant(value) | OpSetup::Seeded { initial: value, .. } => {
                    handle.set_target(&Target1f::new(value, 0.0, playback.blend_time()));
                }
                OpSetup::EasedTarget { target, .. } => handle.set_target(target),
                OpSetup::SplineDriven {
                    spline,
                    playback: spline_playback,
                    ..
                } => handle.set_spline(spline, &spline_playback),
            },
            AnimatedValue::Constant(slot) => match *descriptor.setup() {
                OpSetup::Constant(value) => {
                    check_constant(self.kind, value)?;
                    *slot = value;
                }
                ref other => {
                    return Err(MatrixOpError::IncompatibleDescriptor {
                        id: self.id,
                        mode: OpMode::ConstantValue,
                        setup: other.label(),
                    })
                }
            },
        }
        Ok(())
    }

    /// Ease toward the kind's neutral value over `blend_time` ticks, or snap
    /// to it when `blend_time` is 0. Constants are left alone.
    pub fn blend_to_default(&mut self, blend_time: MotionTime) {
        let AnimatedValue::Motion(handle) = &mut self.value else {
            return;
        };
        let neutral = self.kind.neutral_value();
        let target = if blend_time == 0 {
            Target1f::current(neutral)
        } else {
            Target1f::new(neutral, 0.0, blend_time)
        };
        handle.set_target(&target);
    }

    /// Scale how fast in-flight playback advances. No-op for constants.
    pub fn set_playback_rate(&mut self, rate: f32) {
        if let AnimatedValue::Motion(handle) = &mut self.value {
            handle.set_playback_rate(rate);
        }
    }

    /// Ticks until the handle reaches its target or spline end; always 0 for
    /// constants.
    pub fn time_remaining(&self) -> MotionTime {
        match &self.value {
            AnimatedValue::Constant(_) => 0,
            AnimatedValue::Motion(handle) => handle.time_remaining(),
        }
    }

    /// Overwrite a constant operation's value.
    pub fn set_constant_value(&mut self, value: f32) -> Result<(), MatrixOpError> {
        match &mut self.value {
            AnimatedValue::Constant(slot) => {
                check_constant(self.kind, value)?;
                *slot = value;
                Ok(())
            }
            AnimatedValue::Motion(_) => Err(MatrixOpError::IncompatibleDescriptor {
                id: self.id,
                mode: OpMode::MotionDriven,
                setup: "raw value",
            }),
        }
    }

    /// Send `target` straight to the motion handle.
    pub fn set_target(&mut self, target: &Target1f) -> Result<(), MatrixOpError> {
        match &mut self.value {
            AnimatedValue::Motion(handle) => {
                handle.set_target(target);
                Ok(())
            }
            AnimatedValue::Constant(_) => Err(MatrixOpError::NotMotionDriven { id: self.id }),
        }
    }

    pub fn motion_handle(&self) -> Option<&M> {
        match &self.value {
            AnimatedValue::Motion(handle) => Some(handle),
            AnimatedValue::Constant(_) => None,
        }
    }

    pub fn motion_handle_mut(&mut self) -> Option<&mut M> {
        match &mut self.value {
            AnimatedValue::Motion(handle) => Some(handle),
            AnimatedValue::Constant(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{MotionEngine, MotionInit, ScalarMotor, Spline};

    type Op = RuntimeOperation<ScalarMotor>;

    fn id(raw: u8) -> OpId {
        OpId::new(raw).unwrap()
    }

    #[test]
    fn mode_follows_first_descriptor() {
        let engine = MotionEngine::default();
        let motion = MotionInit::default();
        let constant = OperationDescriptor::constant(id(0), OperationKind::TranslateX, 5.0).unwrap();
        let driven = OperationDescriptor::undriven(id(1), OperationKind::TranslateX, &motion);

        let c = Op::new(&constant, &engine).unwrap();
        let d = Op::new(&driven, &engine).unwrap();
        assert_eq!(c.mode(), OpMode::ConstantValue);
        assert!(c.motion_handle().is_none());
        assert_eq!(d.mode(), OpMode::MotionDriven);
        assert!(d.motion_handle().is_some());
        assert_eq!(engine.live_motors(), 1);
    }

    #[test]
    fn constant_rejects_driven_descriptors() {
        let engine = MotionEngine::default();
        let motion = MotionInit::default();
        let spline = Spline::through_points(&[(0.0, 0.0), (4.0, 1.0)]).unwrap();
        let mut op = Op::new(
            &OperationDescriptor::constant(id(2), OperationKind::ScaleX, 3.0).unwrap(),
            &engine,
        )
        .unwrap();
        let spline_op = OperationDescriptor::spline_driven(
            id(2),
            OperationKind::ScaleX,
            &motion,
            &spline,
            SplinePlayback::default(),
        );
        assert!(!op.accepts(&spline_op));
        assert_eq!(
            op.blend_to_op(&spline_op, &SplinePlayback::default()),
            Err(MatrixOpError::IncompatibleDescriptor {
                id: id(2),
                mode: OpMode::ConstantValue,
                setup: "spline",
            })
        );
        assert_eq!(op.value(), 3.0);
        assert_eq!(
            op.set_target(&Target1f::current(1.0)),
            Err(MatrixOpError::NotMotionDriven { id: id(2) })
        );
    }

    #[test]
    fn constant_blend_is_instant_and_range_checked() {
        let engine = MotionEngine::default();
        let mut op = Op::new(
            &OperationDescriptor::constant(id(0), OperationKind::RotateX, 0.5).unwrap(),
            &engine,
        )
        .unwrap();
        let next = OperationDescriptor::constant(id(0), OperationKind::RotateX, -0.5).unwrap();
        op.blend_to_op(&next, &SplinePlayback::with_blend(30.0)).unwrap();
        assert_eq!(op.value(), -0.5);

        assert!(op.set_constant_value(9.0).is_err());
        assert_eq!(op.value(), -0.5);
        op.set_constant_value(1.0).unwrap();
        assert_eq!(op.value(), 1.0);
    }

    #[test]
    fn dropping_operation_releases_handle() {
        let engine = MotionEngine::default();
        let motion = MotionInit::default();
        let op = Op::new(
            &OperationDescriptor::seeded(id(0), OperationKind::ScaleY, &motion, 2.0),
            &engine,
        )
        .unwrap();
        assert_eq!(engine.live_motors(), 1);
        assert_eq!(op.value(), 2.0);
        drop(op);
        assert_eq!(engine.live_motors(), 0);
    }
}
