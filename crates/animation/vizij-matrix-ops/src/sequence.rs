//! Ordered, append-only list of descriptors for one animated matrix.

use crate::config::Config;
use crate::descriptor::OperationDescriptor;
use crate::error::MatrixOpError;
use crate::ids::OpId;
use crate::kind::OperationKind;
use crate::motion::{MotionInit, MotionTime, Spline, SplinePlayback, Target1f};

/// Operations expected per matrix when no config is given.
pub const DEFAULT_EXPECTED_OPS: usize = 8;

/// One animation's operations for one matrix, in composition order.
///
/// Built by the loader, consumed to construct or re-blend runtime operations,
/// then dropped or cleared for reuse.
#[derive(Clone, Debug)]
pub struct OperationSequence<'a> {
    ops: Vec<OperationDescriptor<'a>>,
    expected_ops: usize,
}

impl<'a> OperationSequence<'a> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EXPECTED_OPS)
    }

    pub fn with_capacity(expected_ops: usize) -> Self {
        Self {
            ops: Vec::with_capacity(expected_ops),
            expected_ops,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::with_capacity(cfg.expected_ops)
    }

    /// Remove every operation. Capacity is kept.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.ops.reserve(self.expected_ops);
    }

    pub fn push(&mut self, op: OperationDescriptor<'a>) {
        self.ops.push(op);
    }

    /// Constant operation, e.g. `RotateX` by `pi/2` to lay something flat.
    pub fn add_constant(
        &mut self,
        id: OpId,
        kind: OperationKind,
        value: f32,
    ) -> Result<(), MatrixOpError> {
        self.push(OperationDescriptor::constant(id, kind, value)?);
        Ok(())
    }

    pub fn add_undriven(&mut self, id: OpId, kind: OperationKind, motion: &'a MotionInit) {
        self.push(OperationDescriptor::undriven(id, kind, motion));
    }

    pub fn add_seeded(
        &mut self,
        id: OpId,
        kind: OperationKind,
        motion: &'a MotionInit,
        initial: f32,
    ) {
        self.push(OperationDescriptor::seeded(id, kind, motion, initial));
    }

    pub fn add_target(
        &mut self,
        id: OpId,
        kind: OperationKind,
        motion: &'a MotionInit,
        target: &'a Target1f,
    ) {
        self.push(OperationDescriptor::eased_target(id, kind, motion, target));
    }

    pub fn add_spline(
        &mut self,
        id: OpId,
        kind: OperationKind,
        motion: &'a MotionInit,
        spline: &'a Spline,
        playback: SplinePlayback,
    ) {
        self.push(OperationDescriptor::spline_driven(
            id, kind, motion, spline, playback,
        ));
    }

    /// Latest spline end over all spline-driven operations, 0 without any.
    pub fn end_time(&self) -> MotionTime {
        self.ops
            .iter()
            .filter_map(OperationDescriptor::spline_end_x)
            .map(|end_x| end_x as MotionTime)
            .fold(0, MotionTime::max)
    }

    #[inline]
    pub fn ops(&self) -> &[OperationDescriptor<'a>] {
        &self.ops
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OperationDescriptor<'a>> {
        self.ops.iter()
    }

    pub fn contains(&self, id: OpId) -> bool {
        self.ops.iter().any(|op| op.id() == id)
    }
}

impl Default for OperationSequence<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s, 'a> IntoIterator for &'s OperationSequence<'a> {
    type Item = &'s OperationDescriptor<'a>;
    type IntoIter = std::slice::Iter<'s, OperationDescriptor<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::OpSetup;
    use std::f32::consts::FRAC_PI_4;

    fn id(raw: u8) -> OpId {
        OpId::new(raw).unwrap()
    }

    #[test]
    fn end_time_is_latest_spline_end() {
        let motion = MotionInit::default();
        let s3 = Spline::through_points(&[(0.0, 0.0), (3.0, 1.0)]).unwrap();
        let s7 = Spline::through_points(&[(0.0, 0.0), (7.0, 1.0)]).unwrap();
        let s2 = Spline::through_points(&[(0.0, 0.0), (2.0, 1.0)]).unwrap();
        let target = Target1f::new(1.0, 0.0, 100);

        let mut seq = OperationSequence::new();
        seq.add_spline(id(0), OperationKind::TranslateX, &motion, &s3, SplinePlayback::default());
        seq.add_constant(id(1), OperationKind::ScaleX, 2.0).unwrap();
        seq.add_spline(id(2), OperationKind::TranslateY, &motion, &s7, SplinePlayback::default());
        seq.add_target(id(3), OperationKind::TranslateZ, &motion, &target);
        seq.add_spline(id(4), OperationKind::ScaleY, &motion, &s2, SplinePlayback::default());
        assert_eq!(seq.end_time(), 7);
    }

    #[test]
    fn end_time_without_splines_is_zero() {
        let motion = MotionInit::default();
        let mut seq = OperationSequence::new();
        assert_eq!(seq.end_time(), 0);
        seq.add_constant(id(0), OperationKind::TranslateX, 5.0).unwrap();
        seq.add_undriven(id(1), OperationKind::RotateY, &motion);
        seq.add_seeded(id(2), OperationKind::ScaleUniform, &motion, 3.0);
        assert_eq!(seq.end_time(), 0);
    }

    #[test]
    fn appended_constant_reads_back_in_place() {
        let motion = MotionInit::default();
        let mut seq = OperationSequence::new();
        seq.add_undriven(id(9), OperationKind::TranslateX, &motion);
        seq.add_constant(id(3), OperationKind::RotateY, FRAC_PI_4).unwrap();

        let op = &seq.ops()[1];
        assert_eq!(op.id(), id(3));
        assert_eq!(op.kind(), OperationKind::RotateY);
        assert_eq!(*op.setup(), OpSetup::Constant(FRAC_PI_4));
        assert!(seq.contains(id(3)) && !seq.contains(id(4)));
    }

    #[test]
    fn rejected_constant_is_not_appended() {
        let mut seq = OperationSequence::new();
        assert!(seq.add_constant(id(0), OperationKind::RotateZ, 7.0).is_err());
        assert!(seq.is_empty());
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut seq = OperationSequence::from_config(&Config::default());
        for i in 0..20 {
            seq.add_constant(id(i), OperationKind::TranslateX, 0.0).unwrap();
        }
        let cap = seq.ops.capacity();
        seq.clear();
        assert!(seq.is_empty());
        assert!(seq.ops.capacity() >= cap);
    }
}
