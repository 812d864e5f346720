//! Per-matrix slot array: the runtime operations one matrix is composed from.
//!
//! The chain keeps operations in composition order and handles the switch
//! from one animation's [`OperationSequence`] to the next: matched ids are
//! re-blended in place, ids that disappeared relax to neutral, and new ids
//! get fresh operations.

use std::vec::Drain;

use log::{debug, warn};

use crate::config::Config;
use crate::descriptor::OperationDescriptor;
use crate::error::MatrixOpError;
use crate::ids::OpId;
use crate::kind::OperationKind;
use crate::motion::{MotionHandle, MotionTime, SplinePlayback};
use crate::operation::RuntimeOperation;
use crate::sequence::{OperationSequence, DEFAULT_EXPECTED_OPS};

#[derive(Debug)]
struct ChainEntry<M: MotionHandle> {
    op: RuntimeOperation<M>,
    /// False once the current sequence stopped defining this operation.
    active: bool,
}

/// Runtime operations of one matrix.
#[derive(Debug)]
pub struct MatrixOpChain<M: MotionHandle> {
    entries: Vec<ChainEntry<M>>,
    /// Previous entries while a blend rebuilds `entries`.
    scratch: Vec<ChainEntry<M>>,
}

impl<M: MotionHandle> MatrixOpChain<M> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EXPECTED_OPS)
    }

    pub fn with_capacity(expected_ops: usize) -> Self {
        Self {
            entries: Vec::with_capacity(expected_ops),
            scratch: Vec::with_capacity(expected_ops),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::with_capacity(cfg.expected_ops)
    }

    /// Build one operation per descriptor of `sequence`.
    pub fn from_sequence(
        sequence: &OperationSequence<'_>,
        engine: &M::Engine,
    ) -> Result<Self, MatrixOpError> {
        let mut chain = Self::with_capacity(sequence.len().max(DEFAULT_EXPECTED_OPS));
        for descriptor in sequence {
            chain.entries.push(ChainEntry {
                op: RuntimeOperation::new(descriptor, engine)?,
                active: true,
            });
        }
        Ok(chain)
    }

    /// Switch to `sequence`, crossfading over `playback.blend_x`.
    ///
    /// Operations are walked in order against the new descriptors. An
    /// operation whose id comes next in the sequence is re-blended; one whose
    /// id no longer appears is relaxed toward neutral and kept in place so it
    /// can ease out; a descriptor with no remaining operation gets a new one.
    /// When both heads appear later on the other side (reordered ids) the old
    /// operation is relaxed and a fresh one is built for its id later.
    ///
    /// On error the walk stops. The operation that failed and every
    /// operation not yet reached stay in the chain unchanged.
    pub fn blend_to_sequence(
        &mut self,
        sequence: &OperationSequence<'_>,
        engine: &M::Engine,
        playback: &SplinePlayback,
    ) -> Result<(), MatrixOpError> {
        let Self { entries, scratch } = self;
        std::mem::swap(entries, scratch);
        let mut previous = scratch.drain(..);
        let result = Self::merge(entries, &mut previous, sequence.ops(), engine, playback);
        if result.is_err() {
            entries.extend(previous);
        }
        result
    }

    fn merge(
        entries: &mut Vec<ChainEntry<M>>,
        previous: &mut Drain<'_, ChainEntry<M>>,
        descriptors: &[OperationDescriptor<'_>],
        engine: &M::Engine,
        playback: &SplinePlayback,
    ) -> Result<(), MatrixOpError> {
        let mut next = 0;
        loop {
            let old_id = previous.as_slice().first().map(|e| e.op.id());
            let descriptor = descriptors.get(next);
            match (old_id, descriptor) {
                (None, None) => return Ok(()),
                (Some(old), Some(d)) if old == d.id() => {
                    if let Some(mut entry) = previous.next() {
                        let result = Self::reblend(&mut entry, d, engine, playback);
                        entries.push(entry);
                        result?;
                    }
                    next += 1;
                }
                (Some(old), _) if !descriptors[next..].iter().any(|d| d.id() == old) => {
                    if let Some(entry) = previous.next() {
                        entries.push(Self::relax(entry, playback));
                    }
                }
                (_, Some(d))
                    if !previous.as_slice().iter().any(|e| e.op.id() == d.id()) =>
                {
                    debug!("chain: new {} {} ({})", d.id(), d.kind(), d.setup().label());
                    entries.push(ChainEntry {
                        op: RuntimeOperation::new(d, engine)?,
                        active: true,
                    });
                    next += 1;
                }
                _ => {
                    // Both heads reappear further on; give up on the old one.
                    if let Some(entry) = previous.next() {
                        entries.push(Self::relax(entry, playback));
                    }
                }
            }
        }
    }

    /// Leaves `entry` untouched on error.
    fn reblend(
        entry: &mut ChainEntry<M>,
        descriptor: &OperationDescriptor<'_>,
        engine: &M::Engine,
        playback: &SplinePlayback,
    ) -> Result<(), MatrixOpError> {
        if !entry.op.accepts(descriptor) {
            warn!(
                "chain: {} is {:?} and cannot take a {} descriptor; replacing it",
                entry.op.id(),
                entry.op.mode(),
                descriptor.setup().label()
            );
            *entry = ChainEntry {
                op: RuntimeOperation::new(descriptor, engine)?,
                active: true,
            };
            return Ok(());
        }
        entry.op.blend_to_op(descriptor, playback)?;
        entry.active = true;
        Ok(())
    }

    fn relax(mut entry: ChainEntry<M>, playback: &SplinePlayback) -> ChainEntry<M> {
        if entry.active {
            debug!(
                "chain: relaxing {} {} over {}",
                entry.op.id(),
                entry.op.kind(),
                playback.blend_time()
            );
            entry.op.blend_to_default(playback.blend_time());
            entry.active = false;
        }
        entry
    }

    /// Drop relaxed operations that have reached neutral.
    pub fn prune_settled(&mut self) {
        self.entries
            .retain(|e| e.active || e.op.time_remaining() > 0);
    }

    pub fn set_playback_rate(&mut self, rate: f32) {
        for entry in &mut self.entries {
            entry.op.set_playback_rate(rate);
        }
    }

    /// Longest time any operation still needs.
    pub fn time_remaining(&self) -> MotionTime {
        self.entries
            .iter()
            .map(|e| e.op.time_remaining())
            .max()
            .unwrap_or(0)
    }

    /// Operations in composition order, including ones still relaxing.
    pub fn iter(&self) -> impl Iterator<Item = &RuntimeOperation<M>> {
        self.entries.iter().map(|e| &e.op)
    }

    /// `(id, kind, value)` per operation, for the matrix composer.
    pub fn values(&self) -> impl Iterator<Item = (OpId, OperationKind, f32)> + '_ {
        self.entries
            .iter()
            .map(|e| (e.op.id(), e.op.kind(), e.op.value()))
    }

    /// First active operation with `id`, else the first relaxing one.
    pub fn get(&self, id: OpId) -> Option<&RuntimeOperation<M>> {
        let mut matching = self.entries.iter().filter(|e| e.op.id() == id);
        let first = matching.next()?;
        if first.active {
            return Some(&first.op);
        }
        Some(&matching.find(|e| e.active).unwrap_or(first).op)
    }

    pub fn is_active(&self, id: OpId) -> bool {
        self.entries.iter().any(|e| e.active && e.op.id() == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M: MotionHandle> Default for MatrixOpChain<M> {
    fn default() -> Self {
        Self::new()
    }
}
