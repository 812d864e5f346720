//! Error type for contract violations at the public boundary.

use thiserror::Error;

use crate::ids::OpId;
use crate::kind::OperationKind;
use crate::operation::OpMode;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixOpError {
    /// Raw id above [`OpId::MAX`].
    #[error("operation id {0} is out of range (max {max})", max = OpId::MAX)]
    InvalidOpId(u8),

    /// Constant rotation not normalized into `(-pi, pi]`.
    #[error("{kind} value {value} is outside the canonical angle range")]
    AngleOutOfRange { kind: OperationKind, value: f32 },

    /// Descriptor variant cannot drive an operation in `mode`.
    #[error("{id}: {setup} descriptor cannot drive a {mode:?} operation")]
    IncompatibleDescriptor {
        id: OpId,
        mode: OpMode,
        setup: &'static str,
    },

    /// Operation has no motion handle to forward to.
    #[error("{id} is a constant operation and has no motion handle")]
    NotMotionDriven { id: OpId },

    #[error("invalid spline: {0}")]
    InvalidSpline(String),
}
