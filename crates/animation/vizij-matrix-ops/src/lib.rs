//! Vizij Matrix Ops (engine-agnostic)
//!
//! Blendable per-parameter operations for building skeletal and object
//! transform matrices. Each logical transform step (rotate about X,
//! translate Y, scale uniformly, ...) is an independently animated
//! [`RuntimeOperation`]; an ordered chain of them composes one matrix.
//!
//! Operations are matched across animations by [`OpId`], so an object can
//! switch clips without a visual pop: shared operations re-blend, dropped
//! ones relax to their neutral value.

pub mod chain;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod ids;
pub mod kind;
pub mod motion;
pub mod operation;
pub mod range;
pub mod sequence;
pub mod util;

// Re-exports for consumers (composers, loaders)
pub use chain::MatrixOpChain;
pub use config::Config;
pub use descriptor::{OpSetup, OperationDescriptor};
pub use error::MatrixOpError;
pub use ids::OpId;
pub use kind::OperationKind;
pub use motion::{
    MotionEngine, MotionHandle, MotionInit, MotionTime, ScalarMotor, Spline, SplineNode,
    SplinePlayback, Target1f, TargetNode,
};
pub use operation::{OpMode, RuntimeOperation};
pub use range::{normalize_angle, Range};
pub use sequence::OperationSequence;
pub use util::{twitch, Settled1f, TwitchDirection};
