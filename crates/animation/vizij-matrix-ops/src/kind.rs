//! Operation kinds and their per-kind constants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::range::Range;

/// One scalar contribution to a composed transform matrix.
///
/// Stored as a single byte so runtime operations stay small.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OperationKind {
    RotateX,
    RotateY,
    RotateZ,
    TranslateX,
    TranslateY,
    TranslateZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    ScaleUniform,
    Invalid,
}

impl OperationKind {
    /// Every valid kind, in declaration order.
    pub const ALL: [OperationKind; 10] = [
        OperationKind::RotateX,
        OperationKind::RotateY,
        OperationKind::RotateZ,
        OperationKind::TranslateX,
        OperationKind::TranslateY,
        OperationKind::TranslateZ,
        OperationKind::ScaleX,
        OperationKind::ScaleY,
        OperationKind::ScaleZ,
        OperationKind::ScaleUniform,
    ];

    #[inline]
    pub fn is_rotate(self) -> bool {
        matches!(
            self,
            OperationKind::RotateX | OperationKind::RotateY | OperationKind::RotateZ
        )
    }

    #[inline]
    pub fn is_translate(self) -> bool {
        matches!(
            self,
            OperationKind::TranslateX | OperationKind::TranslateY | OperationKind::TranslateZ
        )
    }

    #[inline]
    pub fn is_scale(self) -> bool {
        matches!(
            self,
            OperationKind::ScaleX
                | OperationKind::ScaleY
                | OperationKind::ScaleZ
                | OperationKind::ScaleUniform
        )
    }

    /// Value at which the operation leaves the matrix unchanged. An
    /// operation that constantly holds this value can be dropped.
    #[inline]
    pub fn neutral_value(self) -> f32 {
        if self.is_scale() {
            1.0
        } else {
            0.0
        }
    }

    /// Range values must be normalized into before blending. Only rotations
    /// are restricted.
    #[inline]
    pub fn valid_range(self) -> Range {
        if self.is_rotate() {
            Range::ANGLE
        } else {
            Range::UNRESTRICTED
        }
    }

    /// Debug name.
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::RotateX => "RotateAboutX",
            OperationKind::RotateY => "RotateAboutY",
            OperationKind::RotateZ => "RotateAboutZ",
            OperationKind::TranslateX => "TranslateX",
            OperationKind::TranslateY => "TranslateY",
            OperationKind::TranslateZ => "TranslateZ",
            OperationKind::ScaleX => "ScaleX",
            OperationKind::ScaleY => "ScaleY",
            OperationKind::ScaleZ => "ScaleZ",
            OperationKind::ScaleUniform => "ScaleUniformly",
            OperationKind::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
