//! Identifiers used to match an operation across two animations.
//!
//! A matrix may carry several operations of the same kind (for example a
//! translate to a scale pivot, the scale, then a translate back). The id is
//! what tells the blender which translate in the old animation corresponds to
//! which translate in the new one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MatrixOpError;

/// Stable operation id in `0..=254`. `255` is reserved for "unset".
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OpId(u8);

impl OpId {
    /// Largest id an operation may carry.
    pub const MAX: u8 = 254;
    /// Raw value reserved for "no operation".
    pub const INVALID_RAW: u8 = 255;

    /// Validate `raw` and wrap it.
    #[inline]
    pub fn new(raw: u8) -> Result<Self, MatrixOpError> {
        if raw > Self::MAX {
            return Err(MatrixOpError::InvalidOpId(raw));
        }
        Ok(Self(raw))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for OpId {
    type Error = MatrixOpError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<OpId> for u8 {
    fn from(id: OpId) -> Self {
        id.0
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op#{}", self.0)
    }
}
