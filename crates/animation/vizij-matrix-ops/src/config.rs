//! Core configuration for vizij-matrix-ops.

use serde::{Deserialize, Serialize};

/// Capacity hints. Nothing here affects results, only how often buffers grow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Operations expected per matrix. Sequences and chains reserve this many
    /// entries up front; over-estimating a little is cheaper than regrowing.
    pub expected_ops: usize,

    /// Initial motor slots reserved by the reference motion engine.
    pub motor_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            expected_ops: 8,
            motor_capacity: 64,
        }
    }
}
