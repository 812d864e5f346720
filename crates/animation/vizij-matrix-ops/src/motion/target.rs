//! Seek targets for a motion handle.

use serde::{Deserialize, Serialize};

use super::MotionTime;

/// Value and velocity to reach `time` ticks from now.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetNode {
    pub value: f32,
    #[serde(default)]
    pub velocity: f32,
    #[serde(default)]
    pub time: MotionTime,
}

/// Target for a scalar handle.
///
/// `current` (if any) is applied immediately; `target` (if any) is then eased
/// toward. A target node with `time <= 0` also applies immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Target1f {
    #[serde(default)]
    pub current: Option<TargetNode>,
    #[serde(default)]
    pub target: Option<TargetNode>,
}

impl Target1f {
    /// Snap to `value` now, at rest.
    pub fn current(value: f32) -> Self {
        Self::current_with_velocity(value, 0.0)
    }

    pub fn current_with_velocity(value: f32, velocity: f32) -> Self {
        Self {
            current: Some(TargetNode {
                value,
                velocity,
                time: 0,
            }),
            target: None,
        }
    }

    /// Ease from wherever the handle is toward `value`, arriving with
    /// `velocity` after `time` ticks.
    pub fn new(value: f32, velocity: f32, time: MotionTime) -> Self {
        Self {
            current: None,
            target: Some(TargetNode {
                value,
                velocity,
                time,
            }),
        }
    }

    /// Snap to the current node, then ease to the target node.
    pub fn current_to_target(current: TargetNode, target: TargetNode) -> Self {
        Self {
            current: Some(current),
            target: Some(target),
        }
    }

    /// Ticks until the last node is reached.
    pub fn end_time(&self) -> MotionTime {
        self.target.map_or(0, |node| node.time.max(0))
    }

    /// Value of the last node, if any.
    pub fn end_value(&self) -> Option<f32> {
        self.target.or(self.current).map(|node| node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_target_has_no_duration() {
        let t = Target1f::current(3.0);
        assert_eq!(t.end_time(), 0);
        assert_eq!(t.end_value(), Some(3.0));
    }

    #[test]
    fn eased_target_reports_last_node() {
        let t = Target1f::current_to_target(
            TargetNode {
                value: 1.0,
                velocity: 0.0,
                time: 0,
            },
            TargetNode {
                value: 4.0,
                velocity: 0.0,
                time: 12,
            },
        );
        assert_eq!(t.end_time(), 12);
        assert_eq!(t.end_value(), Some(4.0));
        assert_eq!(Target1f::default().end_value(), None);
    }
}
