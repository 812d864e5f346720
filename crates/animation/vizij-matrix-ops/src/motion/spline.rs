//! Piecewise cubic Hermite curves over x.
//!
//! Nodes carry position and slope; each segment is the Hermite cubic between
//! its two end nodes. Outside `[start_x, end_x]` the curve holds its end
//! values.

use serde::{Deserialize, Serialize};

use crate::error::MatrixOpError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplineNode {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub derivative: f32,
}

/// Read-only curve asset. Construction validates node order.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SplineNode>", into = "Vec<SplineNode>")]
pub struct Spline {
    nodes: Vec<SplineNode>,
}

impl Spline {
    /// Build a spline; `nodes` must be non-empty, finite and strictly
    /// increasing in x.
    pub fn new(nodes: Vec<SplineNode>) -> Result<Self, MatrixOpError> {
        if nodes.is_empty() {
            return Err(MatrixOpError::InvalidSpline("no nodes".into()));
        }
        for node in &nodes {
            if !(node.x.is_finite() && node.y.is_finite() && node.derivative.is_finite()) {
                return Err(MatrixOpError::InvalidSpline(format!(
                    "non-finite node at x={}",
                    node.x
                )));
            }
        }
        if let Some(pair) = nodes.windows(2).find(|w| w[1].x <= w[0].x) {
            return Err(MatrixOpError::InvalidSpline(format!(
                "x must increase: {} then {}",
                pair[0].x, pair[1].x
            )));
        }
        Ok(Self { nodes })
    }

    /// Curve through `points` with Catmull-Rom style slopes; flat at both
    /// ends.
    pub fn through_points(points: &[(f32, f32)]) -> Result<Self, MatrixOpError> {
        let n = points.len();
        let nodes = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                let derivative = if i == 0 || i + 1 == n {
                    0.0
                } else {
                    let (x0, y0) = points[i - 1];
                    let (x1, y1) = points[i + 1];
                    (y1 - y0) / (x1 - x0)
                };
                SplineNode { x, y, derivative }
            })
            .collect();
        Self::new(nodes)
    }

    #[inline]
    pub fn nodes(&self) -> &[SplineNode] {
        &self.nodes
    }

    #[inline]
    pub fn start_x(&self) -> f32 {
        self.nodes[0].x
    }

    #[inline]
    pub fn end_x(&self) -> f32 {
        self.nodes[self.nodes.len() - 1].x
    }

    #[inline]
    pub fn end_y(&self) -> f32 {
        self.nodes[self.nodes.len() - 1].y
    }

    /// Value at `x`, clamped to the curve's extent.
    pub fn evaluate(&self, x: f32) -> f32 {
        match self.segment(x) {
            Segment::Before => self.nodes[0].y,
            Segment::After => self.end_y(),
            Segment::Inside(i, t) => {
                let (a, b) = (self.nodes[i], self.nodes[i + 1]);
                hermite(a.y, a.derivative, b.y, b.derivative, b.x - a.x, t)
            }
        }
    }

    /// Slope at `x`; zero outside the curve.
    pub fn derivative(&self, x: f32) -> f32 {
        match self.segment(x) {
            Segment::Before | Segment::After => 0.0,
            Segment::Inside(i, t) => {
                let (a, b) = (self.nodes[i], self.nodes[i + 1]);
                hermite_slope(a.y, a.derivative, b.y, b.derivative, b.x - a.x, t)
            }
        }
    }

    fn segment(&self, x: f32) -> Segment {
        if x <= self.start_x() || self.nodes.len() == 1 {
            return Segment::Before;
        }
        if x >= self.end_x() {
            return Segment::After;
        }
        // First node strictly right of x; guaranteed in 1..len by the checks above.
        let hi = self.nodes.partition_point(|n| n.x <= x);
        let (a, b) = (self.nodes[hi - 1], self.nodes[hi]);
        Segment::Inside(hi - 1, (x - a.x) / (b.x - a.x))
    }
}

// Manual so `clone_from` reuses the node buffer.
impl Clone for Spline {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.nodes.clone_from(&source.nodes);
    }
}

impl TryFrom<Vec<SplineNode>> for Spline {
    type Error = MatrixOpError;

    fn try_from(nodes: Vec<SplineNode>) -> Result<Self, Self::Error> {
        Self::new(nodes)
    }
}

impl From<Spline> for Vec<SplineNode> {
    fn from(spline: Spline) -> Self {
        spline.nodes
    }
}

enum Segment {
    Before,
    After,
    Inside(usize, f32),
}

/// Cubic Hermite between `(0, y0, d0)` and `(width, y1, d1)` at normalized `t`.
#[inline]
pub(crate) fn hermite(y0: f32, d0: f32, y1: f32, d1: f32, width: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;
    h00 * y0 + h10 * width * d0 + h01 * y1 + h11 * width * d1
}

/// d/dx of [`hermite`].
#[inline]
pub(crate) fn hermite_slope(y0: f32, d0: f32, y1: f32, d1: f32, width: f32, t: f32) -> f32 {
    if width <= 0.0 {
        return 0.0;
    }
    let t2 = t * t;
    let dh00 = 6.0 * t2 - 6.0 * t;
    let dh10 = 3.0 * t2 - 4.0 * t + 1.0;
    let dh01 = -6.0 * t2 + 6.0 * t;
    let dh11 = 3.0 * t2 - 2.0 * t;
    (dh00 * y0 + dh01 * y1) / width + dh10 * d0 + dh11 * d1
}
