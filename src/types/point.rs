//! Pointer samples, trajectories and drag offsets

use serde::{Deserialize, Serialize};

/// One pointer position at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSample {
    pub x: f64,
    pub y: f64,
}

impl PointSample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another sample
    pub fn distance_to(&self, other: &PointSample) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Final displacement from drag start to drag end
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragOffset {
    pub dx: f64,
    pub dy: f64,
}

impl DragOffset {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Horizontal movement dominates. Ties are vertical.
    pub fn is_horizontal(&self) -> bool {
        self.dx.abs() > self.dy.abs()
    }
}

/// Axis-aligned bounds of a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> PointSample {
        PointSample::new(
            self.min_x + self.width() / 2.0,
            self.min_y + self.height() / 2.0,
        )
    }
}

/// Ordered pointer samples of one continuous drag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    points: Vec<PointSample>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<PointSample>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: PointSample) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PointSample] {
        &self.points
    }

    pub fn first(&self) -> Option<&PointSample> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PointSample> {
        self.points.last()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Bounds of all samples, `None` when empty
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let init = BoundingBox {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(self.points.iter().fold(init, |b, p| BoundingBox {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }

    /// Distance between first and last sample
    pub fn closure_distance(&self) -> Option<f64> {
        Some(self.first()?.distance_to(self.last()?))
    }

    /// Last sample minus first sample; zero for an empty trajectory
    pub fn offset(&self) -> DragOffset {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => DragOffset::new(last.x - first.x, last.y - first.y),
            _ => DragOffset::default(),
        }
    }
}
