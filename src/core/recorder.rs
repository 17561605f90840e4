//! Trajectory recorder: buffers pointer samples for the active drag

use crate::types::{DragOffset, PointSample, Trajectory};

/// Owns the point buffer of one drag at a time
#[derive(Debug, Default)]
pub struct TrajectoryRecorder {
    trajectory: Trajectory,
    active: bool,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new drag; any previous buffer is dropped
    pub fn begin(&mut self, start: PointSample) {
        self.trajectory.clear();
        self.trajectory.push(start);
        self.active = true;
    }

    /// Append a sample. Returns false (and drops it) when no drag is active.
    pub fn record(&mut self, point: PointSample) -> bool {
        if !self.active {
            return false;
        }
        self.trajectory.push(point);
        true
    }

    /// Stop recording and hand over the frozen trajectory with its offset.
    /// The recorder is empty afterwards.
    pub fn finish(&mut self) -> (Trajectory, DragOffset) {
        self.active = false;
        let trajectory = std::mem::take(&mut self.trajectory);
        let offset = trajectory.offset();
        (trajectory, offset)
    }

    /// Drop the buffer without classifying
    pub fn discard(&mut self) {
        self.active = false;
        self.trajectory.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn sample_count(&self) -> usize {
        self.trajectory.len()
    }

    /// Live offset of the drag in progress
    pub fn current_offset(&self) -> DragOffset {
        self.trajectory.offset()
    }
}

// =============================================================================
// TESTS
// =============================================================================
