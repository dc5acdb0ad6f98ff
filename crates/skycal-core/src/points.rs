//! Aperture point collection and its overlay.

use crate::constants::{MARKER_RADIUS_PX, MAX_POINTS};
use crate::error::{CalibError, ValidationError};
use crate::geometry::{inscribed_circle, normalized_to_pixel, pixel_to_normalized, DrawOp};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Click position normalized to the aperture surface, `x`/`y` in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    pub x: f64,
    pub y: f64,
}

impl From<DVec2> for CalibrationPoint {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<CalibrationPoint> for DVec2 {
    fn from(p: CalibrationPoint) -> Self {
        DVec2::new(p.x, p.y)
    }
}

/// Up to three points in insertion order. The order is forwarded to the
/// segmentation service as-is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCollector {
    points: SmallVec<[CalibrationPoint; MAX_POINTS]>,
    revision: u64,
}

impl PointCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a click at pixel `(px, py)` on a `width` x `height` surface.
    /// Rejects without mutating when the set is full or the click falls
    /// outside the inscribed circle. Returns the new count.
    pub fn add_point(
        &mut self,
        px: f64,
        py: f64,
        width: u32,
        height: u32,
    ) -> Result<usize, CalibError> {
        if self.points.len() >= MAX_POINTS {
            return Err(ValidationError::PointSetFull(self.points.len()).into());
        }
        let p = DVec2::new(px, py);
        let n = pixel_to_normalized(p, width, height)?;
        if !inscribed_circle(width as f64, height as f64).contains(p) {
            return Err(ValidationError::OutsideAperture.into());
        }
        self.points.push(n.into());
        self.revision += 1;
        Ok(self.points.len())
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.revision += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.points.len() == MAX_POINTS
    }

    pub fn as_slice(&self) -> &[CalibrationPoint] {
        &self.points
    }

    /// Bumped on every mutation; a segmentation authorized at an older
    /// revision is void.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn overlay(&self, width: u32, height: u32) -> Result<Vec<DrawOp>, CalibError> {
        overlay(&self.points, width, height)
    }
}

/// Marker per point, plus the closed triangle once all three are present.
pub fn overlay(
    points: &[CalibrationPoint],
    width: u32,
    height: u32,
) -> Result<Vec<DrawOp>, CalibError> {
    let mut pixels: SmallVec<[DVec2; MAX_POINTS]> = SmallVec::new();
    for p in points {
        pixels.push(normalized_to_pixel((*p).into(), width, height)?);
    }
    let mut ops = Vec::with_capacity(pixels.len() + 3);
    ops.push(DrawOp::Save);
    ops.extend(pixels.iter().map(|&center| DrawOp::Marker {
        center,
        radius: MARKER_RADIUS_PX,
    }));
    if pixels.len() == MAX_POINTS {
        ops.push(DrawOp::Polygon { vertices: pixels });
    }
    ops.push(DrawOp::Restore);
    Ok(ops)
}
