//! Azimuth / zenith / roll controls.
//!
//! Each axis is driven by a range slider and a number input in the page.
//! Both widgets always show the same clamped integer held here.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Azimuth,
    Zenith,
    Roll,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Azimuth, Axis::Zenith, Axis::Roll];

    pub fn name(self) -> &'static str {
        match self {
            Axis::Azimuth => "azimuth",
            Axis::Zenith => "zenith",
            Axis::Roll => "roll",
        }
    }
}

/// Declared `[min, max]` of a control, inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisRange {
    pub min: i32,
    pub max: i32,
}

impl AxisRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, v: i64) -> i32 {
        v.clamp(self.min as i64, self.max as i64) as i32
    }
}

/// Orientation in whole degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OrientationParams {
    pub azimuth: i32,
    pub zenith: i32,
    pub roll: i32,
}

impl OrientationParams {
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Azimuth => self.azimuth,
            Axis::Zenith => self.zenith,
            Axis::Roll => self.roll,
        }
    }

    fn slot(&mut self, axis: Axis) -> &mut i32 {
        match axis {
            Axis::Azimuth => &mut self.azimuth,
            Axis::Zenith => &mut self.zenith,
            Axis::Roll => &mut self.roll,
        }
    }
}

/// Parse number-input text the way the page does: empty or non-numeric
/// text reads as 0, fractions round to the nearest degree.
pub fn parse_degrees(text: &str) -> i64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v.round() as i64,
        _ => 0,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrientationControls {
    params: OrientationParams,
    ranges: [AxisRange; 3],
}

impl OrientationControls {
    pub fn new(azimuth: AxisRange, zenith: AxisRange, roll: AxisRange) -> Self {
        let mut controls = Self {
            params: OrientationParams::default(),
            ranges: [azimuth, zenith, roll],
        };
        controls.reset();
        controls
    }

    pub fn params(&self) -> OrientationParams {
        self.params
    }

    pub fn range(&self, axis: Axis) -> AxisRange {
        self.ranges[axis as usize]
    }

    /// Back to 0 on every axis (clamped, for ranges that exclude 0).
    pub fn reset(&mut self) {
        for axis in Axis::ALL {
            let r = self.range(axis);
            *self.params.slot(axis) = r.clamp(0);
        }
    }

    /// Set from either widget. Returns the clamped value both widgets
    /// must now display and whether it differs from before.
    pub fn set(&mut self, axis: Axis, value: i64) -> (i32, bool) {
        let v = self.range(axis).clamp(value);
        let slot = self.params.slot(axis);
        let changed = *slot != v;
        *slot = v;
        (v, changed)
    }

    pub fn nudge(&mut self, axis: Axis, delta: i32) -> (i32, bool) {
        let cur = self.params.get(axis) as i64;
        self.set(axis, cur + delta as i64)
    }
}
