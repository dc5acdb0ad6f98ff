use crate::constants::*;
use crate::error::DomainError;
use crate::orientation::{Axis, AxisRange};
use std::time::Duration;

/// Engine configuration. Defaults come from [`crate::constants`]; the web
/// frontend overrides ranges with the limits its controls declare.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub render_debounce: Duration,
    pub dual_ratio_min: f64,
    pub dual_ratio_max: f64,
    pub azimuth: AxisRange,
    pub zenith: AxisRange,
    pub roll: AxisRange,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            render_debounce: Duration::from_millis(RENDER_DEBOUNCE_MS),
            dual_ratio_min: DUAL_RATIO_MIN,
            dual_ratio_max: DUAL_RATIO_MAX,
            azimuth: AxisRange::new(AZIMUTH_RANGE.0, AZIMUTH_RANGE.1),
            zenith: AxisRange::new(ZENITH_RANGE.0, ZENITH_RANGE.1),
            roll: AxisRange::new(ROLL_RANGE.0, ROLL_RANGE.1),
        }
    }
}

impl SessionConfig {
    pub fn range(&self, axis: Axis) -> AxisRange {
        match axis {
            Axis::Azimuth => self.azimuth,
            Axis::Zenith => self.zenith,
            Axis::Roll => self.roll,
        }
    }

    pub fn with_range(mut self, axis: Axis, range: AxisRange) -> Self {
        match axis {
            Axis::Azimuth => self.azimuth = range,
            Axis::Zenith => self.zenith = range,
            Axis::Roll => self.roll = range,
        }
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.dual_ratio_min <= self.dual_ratio_max) {
            return Err(DomainError::InvertedRange {
                min: self.dual_ratio_min,
                max: self.dual_ratio_max,
            });
        }
        for axis in Axis::ALL {
            let r = self.range(axis);
            if r.min > r.max {
                return Err(DomainError::InvertedRange {
                    min: r.min as f64,
                    max: r.max as f64,
                });
            }
        }
        Ok(())
    }
}
