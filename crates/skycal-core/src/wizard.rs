//! Linear four-step wizard with a high-water mark.
//!
//! Forward moves are only made by the session after the step's
//! precondition holds (see [`precondition`]); backward moves to any
//! already-visited step are always legal and never re-validated.

use crate::constants::STEP_COUNT;
use crate::error::ValidationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Upload = 1,
    Orient = 2,
    Aperture = 3,
    Result = 4,
}

impl WizardStep {
    pub const ALL: [WizardStep; STEP_COUNT as usize] = [
        WizardStep::Upload,
        WizardStep::Orient,
        WizardStep::Aperture,
        WizardStep::Result,
    ];

    #[inline]
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(WizardStep::Upload),
            2 => Some(WizardStep::Orient),
            3 => Some(WizardStep::Aperture),
            4 => Some(WizardStep::Result),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }
}

/// Facts the forward preconditions are evaluated against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gate {
    pub has_image: bool,
    pub hemisphere_decided: bool,
    pub render_ready: bool,
    pub points_complete: bool,
}

fn can_leave_upload(g: &Gate) -> bool {
    g.has_image && g.hemisphere_decided
}

fn can_leave_orient(g: &Gate) -> bool {
    g.render_ready
}

fn can_leave_aperture(g: &Gate) -> bool {
    g.points_complete
}

/// Precondition for moving forward out of `step`.
pub fn precondition(step: WizardStep, gate: &Gate) -> Result<(), ValidationError> {
    let ok = match step {
        WizardStep::Upload => can_leave_upload(gate),
        WizardStep::Orient => can_leave_orient(gate),
        WizardStep::Aperture => can_leave_aperture(gate),
        WizardStep::Result => return Err(ValidationError::FinalStep(step)),
    };
    if ok {
        Ok(())
    } else {
        Err(ValidationError::PreconditionUnmet(step))
    }
}

/// How a step indicator is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepIndicator {
    pub step: WizardStep,
    pub active: bool,
    pub done: bool,
    /// Only indicators below the current step accept clicks.
    pub clickable: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wizard {
    current: WizardStep,
    max_reached: WizardStep,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            current: WizardStep::Upload,
            max_reached: WizardStep::Upload,
        }
    }

    #[inline]
    pub fn current(&self) -> WizardStep {
        self.current
    }

    #[inline]
    pub fn max_reached(&self) -> WizardStep {
        self.max_reached
    }

    /// Start of a new upload session; the watermark is scoped to it.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Move one step forward. Callers check [`precondition`] first.
    pub(crate) fn enter_next(&mut self) -> Result<WizardStep, ValidationError> {
        let next = self
            .current
            .next()
            .ok_or(ValidationError::FinalStep(self.current))?;
        self.current = next;
        self.max_reached = self.max_reached.max(next);
        Ok(next)
    }

    /// Go back to an earlier step. Rejected for `to >= current`.
    pub fn retreat(&mut self, to: WizardStep) -> Result<(), ValidationError> {
        if to >= self.current {
            return Err(ValidationError::IllegalRetreat {
                from: self.current,
                to,
            });
        }
        self.current = to;
        Ok(())
    }

    /// One step back; no-op on the first step.
    pub fn back(&mut self) -> bool {
        match self.current.prev() {
            Some(prev) => self.retreat(prev).is_ok(),
            None => false,
        }
    }

    pub fn indicators(&self) -> [StepIndicator; STEP_COUNT as usize] {
        WizardStep::ALL.map(|step| StepIndicator {
            step,
            active: step == self.current,
            done: step < self.current,
            clickable: step < self.current,
        })
    }
}
