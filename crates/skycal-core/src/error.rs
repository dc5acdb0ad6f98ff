//! Error taxonomy for the calibration engine.
//!
//! - [`DomainError`]: geometry input that cannot be drawn or derived. The
//!   operation fails and produces no draw ops, so the last good frame stays.
//! - [`ValidationError`]: user input rejected without touching state.
//! - [`ServiceError`]: a consumed service failed or answered `ok: false`.

use crate::wizard::WizardStep;

pub type Result<T, E = CalibError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("source rectangle has zero height")]
    ZeroHeightSource,
    #[error("source rectangle has zero area ({sw}x{sh})")]
    ZeroAreaSource { sw: u32, sh: u32 },
    #[error("surface has zero size ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },
    #[error("image has zero size ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("source rectangle {sx},{sy} {sw}x{sh} exceeds image {width}x{height}")]
    RectOutOfBounds {
        sx: u32,
        sy: u32,
        sw: u32,
        sh: u32,
        width: u32,
        height: u32,
    },
    #[error("invalid range [{min}, {max}]")]
    InvertedRange { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("point lies outside the aperture circle")]
    OutsideAperture,
    #[error("point set already holds {0} points")]
    PointSetFull(usize),
    #[error("unknown hemisphere {0:?}")]
    UnknownHemisphere(String),
    #[error("hemisphere must be left, right or full")]
    UndecidedHemisphere,
    #[error("cannot leave {0:?}: precondition not met")]
    PreconditionUnmet(WizardStep),
    #[error("{0:?} has no forward transition")]
    FinalStep(WizardStep),
    #[error("cannot go back from {from:?} to {to:?}")]
    IllegalRetreat { from: WizardStep, to: WizardStep },
    #[error("no decoded image")]
    NoImage,
    #[error("no accepted upload")]
    NoUpload,
    #[error("upload generation {got} is stale (current {current})")]
    StaleUpload { got: u64, current: u64 },
    #[error("no hemisphere choice is pending")]
    NoPendingPrompt,
    #[error("segmentation needs exactly {needed} points, have {have}")]
    IncompletePoints { needed: usize, have: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{0}")]
    Rejected(String),
    #[error("HTTP {0}")]
    Http(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}
