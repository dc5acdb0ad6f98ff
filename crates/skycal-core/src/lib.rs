//! Calibration state engine for the skycal wizard.
//!
//! Platform-neutral: no browser APIs, no I/O. The web frontend owns the
//! canvases and the network and drives a [`SessionState`] with events,
//! timer ticks and service replies.

pub mod config;
pub mod constants;
pub mod coordinator;
pub mod debounce;
pub mod error;
pub mod geometry;
pub mod notify;
pub mod orientation;
pub mod points;
pub mod protocol;
pub mod selection;
pub mod session;
pub mod wizard;

pub use config::SessionConfig;
pub use coordinator::{RenderCoordinator, RenderIntent, RenderOutcome, RenderStatus, RenderTicket};
pub use error::{CalibError, DomainError, Result, ServiceError, ValidationError};
pub use geometry::{DrawOp, SourceRect, Surface};
pub use notify::{Change, Changes, Notifier};
pub use orientation::{Axis, AxisRange, OrientationParams};
pub use points::{CalibrationPoint, PointCollector};
pub use selection::{Hemisphere, SourceImage};
pub use session::{Advance, CallOutcome, Controls, HemispherePrompt, SessionState};
pub use wizard::{StepIndicator, WizardStep};
