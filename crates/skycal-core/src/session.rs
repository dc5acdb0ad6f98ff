//! The single owned aggregate behind the wizard.
//!
//! All mutation goes through methods on [`SessionState`]; each one records
//! which parts changed so the UI glue can repaint after
//! [`SessionState::drain_changes`]. Network calls never happen here: the
//! session hands out tickets, the glue performs the call and feeds the
//! result back, and stale results are recognised by generation, revision
//! or sequence number.

use crate::config::SessionConfig;
use crate::constants::MAX_POINTS;
use crate::coordinator::{RenderCoordinator, RenderIntent, RenderOutcome, RenderTicket};
use crate::error::{CalibError, DomainError, ServiceError, ValidationError};
use crate::geometry::{fit_contain, DrawOp, SourceRect};
use crate::notify::{Change, Changes};
use crate::orientation::{Axis, OrientationControls, OrientationParams};
use crate::points::{CalibrationPoint, PointCollector};
use crate::protocol::{ForecastRequest, RenderedView, SegmentRequest, SkyMask, UploadAccepted};
use crate::selection::{classify_with, derive_rect, Classification, Hemisphere, Selection, SourceImage};
use crate::wizard::{precondition, Gate, StepIndicator, Wizard, WizardStep};
use instant::Instant;
use std::time::Duration;

/// Correlation tokens of the active upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadSession {
    pub upload_id: String,
    pub upload_url: String,
}

/// Pending left/right choice for an undecided dual image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HemispherePrompt {
    pub left: SourceRect,
    pub right: SourceRect,
}

impl HemispherePrompt {
    /// Contain-fit preview ops for the left and right preview surfaces.
    pub fn previews(
        &self,
        left_size: (u32, u32),
        right_size: (u32, u32),
    ) -> Result<(Vec<DrawOp>, Vec<DrawOp>), DomainError> {
        Ok((
            fit_contain(left_size.0, left_size.1, self.left)?,
            fit_contain(right_size.0, right_size.1, self.right)?,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    Entered(WizardStep),
    /// The user has to pick a hemisphere first; see [`SessionState::resolve_prompt`].
    ChooseHemisphere(HemispherePrompt),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SegmentTicket {
    pub generation: u64,
    pub revision: u64,
    pub request: SegmentRequest,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForecastTicket {
    pub generation: u64,
    pub request: ForecastRequest,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CallOutcome<T> {
    Applied(T),
    Failed(ServiceError),
    /// The session moved on (new upload, or points changed) while the call
    /// was out.
    Stale,
}

/// Enablement of every control, derived from engine state only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Controls {
    pub next_from_upload: bool,
    pub next_from_orient: bool,
    pub next_from_aperture: bool,
    pub clear_points: bool,
    pub segment: bool,
    pub forecast: bool,
    pub rendering_badge: bool,
    pub points_hint: String,
}

#[derive(Debug)]
struct CallState<T> {
    in_flight: bool,
    last: Option<Result<T, ServiceError>>,
}

impl<T> Default for CallState<T> {
    fn default() -> Self {
        Self {
            in_flight: false,
            last: None,
        }
    }
}

impl<T> CallState<T> {
    fn reset(&mut self) {
        self.in_flight = false;
        self.last = None;
    }
}

pub struct SessionState {
    config: SessionConfig,
    generation: u64,
    upload: Option<UploadSession>,
    selection: Option<Selection>,
    points: PointCollector,
    orientation: OrientationControls,
    wizard: Wizard,
    render: RenderCoordinator,
    prompt: Option<HemispherePrompt>,
    segmentation: CallState<SkyMask>,
    forecast: CallState<serde_json::Value>,
    changes: Changes,
}

impl SessionState {
    pub fn new(config: SessionConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let orientation = OrientationControls::new(config.azimuth, config.zenith, config.roll);
        let render = RenderCoordinator::new(config.render_debounce);
        Ok(Self {
            config,
            generation: 0,
            upload: None,
            selection: None,
            points: PointCollector::new(),
            orientation,
            wizard: Wizard::new(),
            render,
            prompt: None,
            segmentation: CallState::default(),
            forecast: CallState::default(),
            changes: Changes::empty(),
        })
    }

    // ---------------- Accessors ----------------

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn upload(&self) -> Option<&UploadSession> {
        self.upload.as_ref()
    }

    pub fn view_id(&self) -> Option<&str> {
        self.render.view_id()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.selection
            .as_ref()
            .map(Selection::hemisphere)
            .unwrap_or_default()
    }

    /// Derived source rectangle; `None` without an image or while undecided.
    pub fn current_rect(&self) -> Option<SourceRect> {
        self.selection.as_ref().and_then(Selection::rect)
    }

    /// What both display surfaces show.
    pub fn display_rect(&self) -> Option<SourceRect> {
        self.selection.as_ref().map(Selection::display_rect)
    }

    pub fn points(&self) -> &PointCollector {
        &self.points
    }

    pub fn orientation(&self) -> OrientationParams {
        self.orientation.params()
    }

    pub fn orientation_controls(&self) -> &OrientationControls {
        &self.orientation
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn current_step(&self) -> WizardStep {
        self.wizard.current()
    }

    pub fn max_reached(&self) -> WizardStep {
        self.wizard.max_reached()
    }

    pub fn indicators(&self) -> [StepIndicator; 4] {
        self.wizard.indicators()
    }

    pub fn render(&self) -> &RenderCoordinator {
        &self.render
    }

    pub fn prompt(&self) -> Option<&HemispherePrompt> {
        self.prompt.as_ref()
    }

    pub fn sky_mask(&self) -> Option<&SkyMask> {
        self.segmentation.last.as_ref().and_then(|r| r.as_ref().ok())
    }

    pub fn forecast_result(&self) -> Option<&Result<serde_json::Value, ServiceError>> {
        self.forecast.last.as_ref()
    }

    pub fn drain_changes(&mut self) -> Changes {
        std::mem::take(&mut self.changes)
    }

    fn mark(&mut self, c: Change) {
        self.changes.insert(c);
    }

    // ---------------- Upload lifecycle ----------------

    /// Atomic reset for a new upload. Returns the new generation, which
    /// the caller passes back with the upload and decode results.
    pub fn begin_upload(&mut self) -> u64 {
        self.generation += 1;
        self.upload = None;
        self.selection = None;
        self.points.clear();
        self.orientation.reset();
        self.wizard.reset();
        self.render.reset();
        self.prompt = None;
        self.segmentation.reset();
        self.forecast.reset();
        for c in Change::ALL {
            self.mark(c);
        }
        log::info!("[session] upload generation {} started", self.generation);
        self.generation
    }

    fn check_generation(&self, generation: u64) -> Result<(), ValidationError> {
        if generation != self.generation {
            return Err(ValidationError::StaleUpload {
                got: generation,
                current: self.generation,
            });
        }
        Ok(())
    }

    pub fn upload_completed(
        &mut self,
        generation: u64,
        result: Result<UploadAccepted, ServiceError>,
    ) -> Result<&UploadSession, CalibError> {
        self.check_generation(generation)?;
        let accepted = result?;
        log::info!("[session] upload accepted id={}", accepted.upload_id);
        self.mark(Change::Session);
        let session = self.upload.insert(UploadSession {
            upload_id: accepted.upload_id,
            upload_url: accepted.upload_url,
        });
        Ok(&*session)
    }

    /// Install the decoded image of the active upload, classify it and
    /// schedule the first render.
    pub fn image_loaded(
        &mut self,
        now: Instant,
        generation: u64,
        width: u32,
        height: u32,
    ) -> Result<Classification, CalibError> {
        self.check_generation(generation)?;
        if self.upload.is_none() {
            return Err(ValidationError::NoUpload.into());
        }
        let image = SourceImage::new(width, height)?;
        let class = classify_with(&image, self.config.dual_ratio_min, self.config.dual_ratio_max);
        log::info!(
            "[session] image {}x{} ratio={:.3} dual={}",
            width,
            height,
            class.ratio,
            class.dual
        );
        self.selection = Some(Selection::for_image(image, class));
        self.mark(Change::Selection);
        self.mark(Change::Step);
        self.schedule_render(now);
        Ok(class)
    }

    // ---------------- Navigation ----------------

    fn gate(&self) -> Gate {
        Gate {
            has_image: self.selection.is_some(),
            hemisphere_decided: self.hemisphere().is_decided(),
            render_ready: self.upload.is_some() && self.render.is_ready(),
            points_complete: self.points.is_complete(),
        }
    }

    /// Whether the forward control of `step` is enabled. On Upload only a
    /// decoded image is needed: an open hemisphere choice is asked for by
    /// [`advance`](Self::advance) itself.
    pub fn forward_allowed_from(&self, step: WizardStep) -> bool {
        let gate = self.gate();
        match step {
            WizardStep::Upload => gate.has_image,
            other => precondition(other, &gate).is_ok(),
        }
    }

    pub fn is_forward_allowed(&self) -> bool {
        self.forward_allowed_from(self.wizard.current())
    }

    pub fn advance(&mut self, now: Instant) -> Result<Advance, ValidationError> {
        let current = self.wizard.current();
        if current == WizardStep::Upload {
            let Some(selection) = self.selection.as_mut() else {
                log::debug!("[wizard] advance rejected: no image");
                return Err(ValidationError::PreconditionUnmet(current));
            };
            if !selection.hemisphere().is_decided() {
                if selection.classification().dual {
                    let prompt = self.open_prompt()?;
                    return Ok(Advance::ChooseHemisphere(prompt));
                }
                // not dual: nothing to ask, lock to the whole frame
                selection
                    .set_hemisphere(Hemisphere::Full)
                    .map_err(|_| ValidationError::PreconditionUnmet(current))?;
                self.mark(Change::Selection);
            }
        }
        self.enter_next(now).map(Advance::Entered)
    }

    fn open_prompt(&mut self) -> Result<HemispherePrompt, ValidationError> {
        let image = *self
            .selection
            .as_ref()
            .ok_or(ValidationError::NoImage)?
            .image();
        let rects = derive_rect(&image, Hemisphere::Left).and_then(|l| {
            derive_rect(&image, Hemisphere::Right).map(|r| (l, r))
        });
        let (left, right) = rects.map_err(|_| ValidationError::PreconditionUnmet(WizardStep::Upload))?;
        let prompt = HemispherePrompt { left, right };
        self.prompt = Some(prompt);
        self.mark(Change::Prompt);
        log::debug!("[wizard] hemisphere choice requested");
        Ok(prompt)
    }

    fn enter_next(&mut self, now: Instant) -> Result<WizardStep, ValidationError> {
        let current = self.wizard.current();
        if let Err(e) = precondition(current, &self.gate()) {
            log::debug!("[wizard] advance from {:?} rejected: {}", current, e);
            return Err(e);
        }
        let entered = self.wizard.enter_next()?;
        self.mark(Change::Step);
        log::info!(
            "[wizard] {:?} -> {:?} (max {:?})",
            current,
            entered,
            self.wizard.max_reached()
        );
        if entered == WizardStep::Orient {
            self.schedule_render(now);
        }
        Ok(entered)
    }

    /// Answer the pending hemisphere choice. `None` cancels and leaves
    /// everything as it was. A committed choice continues the advance out
    /// of Upload when that is where the prompt came from.
    pub fn resolve_prompt(
        &mut self,
        now: Instant,
        choice: Option<Hemisphere>,
    ) -> Result<Option<WizardStep>, CalibError> {
        if self.prompt.is_none() {
            return Err(ValidationError::NoPendingPrompt.into());
        }
        let Some(hemisphere) = choice else {
            self.prompt = None;
            self.mark(Change::Prompt);
            log::debug!("[wizard] hemisphere choice cancelled");
            return Ok(None);
        };
        // a bad value keeps the prompt open
        self.set_hemisphere(now, hemisphere)?;
        self.prompt = None;
        self.mark(Change::Prompt);
        if self.wizard.current() == WizardStep::Upload {
            return Ok(Some(self.enter_next(now)?));
        }
        Ok(None)
    }

    /// Jump back to an already-visited step (step indicator click).
    pub fn retreat(&mut self, to: WizardStep) -> Result<(), ValidationError> {
        self.wizard.retreat(to).inspect_err(|e| {
            log::debug!("[wizard] retreat rejected: {}", e);
        })?;
        self.mark(Change::Step);
        Ok(())
    }

    pub fn retreat_to(&mut self, n: u8) -> Result<(), ValidationError> {
        let to = WizardStep::from_number(n).ok_or(ValidationError::IllegalRetreat {
            from: self.wizard.current(),
            to: self.wizard.current(),
        })?;
        self.retreat(to)
    }

    /// Back button: one step back, no-op on the first step.
    pub fn back(&mut self) -> bool {
        let moved = self.wizard.back();
        if moved {
            self.mark(Change::Step);
        }
        moved
    }

    // ---------------- Selection ----------------

    /// Commit a hemisphere. Switching halves invalidates any collected
    /// points since they were placed on the other half.
    pub fn set_hemisphere(
        &mut self,
        now: Instant,
        hemisphere: Hemisphere,
    ) -> Result<SourceRect, CalibError> {
        let selection = self.selection.as_mut().ok_or(ValidationError::NoImage)?;
        let changed = selection.set_hemisphere(hemisphere)?;
        let rect = selection.display_rect();
        log::info!("[selection] hemisphere={} rect={:?}", hemisphere, rect);
        self.mark(Change::Selection);
        if changed && !self.points.is_empty() {
            self.points.clear();
            self.mark(Change::Points);
        }
        self.schedule_render(now);
        Ok(rect)
    }

    // ---------------- Orientation ----------------

    /// Set one axis from either of its widgets; returns the clamped value
    /// both widgets must display.
    pub fn set_axis(&mut self, now: Instant, axis: Axis, value: i64) -> i32 {
        let (v, _) = self.orientation.set(axis, value);
        self.mark(Change::Orientation);
        self.schedule_render(now);
        v
    }

    pub fn nudge_axis(&mut self, now: Instant, axis: Axis, delta: i32) -> i32 {
        let (v, _) = self.orientation.nudge(axis, delta);
        self.mark(Change::Orientation);
        self.schedule_render(now);
        v
    }

    // ---------------- Points ----------------

    /// Click on the aperture surface. Accepted only on the Aperture step.
    pub fn add_point(
        &mut self,
        px: f64,
        py: f64,
        width: u32,
        height: u32,
    ) -> Result<usize, CalibError> {
        if self.upload.is_none() {
            return Err(ValidationError::NoUpload.into());
        }
        let step = self.wizard.current();
        if step != WizardStep::Aperture {
            return Err(ValidationError::PreconditionUnmet(step).into());
        }
        let count = self.points.add_point(px, py, width, height).inspect_err(|e| {
            log::debug!("[points] rejected ({:.1},{:.1}): {}", px, py, e);
        })?;
        self.mark(Change::Points);
        Ok(count)
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
        self.mark(Change::Points);
    }

    // ---------------- Render coordination ----------------

    fn schedule_render(&mut self, now: Instant) {
        if self.upload.is_none() {
            return;
        }
        self.render.schedule(
            now,
            RenderIntent {
                orientation: self.orientation.params(),
                hemisphere: self.hemisphere(),
            },
        );
        self.mark(Change::Render);
    }

    /// How long until a scheduled render is due.
    pub fn render_wait(&self, now: Instant) -> Option<Duration> {
        self.render.remaining(now)
    }

    /// Issue the debounced render if due.
    pub fn poll_render(&mut self, now: Instant) -> Option<RenderTicket> {
        let upload_id = self.upload.as_ref()?.upload_id.clone();
        let ticket = self.render.poll(now, &upload_id)?;
        self.mark(Change::Render);
        Some(ticket)
    }

    pub fn complete_render(
        &mut self,
        seq: u64,
        result: Result<RenderedView, ServiceError>,
    ) -> RenderOutcome {
        let outcome = self.render.complete(seq, result);
        if outcome != RenderOutcome::Superseded {
            self.mark(Change::Render);
            self.mark(Change::Step);
        }
        if let RenderOutcome::Applied(view) = &outcome {
            log::info!("[render] view {} applied (seq={})", view.view_id, seq);
        }
        outcome
    }

    // ---------------- Segmentation / forecast ----------------

    pub fn segment_request(&mut self) -> Result<SegmentTicket, ValidationError> {
        let upload = self.upload.as_ref().ok_or(ValidationError::NoUpload)?;
        if !self.points.is_complete() {
            return Err(ValidationError::IncompletePoints {
                needed: MAX_POINTS,
                have: self.points.len(),
            });
        }
        let request = SegmentRequest {
            upload_id: upload.upload_id.clone(),
            points: self.points.as_slice().to_vec(),
            hemisphere: self.hemisphere().wire(),
        };
        self.segmentation.in_flight = true;
        self.mark(Change::Segmentation);
        Ok(SegmentTicket {
            generation: self.generation,
            revision: self.points.revision(),
            request,
        })
    }

    pub fn complete_segment(
        &mut self,
        ticket: &SegmentTicket,
        result: Result<SkyMask, ServiceError>,
    ) -> CallOutcome<SkyMask> {
        if ticket.generation != self.generation {
            return CallOutcome::Stale;
        }
        self.segmentation.in_flight = false;
        self.mark(Change::Segmentation);
        if ticket.revision != self.points.revision() {
            log::warn!("[segment] points changed while segmenting; result dropped");
            return CallOutcome::Stale;
        }
        self.segmentation.last = Some(result.clone());
        match result {
            Ok(mask) => CallOutcome::Applied(mask),
            Err(e) => {
                log::warn!("[segment] failed: {}", e);
                CallOutcome::Failed(e)
            }
        }
    }

    pub fn forecast_request(&mut self) -> Result<ForecastTicket, ValidationError> {
        let upload = self.upload.as_ref().ok_or(ValidationError::NoUpload)?;
        let o = self.orientation.params();
        let request = ForecastRequest {
            upload_id: upload.upload_id.clone(),
            azimuth: o.azimuth,
            zenith: o.zenith,
            roll: o.roll,
            points: self.points.as_slice().to_vec(),
            hemisphere: self.hemisphere().wire(),
        };
        self.forecast.in_flight = true;
        self.mark(Change::Forecast);
        Ok(ForecastTicket {
            generation: self.generation,
            request,
        })
    }

    /// Forecast failures are recorded but never block anything.
    pub fn complete_forecast(
        &mut self,
        ticket: &ForecastTicket,
        result: Result<serde_json::Value, ServiceError>,
    ) -> CallOutcome<serde_json::Value> {
        if ticket.generation != self.generation {
            return CallOutcome::Stale;
        }
        self.forecast.in_flight = false;
        self.forecast.last = Some(result.clone());
        self.mark(Change::Forecast);
        match result {
            Ok(v) => CallOutcome::Applied(v),
            Err(e) => {
                log::warn!("[forecast] failed: {}", e);
                CallOutcome::Failed(e)
            }
        }
    }

    // ---------------- Derived UI state ----------------

    pub fn controls(&self) -> Controls {
        let n = self.points.len();
        Controls {
            next_from_upload: self.forward_allowed_from(WizardStep::Upload),
            next_from_orient: self.forward_allowed_from(WizardStep::Orient),
            next_from_aperture: self.forward_allowed_from(WizardStep::Aperture),
            clear_points: n > 0,
            segment: self.upload.is_some()
                && self.points.is_complete()
                && !self.segmentation.in_flight,
            forecast: self.upload.is_some() && !self.forecast.in_flight,
            rendering_badge: self.render.is_scheduled() || self.render.is_in_flight(),
            points_hint: format!("Click {MAX_POINTS} points ({n}/{MAX_POINTS})"),
        }
    }

    /// Points in insertion order, as forwarded to the services.
    pub fn point_list(&self) -> &[CalibrationPoint] {
        self.points.as_slice()
    }
}
