//! Debounced render requests with last-issued-wins reconciliation.
//!
//! Orientation and hemisphere changes are coalesced by a [`Debouncer`].
//! When the quiet period ends the latest intent is issued with a fresh
//! sequence number. Replies are matched by sequence, not by arrival order:
//! only the reply to the most recently issued request is applied.

use crate::debounce::Debouncer;
use crate::error::ServiceError;
use crate::orientation::OrientationParams;
use crate::protocol::{RenderRequest, RenderedView};
use crate::selection::Hemisphere;
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderIntent {
    pub orientation: OrientationParams,
    pub hemisphere: Hemisphere,
}

/// An issued request and the sequence number its reply must carry back.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderTicket {
    pub seq: u64,
    pub request: RenderRequest,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderStatus {
    Idle,
    Scheduled,
    InFlight { seq: u64 },
    Ready { view_id: String },
    Failed(ServiceError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Applied(RenderedView),
    Failed(ServiceError),
    /// A newer request was issued (or the session reset) after this one.
    Superseded,
}

#[derive(Debug)]
pub struct RenderCoordinator {
    debounce: Debouncer<RenderIntent>,
    next_seq: u64,
    latest_issued: Option<u64>,
    in_flight: bool,
    view_id: Option<String>,
    last_error: Option<ServiceError>,
}

impl RenderCoordinator {
    pub fn new(quiet: Duration) -> Self {
        Self {
            debounce: Debouncer::new(quiet),
            next_seq: 1,
            latest_issued: None,
            in_flight: false,
            view_id: None,
            last_error: None,
        }
    }

    /// Forget everything about the previous session. Sequence numbers keep
    /// counting, so replies still on the wire can never match again.
    pub fn reset(&mut self) {
        self.debounce.cancel();
        self.latest_issued = None;
        self.in_flight = false;
        self.view_id = None;
        self.last_error = None;
    }

    /// Replace the pending intent and restart the quiet period.
    pub fn schedule(&mut self, now: Instant, intent: RenderIntent) -> Instant {
        self.debounce.schedule(now, intent)
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.debounce.remaining(now)
    }

    /// Issue the pending intent if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant, upload_id: &str) -> Option<RenderTicket> {
        let intent = self.debounce.poll(now)?;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest_issued = Some(seq);
        self.in_flight = true;
        log::debug!(
            "[render] issue seq={} az={} ze={} roll={} hemi={}",
            seq,
            intent.orientation.azimuth,
            intent.orientation.zenith,
            intent.orientation.roll,
            intent.hemisphere
        );
        Some(RenderTicket {
            seq,
            request: RenderRequest {
                upload_id: upload_id.to_string(),
                azimuth: intent.orientation.azimuth,
                zenith: intent.orientation.zenith,
                roll: intent.orientation.roll,
                hemisphere: intent.hemisphere.wire(),
            },
        })
    }

    pub fn complete(
        &mut self,
        seq: u64,
        result: Result<RenderedView, ServiceError>,
    ) -> RenderOutcome {
        if self.latest_issued != Some(seq) {
            log::warn!(
                "[render] dropping reply seq={} (latest {:?})",
                seq,
                self.latest_issued
            );
            return RenderOutcome::Superseded;
        }
        self.in_flight = false;
        match result {
            Ok(view) => {
                self.view_id = Some(view.view_id.clone());
                self.last_error = None;
                RenderOutcome::Applied(view)
            }
            Err(e) => {
                log::warn!("[render] seq={} failed: {}", seq, e);
                self.last_error = Some(e.clone());
                RenderOutcome::Failed(e)
            }
        }
    }

    pub fn view_id(&self) -> Option<&str> {
        self.view_id.as_deref()
    }

    pub fn last_error(&self) -> Option<&ServiceError> {
        self.last_error.as_ref()
    }

    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.debounce.is_pending()
    }

    #[inline]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// The preview is current: the latest issued request succeeded and no
    /// newer one is waiting or on the wire.
    pub fn is_ready(&self) -> bool {
        self.latest_issued.is_some()
            && !self.in_flight
            && !self.is_scheduled()
            && self.last_error.is_none()
            && self.view_id.is_some()
    }

    pub fn status(&self) -> RenderStatus {
        if self.is_scheduled() {
            return RenderStatus::Scheduled;
        }
        match (self.in_flight, self.latest_issued) {
            (true, Some(seq)) => RenderStatus::InFlight { seq },
            _ => match (&self.last_error, &self.view_id) {
                (Some(e), _) => RenderStatus::Failed(e.clone()),
                (None, Some(v)) if self.latest_issued.is_some() => RenderStatus::Ready {
                    view_id: v.clone(),
                },
                _ => RenderStatus::Idle,
            },
        }
    }
}
