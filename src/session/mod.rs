// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Interactive exploration session.
//!
//! An [`ExplorerSession`] is the single owner of the viewport. Every pointer,
//! wheel and drag handler goes through `&mut self`, so there is exactly one
//! writer and no ambient global state.
//!
//! # Sweep discipline
//!
//! Sweeps are preemptable. A pointer move never runs a sweep inline: it
//! resolves the seed under the pointer and installs a new pending sweep,
//! dropping (and cancelling) whichever sweep was in flight. The host event
//! loop then calls [`ExplorerSession::tick`] when idle; each tick evaluates
//! at most `sweep_chunk` candidates and returns, so input handling is never
//! blocked for a whole sweep. [`ExplorerSession::search_at`] remains for
//! callers that want a synchronous sweep.

pub mod event;

pub use event::{parse_script, Event, EventParseError, WheelDirection};

use crate::driver::{SearchDriver, SearchError};
use crate::engine::{CancelToken, SweepEngine, SweepOutcome};
use crate::matchlog::{MatchLog, MatchRecord};
use crate::oracle::ArtifactOracle;
use crate::state::statistics::Statistics;
use crate::viewport::{ScaleMarker, Viewport, ZoomInfo};
use num_bigint::BigInt;
use tracing::debug;

/// Default number of candidates evaluated per tick.
pub const DEFAULT_SWEEP_CHUNK: usize = 512;

/// Where a drag began, and the viewport at that moment.
///
/// Drag updates are applied to this snapshot rather than to the live
/// viewport, so a long drag never accumulates per-event offsets.
#[derive(Debug, Clone)]
struct DragAnchor {
    pixel: i64,
    viewport: Viewport,
}

/// Result of one [`ExplorerSession::tick`].
#[derive(Debug)]
pub enum TickOutcome {
    /// No sweep is pending.
    Idle,
    /// The pending sweep yielded with candidates left.
    Pending { remaining: usize },
    Matched(MatchRecord),
    Exhausted { seed: BigInt, statistics: Statistics },
    Cancelled { seed: BigInt, statistics: Statistics },
}

/// What a scripted [`Event`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResponse {
    /// The pointer moved; a sweep for `seed` is now pending.
    Moved { pixel: i64, seed: BigInt },
    /// The viewport changed (zoom, pan or drag).
    ViewChanged(ZoomInfo),
    /// Zoom state requested by an `info` event.
    Info(ZoomInfo),
    /// The event had no effect (e.g. a drag update with no drag in progress).
    Ignored,
}

pub struct ExplorerSession<O, L> {
    viewport: Viewport,
    driver: SearchDriver<O, L>,
    sweep_chunk: usize,
    drag: Option<DragAnchor>,
    pending: Option<SweepEngine>,
    cancel: CancelToken,
}

impl<O: ArtifactOracle, L: MatchLog> ExplorerSession<O, L> {
    pub fn new(viewport: Viewport, driver: SearchDriver<O, L>) -> Self {
        Self {
            viewport,
            driver,
            sweep_chunk: DEFAULT_SWEEP_CHUNK,
            drag: None,
            pending: None,
            cancel: CancelToken::new(),
        }
    }

    /// Set the number of candidates evaluated per tick (at least 1).
    pub fn with_sweep_chunk(mut self, sweep_chunk: usize) -> Self {
        self.sweep_chunk = sweep_chunk.max(1);
        self
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn driver(&self) -> &SearchDriver<O, L> {
        &self.driver
    }

    /// Token of the sweep currently pending; cancelling it stops that sweep.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn has_pending_sweep(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn value_at(&self, pixel: i64) -> BigInt {
        self.viewport.value_at(pixel)
    }

    pub fn zoom_info(&self) -> ZoomInfo {
        self.viewport.zoom_info()
    }

    pub fn scale_markers(&self, count: u32) -> Vec<ScaleMarker> {
        self.viewport.scale_markers(count)
    }

    /// Resolve the seed under `pixel` and make it the pending sweep,
    /// preempting any sweep still in flight.
    pub fn pointer_moved(&mut self, pixel: i64) -> BigInt {
        let seed = self.viewport.value_at(pixel);
        self.preempt();
        self.pending = Some(self.driver.sweep(&seed));
        seed
    }

    /// Drop the pending sweep, if any.
    pub fn preempt(&mut self) {
        if let Some(previous) = self.pending.take() {
            debug!(
                seed = %format!("{:#x}", previous.seed()),
                remaining = previous.remaining(),
                "preempting sweep"
            );
        }
        self.cancel.cancel();
        self.cancel = CancelToken::new();
    }

    /// Evaluate up to one chunk of the pending sweep.
    pub fn tick(&mut self) -> Result<TickOutcome, SearchError> {
        let Some(engine) = self.pending.take() else {
            return Ok(TickOutcome::Idle);
        };
        let seed = engine.seed().clone();
        let outcome = engine.search(&self.driver, Some(self.sweep_chunk), &self.cancel)?;
        Ok(match outcome {
            SweepOutcome::Suspended(engine) => {
                let remaining = engine.remaining();
                self.pending = Some(engine);
                TickOutcome::Pending { remaining }
            }
            SweepOutcome::Matched { record, .. } => TickOutcome::Matched(record),
            SweepOutcome::Exhausted(statistics) => TickOutcome::Exhausted { seed, statistics },
            SweepOutcome::Cancelled(statistics) => TickOutcome::Cancelled { seed, statistics },
        })
    }

    /// Tick until the pending sweep finishes.
    pub fn run_pending(&mut self) -> Result<Option<MatchRecord>, SearchError> {
        loop {
            match self.tick()? {
                TickOutcome::Pending { .. } => continue,
                TickOutcome::Matched(record) => return Ok(Some(record)),
                TickOutcome::Idle
                | TickOutcome::Exhausted { .. }
                | TickOutcome::Cancelled { .. } => return Ok(None),
            }
        }
    }

    /// Synchronously sweep the seed under `pixel`, preempting any pending sweep.
    pub fn search_at(&mut self, pixel: i64) -> Result<Option<MatchRecord>, SearchError> {
        self.preempt();
        let seed = self.viewport.value_at(pixel);
        self.driver.search(&seed)
    }

    pub fn wheel(&mut self, direction: WheelDirection, pixel: i64) {
        match direction {
            WheelDirection::Up => self.viewport.zoom_in(pixel),
            WheelDirection::Down => self.viewport.zoom_out(pixel),
        }
    }

    pub fn pan(&mut self, delta_pixels: i64) {
        self.viewport.pan(delta_pixels);
    }

    pub fn drag_start(&mut self, pixel: i64) {
        self.drag = Some(DragAnchor {
            pixel: self.viewport.clamp_pixel(pixel),
            viewport: self.viewport.clone(),
        });
    }

    /// Move the viewport so the value grabbed at drag start follows the pointer.
    ///
    /// Returns `false` when no drag is in progress.
    pub fn drag_to(&mut self, pixel: i64) -> bool {
        let Some(anchor) = &self.drag else {
            return false;
        };
        let pixel = anchor.viewport.clamp_pixel(pixel);
        let mut viewport = anchor.viewport.clone();
        viewport.pan(anchor.pixel - pixel);
        self.viewport = viewport;
        true
    }

    pub fn drag_end(&mut self) {
        self.drag = None;
    }

    /// Apply one scripted event.
    pub fn apply(&mut self, event: Event) -> EventResponse {
        match event {
            Event::Move(pixel) => {
                let seed = self.pointer_moved(pixel);
                EventResponse::Moved { pixel, seed }
            }
            Event::Wheel(direction, pixel) => {
                self.wheel(direction, pixel);
                EventResponse::ViewChanged(self.zoom_info())
            }
            Event::Press(pixel) => {
                self.drag_start(pixel);
                EventResponse::Ignored
            }
            Event::Drag(pixel) => {
                if self.drag_to(pixel) {
                    EventResponse::ViewChanged(self.zoom_info())
                } else {
                    EventResponse::Ignored
                }
            }
            Event::Release => {
                self.drag_end();
                EventResponse::Ignored
            }
            Event::Pan(delta) => {
                self.pan(delta);
                EventResponse::ViewChanged(self.zoom_info())
            }
            Event::Info => EventResponse::Info(self.zoom_info()),
        }
    }
}
