// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Runtime configuration.
//!
//! Only the values that vary per run live here. The transformation width
//! and stage counts are compile-time constants in
//! [`transform::constants`](crate::transform::constants).

use crate::keyspace::ExactRange;
use crate::session::DEFAULT_SWEEP_CHUNK;
use crate::viewport::{Viewport, ViewportError};
use std::path::PathBuf;

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;

/// Default target artifact.
pub const DEFAULT_TARGET: &str = "12VVRNPi4SJqUTsp6FmqDqY5sGosDtysn4";

/// Default match log file name.
pub const DEFAULT_MATCH_LOG: &str = "found.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    pub range: ExactRange,
    pub canvas_width: u32,
    pub target: String,
    pub match_log: PathBuf,
    /// Candidates evaluated per session tick.
    pub sweep_chunk: usize,
}

impl ExplorerConfig {
    /// A full-range viewport for this configuration.
    pub fn viewport(&self) -> Result<Viewport, ViewportError> {
        Viewport::new(self.range.clone(), self.canvas_width)
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            range: ExactRange::default(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            target: String::from(DEFAULT_TARGET),
            match_log: PathBuf::from(DEFAULT_MATCH_LOG),
            sweep_chunk: DEFAULT_SWEEP_CHUNK,
        }
    }
}
