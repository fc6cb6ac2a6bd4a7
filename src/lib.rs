// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exact exploration of a large integer keyspace.
//!
//! A one-dimensional canvas shows a sub-interval of a keyspace far wider than
//! any machine word (by default `[2^72, 2^73)`). Every pixel resolves to an
//! exact integer seed, and every seed expands into a fixed, ordered batch of
//! candidate scalars that are checked against a target artifact.
//!
//! # Architecture
//!
//! Leaves first:
//!
//! - [`keyspace`]: the immutable [`ExactRange`].
//! - [`viewport`]: the [`Viewport`], exact rational `[start, end]` with pan,
//!   zoom and pixel mapping.
//! - [`transform`]: the candidate stream, a four-stage state machine
//!   (invert, reverse, rotate, nibble) over a 72-bit pattern.
//! - [`oracle`]: the [`ArtifactOracle`] capability that maps a scalar to an
//!   artifact.
//! - [`matchlog`]: append-only storage for [`MatchRecord`]s.
//! - [`engine`]: the resumable, cancellable [`SweepEngine`].
//! - [`driver`]: the [`SearchDriver`], `search(seed)` for one seed.
//! - [`session`]: the [`ExplorerSession`] that owns the viewport and turns
//!   pointer, wheel and drag events into preemptable sweeps.
//! - [`scanner`]: concurrent sweeps over many seeds.
//!
//! # Exactness
//!
//! No binary floating point is involved in any value that becomes an
//! integer. Viewport ends are `BigRational`s, and every pixel lookup is
//! recomputed from them, so the mapping cannot drift however many pan and
//! zoom operations are applied.
//!
//! # Example
//!
//! ```
//! use keyspace_explorer::{ExactRange, ExplorerSession, SearchDriver, Viewport};
//! use keyspace_explorer::matchlog::MemoryMatchLog;
//! use keyspace_explorer::oracle::HexOracle;
//!
//! let viewport = Viewport::new(ExactRange::default(), 800).unwrap();
//! let driver = SearchDriver::new(HexOracle, "1000000000000000000", MemoryMatchLog::new());
//! let mut session = ExplorerSession::new(viewport, driver);
//!
//! session.pointer_moved(0);
//! let record = session.run_pending().unwrap().unwrap();
//! assert_eq!(format!("{:x}", record.scalar), "1000000000000000000");
//! ```

pub mod config;
pub mod driver;
pub mod engine;
pub mod keyspace;
pub mod matchlog;
pub mod oracle;
pub mod scanner;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod transform;
pub mod viewport;

// Re-export commonly used types
pub use driver::{SearchDriver, SearchError};
pub use engine::{CancelToken, SweepEngine, SweepOutcome};
pub use keyspace::ExactRange;
pub use matchlog::MatchRecord;
pub use oracle::ArtifactOracle;
pub use session::ExplorerSession;
pub use transform::{generate, CandidateStream};
pub use viewport::Viewport;
