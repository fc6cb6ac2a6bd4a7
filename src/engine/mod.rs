// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Resumable sweep engine.
//!
//! A [`SweepEngine`] walks the candidate stream of one seed, queries the
//! driver's oracle once per candidate, and stops at the first match. It can
//! also stop early in two ways:
//!
//! 1. **Budget**: after evaluating `budget` candidates the engine returns
//!    [`SweepOutcome::Suspended`] with itself inside, ready to resume exactly
//!    where it stopped.
//! 2. **Cancellation**: a [`CancelToken`] is checked before every candidate.
//!    A cancelled sweep reports what it evaluated so far and is consumed.
//!
//! Both checks happen between candidates, so a candidate is either fully
//! evaluated (oracle called, artifact compared) or not touched at all; a
//! partial evaluation can never be reported as a match.
//!
//! # Example
//!
//! ```
//! use keyspace_explorer::driver::SearchDriver;
//! use keyspace_explorer::engine::{CancelToken, SweepEngine, SweepOutcome};
//! use keyspace_explorer::matchlog::MemoryMatchLog;
//! use keyspace_explorer::oracle::HexOracle;
//! use num_bigint::BigInt;
//!
//! let driver = SearchDriver::new(HexOracle, "no such artifact", MemoryMatchLog::new());
//! let cancel = CancelToken::new();
//!
//! // Evaluate the sweep in chunks of 1000 candidates.
//! let mut engine = SweepEngine::new(BigInt::from(42));
//! let mut chunks = 0;
//! loop {
//!     match engine.search(&driver, Some(1000), &cancel).unwrap() {
//!         SweepOutcome::Suspended(resumed) => {
//!             chunks += 1;
//!             engine = resumed;
//!         }
//!         SweepOutcome::Exhausted(_) => break,
//!         other => panic!("unexpected {:?}", other),
//!     }
//! }
//! assert_eq!(chunks, 4);
//! ```

use crate::driver::{SearchDriver, SearchError};
use crate::matchlog::{MatchLog, MatchRecord};
use crate::oracle::ArtifactOracle;
use crate::state::statistics::{Counters, Statistics};
use crate::transform::CandidateStream;
use num_bigint::BigInt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared flag used to stop a sweep from another thread or event handler.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// How a call to [`SweepEngine::search`] ended.
#[derive(Debug)]
pub enum SweepOutcome {
    /// A candidate matched and the match was appended to the log.
    Matched {
        record: MatchRecord,
        statistics: Statistics,
    },

    /// Every candidate was evaluated without a match.
    Exhausted(Statistics),

    /// The budget ran out. The engine can be resumed by calling `search` again.
    Suspended(SweepEngine),

    /// The cancel token was set before the sweep finished.
    Cancelled(Statistics),
}

impl SweepOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, SweepOutcome::Matched { .. })
    }
}

/// Sweep state for one seed.
#[derive(Debug, Clone)]
pub struct SweepEngine {
    seed: BigInt,
    candidates: CandidateStream,
    statistics: Statistics,
}

impl SweepEngine {
    pub fn new(seed: BigInt) -> Self {
        let candidates = CandidateStream::new(&seed);
        Self::from_parts(seed, candidates)
    }

    /// Sweep over `width`-bit patterns instead of the default width.
    pub fn with_width(seed: BigInt, width: u32) -> Self {
        let candidates = CandidateStream::with_width(&seed, width);
        Self::from_parts(seed, candidates)
    }

    fn from_parts(seed: BigInt, candidates: CandidateStream) -> Self {
        Self {
            seed,
            candidates,
            statistics: Statistics::new(),
        }
    }

    pub fn seed(&self) -> &BigInt {
        &self.seed
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Candidates not yet evaluated.
    pub fn remaining(&self) -> usize {
        self.candidates.len()
    }

    /// Run the sweep until it matches, exhausts, spends `budget` candidates,
    /// or sees `cancel` set.
    ///
    /// Consumes the engine. Only a suspended sweep hands it back, so a
    /// finished sweep cannot be resumed by mistake.
    ///
    /// Oracle failures are logged and counted, and the candidate is skipped.
    /// A failure to append a match to the log is returned as
    /// [`SearchError::LogAppend`], carrying the record that was not stored.
    pub fn search<O: ArtifactOracle, L: MatchLog>(
        mut self,
        driver: &SearchDriver<O, L>,
        budget: Option<usize>,
        cancel: &CancelToken,
    ) -> Result<SweepOutcome, SearchError> {
        let mut evaluated = 0usize;
        loop {
            if cancel.is_cancelled() {
                debug!(seed = %format!("{:#x}", self.seed), remaining = self.remaining(), "sweep cancelled");
                return Ok(SweepOutcome::Cancelled(self.statistics));
            }
            if self.candidates.len() == 0 {
                return Ok(SweepOutcome::Exhausted(self.statistics));
            }
            if budget.map_or(false, |limit| evaluated >= limit) {
                self.statistics.increment_counter(Counters::Suspensions);
                return Ok(SweepOutcome::Suspended(self));
            }
            let bits = (self.candidates.emitted() == 0).then(|| self.candidates.bit_string());
            let Some(candidate) = self.candidates.next() else {
                return Ok(SweepOutcome::Exhausted(self.statistics));
            };
            if let Some(bits) = bits {
                debug!(
                    seed = %format!("{:#x}", self.seed),
                    %bits,
                    first = %format!("{:x}", candidate),
                    "starting sweep"
                );
            }
            evaluated += 1;
            self.statistics.increment_counter(Counters::Candidates);

            match driver.evaluate(&candidate) {
                Ok(Some(record)) => {
                    self.statistics.increment_counter(Counters::Matches);
                    driver.record(&record)?;
                    return Ok(SweepOutcome::Matched {
                        record,
                        statistics: self.statistics,
                    });
                }
                Ok(None) => {}
                Err(err) => {
                    self.statistics.increment_counter(Counters::OracleFailures);
                    warn!(oracle = driver.oracle().name(), "skipping candidate: {}", err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchlog::MemoryMatchLog;
    use crate::oracle::{FnOracle, HexOracle, OracleError};
    use num_bigint::BigUint;

    fn hex_driver(target: &str) -> SearchDriver<HexOracle, MemoryMatchLog> {
        SearchDriver::new(HexOracle, target, MemoryMatchLog::new())
    }

    #[test]
    fn test_exhausts_without_match() {
        let driver = hex_driver("nothing");
        let outcome = SweepEngine::with_width(BigInt::from(5), 8)
            .search(&driver, None, &CancelToken::new())
            .unwrap();
        match outcome {
            SweepOutcome::Exhausted(stats) => assert_eq!(stats.get(Counters::Candidates), 512),
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert!(driver.log().is_empty());
    }

    #[test]
    fn test_first_match_stops_sweep() {
        // Width 8, seed 0xab: third candidate is 0x1cd.
        let driver = hex_driver("1cd");
        let outcome = SweepEngine::with_width(BigInt::from(0xab), 8)
            .search(&driver, None, &CancelToken::new())
            .unwrap();
        match outcome {
            SweepOutcome::Matched { record, statistics } => {
                assert_eq!(record.scalar, BigUint::from(0x1cdu32));
                assert_eq!(statistics.get(Counters::Candidates), 3);
                assert_eq!(statistics.get(Counters::Matches), 1);
            }
            other => panic!("expected match, got {:?}", other),
        }
        assert_eq!(driver.log().len(), 1);
    }

    #[test]
    fn test_budget_suspends_and_resumes() {
        let driver = hex_driver("nothing");
        let cancel = CancelToken::new();
        let engine = SweepEngine::with_width(BigInt::from(5), 8);
        let engine = match engine.search(&driver, Some(500), &cancel).unwrap() {
            SweepOutcome::Suspended(engine) => engine,
            other => panic!("expected suspension, got {:?}", other),
        };
        assert_eq!(engine.remaining(), 12);
        assert_eq!(engine.statistics().get(Counters::Suspensions), 1);
        match engine.search(&driver, Some(500), &cancel).unwrap() {
            SweepOutcome::Exhausted(stats) => {
                assert_eq!(stats.get(Counters::Candidates), 512);
                assert_eq!(stats.get(Counters::Suspensions), 1);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sweep_start_logs_first_candidate() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let driver = hex_driver("nothing");
        tracing::subscriber::with_default(subscriber, || {
            SweepEngine::with_width(BigInt::from(0xab), 8)
                .search(&driver, Some(20), &CancelToken::new())
                .unwrap();
        });

        let output = String::from_utf8(capture.0.lock().clone()).unwrap();
        assert_eq!(output.matches("starting sweep").count(), 1);
        assert!(output.contains("bits=10101011"), "{}", output);
        assert!(output.contains("first=1ab"), "{}", output);
    }

    #[test]
    fn test_cancel_before_start() {
        let driver = hex_driver("1ab");
        let cancel = CancelToken::new();
        cancel.cancel();
        let outcome = SweepEngine::with_width(BigInt::from(0xab), 8)
            .search(&driver, None, &cancel)
            .unwrap();
        match outcome {
            SweepOutcome::Cancelled(stats) => assert_eq!(stats.get(Counters::Candidates), 0),
            other => panic!("expected cancellation, got {:?}", other),
        }
        assert!(driver.log().is_empty());
    }

    #[test]
    fn test_oracle_failures_are_skipped() {
        let oracle = FnOracle(|s: &BigUint| -> Result<String, OracleError> {
            if s.bit(0) {
                Err(OracleError::rejected(s, "odd"))
            } else {
                Ok(format!("{:x}", s))
            }
        });
        let driver = SearchDriver::new(oracle, "nothing", MemoryMatchLog::new());
        let outcome = SweepEngine::with_width(BigInt::from(0), 4)
            .search(&driver, None, &CancelToken::new())
            .unwrap();
        match outcome {
            SweepOutcome::Exhausted(stats) => {
                assert_eq!(stats.get(Counters::Candidates), 256);
                assert_eq!(stats.get(Counters::OracleFailures), 128);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }
}
