// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search driver: from a seed to a recorded match.
//!
//! The driver ties together the three collaborators of a search: the
//! candidate stream (through [`SweepEngine`]), the [`ArtifactOracle`], and
//! the [`MatchLog`]. A driver holds no per-search state, so the same driver
//! can run any number of independent sweeps, one after another or (for a
//! `Sync` oracle and log) concurrently. The match log is the only thing
//! sweeps share.
//!
//! # Example
//!
//! ```
//! use keyspace_explorer::driver::SearchDriver;
//! use keyspace_explorer::matchlog::MemoryMatchLog;
//! use keyspace_explorer::oracle::HexOracle;
//! use num_bigint::BigInt;
//!
//! // With the hex oracle, seed 0 produces the artifact "1000000000000000000" first.
//! let driver = SearchDriver::new(HexOracle, "1000000000000000000", MemoryMatchLog::new());
//! let record = driver.search(&BigInt::from(0)).unwrap().unwrap();
//! assert_eq!(record.to_string(), "1000000000000000000 -> 1000000000000000000");
//! assert_eq!(driver.log().len(), 1);
//! ```

use crate::engine::{CancelToken, SweepEngine, SweepOutcome};
use crate::matchlog::{MatchLog, MatchLogError, MatchRecord};
use crate::oracle::{ArtifactOracle, OracleError};
use num_bigint::{BigInt, BigUint};
use thiserror::Error;
use tracing::{error, info};

/// Errors surfaced by a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A match was found but could not be appended to the log. The record is
    /// not durable until a later [`SearchDriver::record`] succeeds.
    #[error("match {record} was not recorded: {source}")]
    LogAppend {
        record: MatchRecord,
        #[source]
        source: MatchLogError,
    },
}

impl SearchError {
    /// The match that triggered the error, if any.
    pub fn unrecorded_match(&self) -> Option<&MatchRecord> {
        match self {
            SearchError::LogAppend { record, .. } => Some(record),
        }
    }
}

/// Runs candidate sweeps against a fixed target artifact.
#[derive(Debug)]
pub struct SearchDriver<O, L> {
    oracle: O,
    target: String,
    log: L,
}

impl<O: ArtifactOracle, L: MatchLog> SearchDriver<O, L> {
    pub fn new(oracle: O, target: impl Into<String>, log: L) -> Self {
        Self {
            oracle,
            target: target.into(),
            log,
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// A fresh, resumable sweep over the candidates of `seed`.
    pub fn sweep(&self, seed: &BigInt) -> SweepEngine {
        SweepEngine::new(seed.clone())
    }

    /// Sweep every candidate of `seed`, stopping at the first match.
    ///
    /// Returns the recorded match, or `None` if no candidate matched.
    pub fn search(&self, seed: &BigInt) -> Result<Option<MatchRecord>, SearchError> {
        // No budget and a private token: the sweep runs to a match or to the end.
        match self.sweep(seed).search(self, None, &CancelToken::new())? {
            SweepOutcome::Matched { record, .. } => Ok(Some(record)),
            SweepOutcome::Exhausted(_)
            | SweepOutcome::Suspended(_)
            | SweepOutcome::Cancelled(_) => Ok(None),
        }
    }

    /// Query the oracle once for `candidate` and compare against the target.
    pub fn evaluate(&self, candidate: &BigUint) -> Result<Option<MatchRecord>, OracleError> {
        let artifact = self.oracle.artifact(candidate)?;
        if artifact == self.target {
            Ok(Some(MatchRecord::new(candidate.clone(), artifact)))
        } else {
            Ok(None)
        }
    }

    /// Append `record` to the match log.
    pub fn record(&self, record: &MatchRecord) -> Result<(), SearchError> {
        match self.log.append(record) {
            Ok(()) => {
                info!(scalar = %format!("{:x}", record.scalar), artifact = %record.artifact, "match found");
                Ok(())
            }
            Err(source) => {
                error!(scalar = %format!("{:x}", record.scalar), "failed to record match: {}", source);
                Err(SearchError::LogAppend {
                    record: record.clone(),
                    source,
                })
            }
        }
    }
}
