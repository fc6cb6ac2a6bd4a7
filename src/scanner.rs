// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Background batch scanning.
//!
//! A [`BatchScanner`] sweeps many seeds at once on the rayon thread pool.
//! Sweeps for different seeds are independent; the only shared state is
//! the oracle (which must be `Sync`) and the match log (whose appends are
//! serialised by the log itself). A failure for one seed is collected in
//! the report and does not stop the others.

use crate::driver::{SearchDriver, SearchError};
use crate::engine::{CancelToken, SweepOutcome};
use crate::matchlog::{MatchLog, MatchRecord};
use crate::oracle::ArtifactOracle;
use crate::state::statistics::Statistics;
use crate::viewport::Viewport;
use num_bigint::BigInt;
use rayon::prelude::*;
use tracing::info;

/// Summary of one scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub seeds_scanned: usize,
    /// Counters merged over every sweep.
    pub statistics: Statistics,
    pub matches: Vec<MatchRecord>,
    pub failures: Vec<(BigInt, SearchError)>,
    /// Seeds whose sweeps were stopped by the cancel token.
    pub cancelled: usize,
}

pub struct BatchScanner<'a, O, L> {
    driver: &'a SearchDriver<O, L>,
    cancel: CancelToken,
}

impl<'a, O, L> BatchScanner<'a, O, L>
where
    O: ArtifactOracle + Sync,
    L: MatchLog + Sync,
{
    pub fn new(driver: &'a SearchDriver<O, L>) -> Self {
        Self {
            driver,
            cancel: CancelToken::new(),
        }
    }

    /// Use `cancel` to stop every sweep of the scan.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Sweep every seed in `seeds`, each to its first match or to the end.
    pub fn scan(&self, seeds: &[BigInt]) -> ScanReport {
        let outcomes: Vec<(BigInt, Result<SweepOutcome, SearchError>)> = seeds
            .par_iter()
            .map(|seed| {
                let outcome = self.driver.sweep(seed).search(self.driver, None, &self.cancel);
                (seed.clone(), outcome)
            })
            .collect();

        let mut report = ScanReport {
            seeds_scanned: seeds.len(),
            ..ScanReport::default()
        };
        for (seed, outcome) in outcomes {
            match outcome {
                Ok(SweepOutcome::Matched { record, statistics }) => {
                    report.statistics.merge(&statistics);
                    report.matches.push(record);
                }
                Ok(SweepOutcome::Exhausted(statistics)) => report.statistics.merge(&statistics),
                Ok(SweepOutcome::Cancelled(statistics)) => {
                    report.statistics.merge(&statistics);
                    report.cancelled += 1;
                }
                Ok(SweepOutcome::Suspended(engine)) => report.statistics.merge(engine.statistics()),
                Err(err) => report.failures.push((seed, err)),
            }
        }
        info!(
            seeds = report.seeds_scanned,
            matches = report.matches.len(),
            failures = report.failures.len(),
            "scan finished: {}",
            report.statistics
        );
        report
    }
}

/// The distinct seeds under every pixel `0..=canvas_width`, ascending.
pub fn pixel_seeds(viewport: &Viewport) -> Vec<BigInt> {
    let mut seeds: Vec<BigInt> = (0..=i64::from(viewport.canvas_width()))
        .map(|pixel| viewport.value_at(pixel))
        .collect();
    seeds.dedup();
    seeds
}
