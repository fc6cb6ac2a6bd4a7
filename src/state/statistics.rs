// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Each sweep owns a `Statistics` value and increments it as candidates are
//! evaluated. Scanners merge the per-sweep values into a total.

use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{AsRefStr, EnumCount as EnumCountMacro, EnumIter};

#[derive(EnumCountMacro, EnumIter, AsRefStr, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// Candidates taken from the stream and handed to the oracle.
    Candidates,
    /// Candidates skipped because the oracle failed.
    OracleFailures,
    Matches,
    /// Times a sweep stopped because its budget ran out.
    Suspensions,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment_counter(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// Add every counter of `other` into this one.
    pub fn merge(&mut self, other: &Statistics) {
        for (mine, theirs) in self.stats.iter_mut().zip(other.stats.iter()) {
            *mine += theirs;
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for counter in Counters::iter() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}={}", counter.as_ref(), self.get(counter))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_and_merge() {
        let mut a = Statistics::new();
        a.increment_counter(Counters::Candidates);
        a.increment_counter(Counters::Candidates);
        let mut b = Statistics::new();
        b.increment_counter(Counters::Matches);
        b.increment_counter(Counters::Candidates);
        a.merge(&b);
        assert_eq!(a.get(Counters::Candidates), 3);
        assert_eq!(a.get(Counters::Matches), 1);
        assert_eq!(a.get(Counters::OracleFailures), 0);
    }

    #[test]
    fn test_display() {
        let mut stats = Statistics::new();
        stats.increment_counter(Counters::Suspensions);
        assert_eq!(
            stats.to_string(),
            "Candidates=0, OracleFailures=0, Matches=0, Suspensions=1"
        );
    }
}
