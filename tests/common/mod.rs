// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use keyspace_explorer::oracle::{ArtifactOracle, OracleError};
use keyspace_explorer::{ExactRange, Viewport};
use num_bigint::{BigInt, BigUint};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TARGET: &str = "target-artifact";

/// An oracle that produces [`TARGET`] for exactly one scalar and counts calls.
#[derive(Debug)]
pub struct StubOracle {
    hit: BigUint,
    calls: AtomicUsize,
}

impl StubOracle {
    pub fn new(hit: BigUint) -> Self {
        Self {
            hit,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ArtifactOracle for StubOracle {
    fn artifact(&self, scalar: &BigUint) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *scalar == self.hit {
            Ok(TARGET.to_string())
        } else {
            Ok(format!("miss:{:x}", scalar))
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// The full default keyspace on an 800 pixel canvas.
pub fn default_viewport() -> Viewport {
    Viewport::new(ExactRange::default(), 800).unwrap()
}

pub fn hex(text: &str) -> BigInt {
    BigInt::parse_bytes(text.as_bytes(), 16).unwrap()
}

pub fn uhex(text: &str) -> BigUint {
    BigUint::parse_bytes(text.as_bytes(), 16).unwrap()
}
