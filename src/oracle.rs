// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The artifact oracle capability.
//!
//! An oracle turns a candidate scalar into a comparable artifact string. The
//! search core depends only on the [`ArtifactOracle`] trait, so any
//! deterministic function can be plugged in. Two reference oracles are
//! provided for wiring and testing; the production key-derivation oracle
//! lives outside this crate.
//!
//! # Example
//!
//! ```
//! use keyspace_explorer::oracle::{ArtifactOracle, FnOracle, HexOracle, OracleError};
//! use num_bigint::BigUint;
//!
//! let scalar = BigUint::from(0x1abcu32);
//! assert_eq!(HexOracle.artifact(&scalar).unwrap(), "1abc");
//!
//! // Closures are wrapped with `FnOracle`.
//! let even_only = FnOracle(|s: &BigUint| -> Result<String, OracleError> {
//!     if s.bit(0) {
//!         Err(OracleError::rejected(s, "odd scalar"))
//!     } else {
//!         Ok(String::from("even"))
//!     }
//! });
//! assert!(even_only.artifact(&scalar).is_ok());
//! ```

use num_bigint::BigUint;
use sha2::{Digest, Sha256};
use std::fmt::{self, Write};
use thiserror::Error;

/// Failure to produce an artifact for one scalar.
///
/// Oracle failures are never fatal to a sweep: the candidate is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("oracle rejected scalar {scalar:#x}: {reason}")]
    Rejected { scalar: BigUint, reason: String },
}

impl OracleError {
    pub fn rejected(scalar: &BigUint, reason: impl Into<String>) -> Self {
        OracleError::Rejected {
            scalar: scalar.clone(),
            reason: reason.into(),
        }
    }
}

/// A deterministic map from a candidate scalar to an artifact.
///
/// Implementations must be free of observable side effects. Oracles shared
/// across threads by the batch scanner must also be `Sync`.
pub trait ArtifactOracle {
    fn artifact(&self, scalar: &BigUint) -> Result<String, OracleError>;

    /// A name for log messages.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Adapts a plain function or closure into an oracle.
#[derive(Clone, Copy)]
pub struct FnOracle<F>(pub F);

impl<F> ArtifactOracle for FnOracle<F>
where
    F: Fn(&BigUint) -> Result<String, OracleError>,
{
    fn artifact(&self, scalar: &BigUint) -> Result<String, OracleError> {
        (self.0)(scalar)
    }

    fn name(&self) -> &str {
        "fn"
    }
}

impl<F> fmt::Debug for FnOracle<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnOracle")
    }
}

impl<O: ArtifactOracle + ?Sized> ArtifactOracle for Box<O> {
    fn artifact(&self, scalar: &BigUint) -> Result<String, OracleError> {
        (**self).artifact(scalar)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// The scalar itself, as lowercase hex without a prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexOracle;

impl ArtifactOracle for HexOracle {
    fn artifact(&self, scalar: &BigUint) -> Result<String, OracleError> {
        Ok(format!("{:x}", scalar))
    }

    fn name(&self) -> &str {
        "hex"
    }
}

/// Lowercase hex SHA-256 of the scalar's big-endian bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Oracle;

impl ArtifactOracle for Sha256Oracle {
    fn artifact(&self, scalar: &BigUint) -> Result<String, OracleError> {
        let digest = Sha256::digest(scalar.to_bytes_be());
        let mut out = String::with_capacity(digest.len() * 2);
        for byte in digest {
            let _ = write!(out, "{:02x}", byte);
        }
        Ok(out)
    }

    fn name(&self) -> &str {
        "sha256"
    }
}
