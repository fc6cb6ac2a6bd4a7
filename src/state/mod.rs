// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Per-sweep bookkeeping.
//!
//! The viewport is owned by the session and the candidate stream by its
//! sweep; what remains here is the counter block every sweep carries.

pub mod statistics;
