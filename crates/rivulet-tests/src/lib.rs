//! Property and scenario test suite for Rivulet coin selection.
//!
//! This crate holds integration tests that drive the selection algorithms
//! through their public API only, checking the selection invariants under
//! randomized pools, requests and seeds.

pub mod helpers;
