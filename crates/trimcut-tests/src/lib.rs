//! Integration test crate for TrimCut.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the trimcut crates to verify they work together.

#[cfg(test)]
mod engine;

#[cfg(test)]
mod pipeline;
