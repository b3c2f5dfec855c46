//! Integration test crate for reelkit.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on every reelkit crate to verify they work together.

#[cfg(test)]
mod composition;

#[cfg(test)]
mod project;

#[cfg(test)]
mod media;
