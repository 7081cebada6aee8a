//! Powhash Algorithms - proof-of-work hash routines
//!
//! This crate provides one routine per supported algorithm identifier, each
//! writing a fixed 32-byte digest into a caller-provided output block. The
//! routines keep the native call shapes used by mining pools: a single
//! buffer, a buffer plus scrypt cost parameters, an 80-byte header plus a
//! neoscrypt profile, a buffer plus a cryptonight mode, or a buffer plus a
//! boolberry scratchpad and height.
//!
//! Inputs are borrowed for the duration of the call only.

pub mod algorithms;
pub mod common;
pub mod error;

// Re-export main types
pub use common::stage::Stage;
pub use error::{AlgorithmError, Result};

/// Length of every digest produced by this crate
pub const DIGEST_LEN: usize = 32;

/// Output block written by every routine
pub type Digest = [u8; DIGEST_LEN];
