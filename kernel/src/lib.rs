//! Gridwalk Kernel: grid primitives and deterministic proof helpers.
//!
//! # Module Dependency Direction
//!
//! `grid` and `proof` are independent of each other.
//!
//! `grid` owns cell coordinates and the Manhattan metric. `proof` owns the
//! single canonical JSON encoder and the single content-hashing function.
//! Nothing in the kernel performs search; that lives in `gridwalk_search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod grid;
pub mod proof;
