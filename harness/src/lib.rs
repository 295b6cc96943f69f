//! Gridwalk Harness: concrete maps and run packaging for the search core.
//!
//! The harness does NOT implement search logic; it delegates to
//! `gridwalk_search`. It supplies an in-memory map provider, fixture worlds,
//! and the runner that turns one search into a digest-bound report.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod grid_map;
pub mod logging;
pub mod report;
pub mod report_dir;
pub mod runner;
pub mod worlds;
