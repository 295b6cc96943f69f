//! Gridwalk Search: best-first least-cost path search on a weighted grid.
//!
//! This crate depends only on `gridwalk_kernel`. It does NOT depend on
//! `gridwalk_harness`; concrete maps are supplied through [`MapProviderV1`].
//!
//! # Crate dependency graph
//!
//! ```text
//! gridwalk_kernel  ←  gridwalk_search  ←  gridwalk_harness
//! (grid, proof)       (arena, frontier)    (maps, runner, reports)
//! ```
//!
//! # Key types
//!
//! - [`GridNodeV1`] / [`NodeArena`]: position-keyed node records with
//!   index-based parent/child links
//! - [`OpenClosedFrontier`]: open/closed membership and pop-min ordering
//! - [`search::search`]: the best-first driver
//! - [`path::reconstruct_and_mark`]: parent-chain walk and map marking
//! - [`SearchGraphV1`]: expansion audit log
//!
//! [`MapProviderV1`]: contract::MapProviderV1
//! [`GridNodeV1`]: node::GridNodeV1
//! [`NodeArena`]: node::NodeArena
//! [`OpenClosedFrontier`]: frontier::OpenClosedFrontier
//! [`SearchGraphV1`]: graph::SearchGraphV1

#![forbid(unsafe_code)]

pub mod contract;
pub mod cost;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod node;
pub mod path;
pub mod policy;
pub mod search;
pub mod successor;

#[cfg(test)]
mod test_support;
