//! Proof module: canonical JSON bytes and domain-separated content hashing.

pub mod canon;
pub mod hash;
pub mod hash_domain;
