//! Shared helpers for the lock tests.

pub mod oracle;
pub mod path_checks;
