//! This crate implements a minimal, content-addressed version-control
//! storage engine: an object store, a tree codec that snapshots and
//! materializes working directories, a reference layer with symbolic
//! indirection, and a single-parent commit graph.

pub mod diff;
pub mod object;
pub mod repo;

#[cfg(test)]
pub(crate) mod test_support;
