//! Umbrella crate for the `flow-kernels` workspace.
//!
//! Re-exports the typed kernels from `fk-core`, `fk-sample` and `fk-coords`.
//! The [`raw`] module exposes the same operations over flat slices with
//! explicit integer dimensions and integer status codes.

pub mod raw;

pub use fk_coords::*;
pub use fk_core::*;
pub use fk_sample::*;
