//! Data-parallel grid sampling of `(N, C, H, W)` image tensors.
//!
//! Grid entries are normalized `(x, y)` pairs mapped to pixel space with
//! align-corners semantics, so `-1` and `1` land on the first and last pixel
//! centers of each axis.
//!
//! Boundary policy:
//! - [`Padding::Zeros`](fk_core::Padding::Zeros) (default): each of the four
//!   bilinear corners carries a validity mask; out-of-range corners drop out
//!   of the weighted sum instead of being clamped.
//! - `Clamp` and `Reflect101` are available through [`GridSampleConfig`].
//!
//! One rayon work item is dispatched per output scalar. Each output is a pure
//! function of the image and its grid entry, so results do not depend on the
//! stream's thread count.

mod grid;
mod sample;

pub use grid::{
    GridSampleConfig, SampleMode, grid_sample, grid_sample_to_tensor, grid_sample_with,
};
