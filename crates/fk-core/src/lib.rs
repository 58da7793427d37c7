//! Foundational types for the flow-kernels workspace.
//!
//! ## Buffers and Shapes
//! All data lives in flat, row-major, contiguous `f32` buffers. A buffer is
//! paired with a shape value object ([`ImageShape`], [`GridShape`],
//! [`MeshShape`], [`PointsShape`]) and wrapped in a [`TensorView`] or
//! [`TensorViewMut`]. Construction checks the exact element count, so shape
//! errors surface before any parallel work is dispatched.
//!
//! ## Coordinate Convention
//! Normalized coordinates in `[-1, 1]` map to pixel coordinates with
//! align-corners semantics: `p = (g + 1) * (dim - 1) / 2`. Coordinate pairs
//! are stored `(x, y)`, x selecting the column.
//!
//! ## Streams
//! Kernels take a [`Stream`], a handle on the rayon pool that runs their work
//! items. The default stream uses rayon's global pool.

mod error;
mod geom;
mod padding;
mod shape;
mod stream;
mod tensor;

pub use error::{
    Error, ErrorKind, STATUS_INVALID_ARGUMENT, STATUS_RUNTIME, STATUS_SUCCESS, check_dim,
};
pub use geom::{Point2f, Vec2f};
pub use padding::Padding;
pub use shape::{GridShape, ImageShape, MeshShape, PointsShape, Shape};
pub use stream::{DEFAULT_MIN_LEN, Stream, StreamConfig};
pub use tensor::{Tensor, TensorView, TensorViewMut};

/// Maps a normalized coordinate onto pixel space of an axis with `dim` pixels.
#[inline]
pub fn unnormalize(g: f32, dim: usize) -> f32 {
    (g + 1.0) * (dim as f32 - 1.0) / 2.0
}

/// Inverse of [`unnormalize`]. A single-pixel axis maps to `0.0`.
#[inline]
pub fn normalize(p: f32, dim: usize) -> f32 {
    if dim <= 1 {
        return 0.0;
    }
    p * 2.0 / (dim as f32 - 1.0) - 1.0
}
