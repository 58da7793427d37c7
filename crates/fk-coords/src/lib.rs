//! Coordinate-field generators for dense correspondence lookups.
//!
//! A typical pipeline builds a pixel mesh with [`create_coords_grid`], a local
//! offset lattice with [`create_delta`], expands every mesh point into its
//! neighborhood with [`broadcast_add`], and finally maps the result to
//! normalized coordinates with [`normalize_coords`] for grid sampling.
//!
//! Pairs are stored `(x, y)`. All generators write caller-owned buffers and
//! dispatch one rayon work item per output pair.
//!
//! [`broadcast_add`] adds [`BROADCAST_BIAS`] to every output. Consumers that
//! need raw sums subtract it.

mod broadcast;
mod delta;
mod mesh;
mod normalize;

pub use broadcast::{BROADCAST_BIAS, broadcast, broadcast_add};
pub use delta::{create_delta, delta_lattice};
pub use mesh::{coords_grid, create_coords_grid};
pub use normalize::normalize_coords;
