use core::fmt;

use crate::Error;

/// Describes the extents of a flat, row-major f32 buffer.
pub trait Shape: Copy + PartialEq + fmt::Debug {
    /// Buffer name used in error messages.
    const NAME: &'static str;

    /// Number of f32 scalars, or `None` when the product overflows.
    fn num_elements(&self) -> Option<usize>;

    fn checked_len(&self) -> Result<usize, Error> {
        self.num_elements().ok_or(Error::ShapeOverflow)
    }
}

/// Image tensor extents `(N, C, H, W)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageShape {
    pub batch: usize,
    pub channels: usize,
    pub height: usize,
    pub width: usize,
}

impl ImageShape {
    pub fn new(batch: usize, channels: usize, height: usize, width: usize) -> Self {
        Self {
            batch,
            channels,
            height,
            width,
        }
    }

    /// Elements in one `(H, W)` plane.
    pub fn plane_len(&self) -> usize {
        self.height * self.width
    }

    /// Flat offset of `(n, c, y, x)`.
    #[inline]
    pub fn offset(&self, n: usize, c: usize, y: usize, x: usize) -> usize {
        ((n * self.channels + c) * self.height + y) * self.width + x
    }
}

impl Shape for ImageShape {
    const NAME: &'static str = "image";

    fn num_elements(&self) -> Option<usize> {
        self.batch
            .checked_mul(self.channels)?
            .checked_mul(self.height)?
            .checked_mul(self.width)
    }
}

/// Coordinate-pair grid extents `(N, H, W, 2)`.
///
/// Sampling grids and broadcast outputs share this layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridShape {
    pub batch: usize,
    pub height: usize,
    pub width: usize,
}

impl GridShape {
    pub fn new(batch: usize, height: usize, width: usize) -> Self {
        Self {
            batch,
            height,
            width,
        }
    }

    /// Number of coordinate pairs.
    pub fn points(&self) -> Option<usize> {
        self.batch.checked_mul(self.height)?.checked_mul(self.width)
    }
}

impl Shape for GridShape {
    const NAME: &'static str = "grid";

    fn num_elements(&self) -> Option<usize> {
        self.points()?.checked_mul(2)
    }
}

/// Single coordinate-pair mesh `(H, W, 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshShape {
    pub height: usize,
    pub width: usize,
}

impl MeshShape {
    pub fn new(width: usize, height: usize) -> Self {
        Self { height, width }
    }

    /// Square `(2r+1, 2r+1)` lattice for a neighborhood of radius `r`.
    pub fn lattice(radius: usize) -> Option<Self> {
        let size = radius.checked_mul(2)?.checked_add(1)?;
        Some(Self {
            height: size,
            width: size,
        })
    }

    pub fn cells(&self) -> Option<usize> {
        self.height.checked_mul(self.width)
    }
}

impl Shape for MeshShape {
    const NAME: &'static str = "mesh";

    fn num_elements(&self) -> Option<usize> {
        self.cells()?.checked_mul(2)
    }
}

/// A flat list of `len` coordinate pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointsShape {
    pub len: usize,
}

impl PointsShape {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Shape for PointsShape {
    const NAME: &'static str = "points";

    fn num_elements(&self) -> Option<usize> {
        self.len.checked_mul(2)
    }
}

#[cfg(test)]
mod tests {
    use super::{GridShape, ImageShape, MeshShape, PointsShape, Shape};

    #[test]
    fn image_offsets_are_row_major_nchw() {
        let s = ImageShape::new(2, 3, 4, 5);
        assert_eq!(s.num_elements(), Some(120));
        assert_eq!(s.plane_len(), 20);
        assert_eq!(s.offset(0, 0, 0, 0), 0);
        assert_eq!(s.offset(0, 0, 1, 0), 5);
        assert_eq!(s.offset(0, 1, 0, 0), 20);
        assert_eq!(s.offset(1, 0, 0, 0), 60);
        assert_eq!(s.offset(1, 2, 3, 4), 119);
    }

    #[test]
    fn pair_shapes_count_two_scalars_per_point() {
        assert_eq!(GridShape::new(4, 3, 3).num_elements(), Some(72));
        assert_eq!(MeshShape::new(4, 3).num_elements(), Some(24));
        assert_eq!(PointsShape::new(4).num_elements(), Some(8));
    }

    #[test]
    fn lattice_is_square_and_odd() {
        assert_eq!(MeshShape::lattice(0), Some(MeshShape::new(1, 1)));
        assert_eq!(MeshShape::lattice(2), Some(MeshShape::new(5, 5)));
        assert_eq!(MeshShape::lattice(usize::MAX), None);
    }

    #[test]
    fn overflow_is_reported() {
        let s = ImageShape::new(usize::MAX, 2, 1, 1);
        assert_eq!(s.num_elements(), None);
        assert!(s.checked_len().is_err());
    }
}
