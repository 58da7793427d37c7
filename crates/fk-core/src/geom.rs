use core::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Point2f {
    /// Reads the `i`-th `(x, y)` pair of a flat pair buffer.
    #[inline]
    pub fn from_pairs(pairs: &[f32], i: usize) -> Self {
        Self {
            x: pairs[2 * i],
            y: pairs[2 * i + 1],
        }
    }

    #[inline]
    pub fn write_to(self, out: &mut [f32]) {
        out[0] = self.x;
        out[1] = self.y;
    }

    /// Shifts both components by the same scalar.
    #[inline]
    pub fn offset(self, d: f32) -> Self {
        Self {
            x: self.x + d,
            y: self.y + d,
        }
    }
}

impl Vec2f {
    #[inline]
    pub fn from_pairs(pairs: &[f32], i: usize) -> Self {
        Self {
            x: pairs[2 * i],
            y: pairs[2 * i + 1],
        }
    }
}

impl Add<Vec2f> for Point2f {
    type Output = Point2f;

    fn add(self, rhs: Vec2f) -> Self::Output {
        Point2f {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
