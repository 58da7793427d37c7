use fk_core::Padding;

/// One `(H, W)` plane of an image tensor.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Plane<'a> {
    pub data: &'a [f32],
    pub width: usize,
    pub height: usize,
}

impl Plane<'_> {
    /// Pixel at `(x, y)` after padding resolution; `None` if masked out.
    #[inline]
    fn tap(&self, x: isize, y: isize, padding: Padding) -> Option<f32> {
        let xi = padding.resolve(x, self.width)?;
        let yi = padding.resolve(y, self.height)?;
        self.data.get(yi * self.width + xi).copied()
    }
}

/// Bilinear sample at pixel coordinate `(x, y)`.
///
/// Corners rejected by `padding` drop out of the sum rather than being
/// substituted. Terms are accumulated in the fixed order
/// `(x0,y0), (x1,y0), (x0,y1), (x1,y1)`. A non-finite coordinate samples
/// nothing and yields `0.0` under every padding policy.
#[inline]
pub(crate) fn sample_bilinear(plane: &Plane<'_>, x: f32, y: f32, padding: Padding) -> f32 {
    if !x.is_finite() || !y.is_finite() {
        return 0.0;
    }

    let x0f = x.floor();
    let y0f = y.floor();
    let wx = x - x0f;
    let wy = y - y0f;

    let x0 = x0f as isize;
    let y0 = y0f as isize;
    let x1 = x0.saturating_add(1);
    let y1 = y0.saturating_add(1);

    let w00 = (1.0 - wx) * (1.0 - wy);
    let w10 = wx * (1.0 - wy);
    let w01 = (1.0 - wx) * wy;
    let w11 = wx * wy;

    let mut acc = 0.0f32;
    acc += term(plane.tap(x0, y0, padding), w00);
    acc += term(plane.tap(x1, y0, padding), w10);
    acc += term(plane.tap(x0, y1, padding), w01);
    acc += term(plane.tap(x1, y1, padding), w11);
    acc
}

/// Nearest-neighbor sample, rounding half away from zero.
#[inline]
pub(crate) fn sample_nearest(plane: &Plane<'_>, x: f32, y: f32, padding: Padding) -> f32 {
    if !x.is_finite() || !y.is_finite() {
        return 0.0;
    }
    let xi = x.round() as isize;
    let yi = y.round() as isize;
    plane.tap(xi, yi, padding).unwrap_or(0.0)
}

#[inline]
fn term(value: Option<f32>, weight: f32) -> f32 {
    match value {
        Some(v) => v * weight,
        None => 0.0,
    }
}
