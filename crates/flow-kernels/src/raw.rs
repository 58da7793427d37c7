//! Flat-buffer entry points with explicit integer dimensions.
//!
//! These mirror the language-neutral kernel signatures: plain `f32` slices
//! plus `i32` extents. Dimensions are validated eagerly (negative values and
//! size mismatches are invalid arguments) and then forwarded to the typed
//! kernels. Use [`status`] to turn a result into the integer status
//! convention, where `0` is success.

use fk_core::{
    Error, GridShape, ImageShape, MeshShape, PointsShape, STATUS_SUCCESS, Stream, TensorView,
    TensorViewMut, check_dim,
};

/// Integer status of a kernel call: `0` on success, the error's code otherwise.
pub fn status(result: &Result<(), Error>) -> i32 {
    match result {
        Ok(()) => STATUS_SUCCESS,
        Err(e) => e.status_code(),
    }
}

/// `grid_sample(image, grid, output, N, C, H_in, W_in, H_out, W_out)`.
#[allow(clippy::too_many_arguments)]
pub fn grid_sample(
    image: &[f32],
    grid: &[f32],
    output: &mut [f32],
    n: i32,
    c: i32,
    h_in: i32,
    w_in: i32,
    h_out: i32,
    w_out: i32,
    stream: Option<&Stream>,
) -> Result<(), Error> {
    let n = dim("N", n)?;
    let c = dim("C", c)?;
    let src = ImageShape::new(n, c, dim("H_in", h_in)?, dim("W_in", w_in)?);
    let (h_out, w_out) = (dim("H_out", h_out)?, dim("W_out", w_out)?);

    let image = TensorView::from_slice(src, image)?;
    let grid = TensorView::from_slice(GridShape::new(n, h_out, w_out), grid)?;
    let mut out = TensorViewMut::from_slice_mut(ImageShape::new(n, c, h_out, w_out), output)?;

    with_stream(stream, |s| fk_sample::grid_sample(&image, &grid, &mut out, s))
}

/// `broadcast_add(coords, coords_len, delta, delta_len, repeat, W, H, output)`.
///
/// `delta` holds `repeat` stacked `H x W` lattices, so `delta_len` must equal
/// `repeat * H * W`. The output is `(coords_len, repeat * H, W, 2)`.
#[allow(clippy::too_many_arguments)]
pub fn broadcast_add(
    coords: &[f32],
    coords_len: i32,
    delta: &[f32],
    delta_len: i32,
    repeat: i32,
    w: i32,
    h: i32,
    output: &mut [f32],
    stream: Option<&Stream>,
) -> Result<(), Error> {
    let len = dim("coords_len", coords_len)?;
    let delta_len = dim("delta_len", delta_len)?;
    let repeat = dim("repeat", repeat)?;
    let w = dim("W", w)?;
    let h = dim("H", h)?;

    let rows = repeat.checked_mul(h).ok_or(Error::ShapeOverflow)?;
    let lattice = MeshShape::new(w, rows);
    check_dim(
        "delta_len",
        lattice.cells().ok_or(Error::ShapeOverflow)?,
        delta_len,
    )?;

    let coords = TensorView::from_slice(PointsShape::new(len), coords)?;
    let delta = TensorView::from_slice(lattice, delta)?;
    let mut out = TensorViewMut::from_slice_mut(GridShape::new(len, rows, w), output)?;

    with_stream(stream, |s| {
        fk_coords::broadcast_add(&coords, &delta, &mut out, s)
    })
}

/// `create_delta(delta_out, radius, stream)`.
pub fn create_delta(
    delta_out: &mut [f32],
    radius: i32,
    stream: Option<&Stream>,
) -> Result<(), Error> {
    let radius = dim("radius", radius)?;
    let lattice = MeshShape::lattice(radius).ok_or(Error::ShapeOverflow)?;
    let mut out = TensorViewMut::from_slice_mut(lattice, delta_out)?;

    with_stream(stream, |s| fk_coords::create_delta(&mut out, radius, s))
}

/// `create_coords_grid(coords_out, width, height)`.
pub fn create_coords_grid(
    coords_out: &mut [f32],
    width: i32,
    height: i32,
    stream: Option<&Stream>,
) -> Result<(), Error> {
    let width = dim("width", width)?;
    let height = dim("height", height)?;
    let mut out = TensorViewMut::from_slice_mut(MeshShape::new(width, height), coords_out)?;

    with_stream(stream, |s| {
        fk_coords::create_coords_grid(&mut out, width, height, s)
    })
}

fn dim(what: &'static str, value: i32) -> Result<usize, Error> {
    usize::try_from(value).map_err(|_| Error::NegativeDimension {
        what,
        value: i64::from(value),
    })
}

fn with_stream<F>(stream: Option<&Stream>, op: F) -> Result<(), Error>
where
    F: FnOnce(&Stream) -> Result<(), Error>,
{
    match stream {
        Some(s) => op(s),
        None => op(&Stream::default()),
    }
}

#[cfg(test)]
mod tests {
    use fk_core::{Error, STATUS_INVALID_ARGUMENT, Stream};

    use super::{broadcast_add, create_coords_grid, create_delta, grid_sample, status};

    #[test]
    fn grid_sample_status_is_zero_on_success() {
        let input: Vec<f32> = (0..16).map(|v| v as f32).collect();
        let grid = [-1.0f32, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
        let mut output = [0.0f32; 4];

        let res = grid_sample(&input, &grid, &mut output, 1, 1, 4, 4, 2, 2, None);
        assert_eq!(status(&res), 0);
        assert_eq!(output, [0.0, 3.0, 12.0, 15.0]);
    }

    #[test]
    fn grid_sample_rejects_short_buffers() {
        let input = [0.0f32; 15];
        let grid = [0.0f32; 8];
        let mut output = [0.0f32; 4];

        let res = grid_sample(&input, &grid, &mut output, 1, 1, 4, 4, 2, 2, None);
        assert!(matches!(
            res,
            Err(Error::SizeMismatch {
                what: "image",
                expected: 16,
                actual: 15
            })
        ));
        assert_eq!(status(&res), STATUS_INVALID_ARGUMENT);
    }

    #[test]
    fn broadcast_add_checks_delta_len_against_lattice() {
        let coords = [0.0f32; 8];
        let delta = [0.0f32; 18];
        let mut output = [0.0f32; 72];

        let ok = broadcast_add(&coords, 4, &delta, 9, 1, 3, 3, &mut output, None);
        assert!(ok.is_ok());
        assert!(output.iter().all(|&v| v == 1.0));

        let bad = broadcast_add(&coords, 4, &delta, 8, 1, 3, 3, &mut output, None);
        assert!(matches!(
            bad,
            Err(Error::ShapeMismatch {
                what: "delta_len",
                expected: 9,
                actual: 8
            })
        ));
    }

    #[test]
    fn broadcast_add_with_repeated_lattices() {
        let coords = [1.0f32, 2.0];
        let delta = [0.0f32, 0.0, 1.0, 1.0];
        let mut output = [0.0f32; 4];

        let stream = Stream::with_threads(2).expect("pool");
        broadcast_add(&coords, 1, &delta, 2, 2, 1, 1, &mut output, Some(&stream)).expect("ok");
        assert_eq!(output, [2.0, 3.0, 3.0, 4.0]);
    }

    #[test]
    fn negative_radius_is_an_invalid_argument() {
        let mut out = [0.0f32; 2];
        let res = create_delta(&mut out, -1, None);
        assert!(matches!(
            res,
            Err(Error::NegativeDimension {
                what: "radius",
                value: -1
            })
        ));
        assert_eq!(status(&res), STATUS_INVALID_ARGUMENT);
    }

    #[test]
    fn create_delta_and_coords_grid_fill_buffers() {
        let mut delta = [0.0f32; 18];
        create_delta(&mut delta, 1, None).expect("ok");
        assert_eq!(&delta[0..2], &[-1.0, -1.0]);
        assert_eq!(&delta[8..10], &[0.0, 0.0]);
        assert_eq!(&delta[16..18], &[1.0, 1.0]);

        let mut coords = [0.0f32; 24];
        create_coords_grid(&mut coords, 4, 3, None).expect("ok");
        assert_eq!(&coords[12..14], &[2.0, 1.0]);
        assert_eq!(&coords[22..24], &[3.0, 2.0]);

        let res = create_coords_grid(&mut coords, -4, 3, None);
        assert!(matches!(res, Err(Error::NegativeDimension { .. })));
    }
}
