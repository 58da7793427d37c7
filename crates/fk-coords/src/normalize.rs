use fk_core::{Error, GridShape, Stream, TensorView, TensorViewMut, check_dim, normalize};
use rayon::prelude::*;

/// Maps pixel-space `(x, y)` pairs to normalized align-corners coordinates
/// for an image of `width x height` pixels.
///
/// This is the inverse of the mapping `grid_sample` applies, so a pixel
/// coordinate field can be fed straight into the sampler.
pub fn normalize_coords(
    src: &TensorView<'_, GridShape>,
    out: &mut TensorViewMut<'_, GridShape>,
    width: usize,
    height: usize,
    stream: &Stream,
) -> Result<(), Error> {
    if width == 0 {
        return Err(Error::EmptyDimension { what: "width" });
    }
    if height == 0 {
        return Err(Error::EmptyDimension { what: "height" });
    }
    let s = src.shape();
    let d = out.shape();
    check_dim("normalized batch", s.batch, d.batch)?;
    check_dim("normalized height", s.height, d.height)?;
    check_dim("normalized width", s.width, d.width)?;

    tracing::debug!(width, height, points = ?s.points(), "normalize_coords");

    let src_data = src.as_slice();
    stream.install(|| {
        out.as_mut_slice()
            .par_chunks_exact_mut(2)
            .zip(src_data.par_chunks_exact(2))
            .with_min_len(stream.min_len())
            .for_each(|(dst, p)| {
                dst[0] = normalize(p[0], width);
                dst[1] = normalize(p[1], height);
            })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use fk_core::{Error, GridShape, Stream, Tensor, TensorView, TensorViewMut, unnormalize};

    use super::normalize_coords;

    #[test]
    fn corners_map_to_unit_square() {
        let src_data = [0.0f32, 0.0, 3.0, 0.0, 0.0, 2.0, 3.0, 2.0];
        let src = TensorView::from_slice(GridShape::new(1, 2, 2), &src_data).expect("src");
        let mut out = Tensor::zeros(GridShape::new(1, 2, 2)).expect("out");

        normalize_coords(&src, &mut out.as_view_mut(), 4, 3, &Stream::default()).expect("ok");
        assert_eq!(out.data(), &[-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn round_trips_through_unnormalize() {
        let src_data = [1.25f32, 0.5, 7.0, 3.75];
        let src = TensorView::from_slice(GridShape::new(2, 1, 1), &src_data).expect("src");
        let mut data = vec![0.0f32; 4];
        let mut out =
            TensorViewMut::from_slice_mut(GridShape::new(2, 1, 1), &mut data).expect("out");

        normalize_coords(&src, &mut out, 8, 5, &Stream::default()).expect("ok");
        assert!((unnormalize(data[0], 8) - 1.25).abs() < 1e-5);
        assert!((unnormalize(data[1], 5) - 0.5).abs() < 1e-5);
        assert!((unnormalize(data[2], 8) - 7.0).abs() < 1e-5);
        assert!((unnormalize(data[3], 5) - 3.75).abs() < 1e-5);
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let src_data = [0.0f32; 2];
        let src = TensorView::from_slice(GridShape::new(1, 1, 1), &src_data).expect("src");
        let mut out = Tensor::zeros(GridShape::new(1, 1, 1)).expect("out");
        let err = normalize_coords(&src, &mut out.as_view_mut(), 0, 4, &Stream::default());
        assert!(matches!(err, Err(Error::EmptyDimension { what: "width" })));
    }
}
