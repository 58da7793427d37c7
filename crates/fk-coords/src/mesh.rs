use fk_core::{Error, MeshShape, Stream, Tensor, TensorViewMut, check_dim};
use rayon::prelude::*;

/// Fills `out` with the pixel-index mesh of a `width x height` image.
///
/// Cell `(y, x)` holds `(x, y)` exactly, with no normalization or offset.
pub fn create_coords_grid(
    out: &mut TensorViewMut<'_, MeshShape>,
    width: usize,
    height: usize,
    stream: &Stream,
) -> Result<(), Error> {
    let shape = out.shape();
    check_dim("coords grid width", width, shape.width)?;
    check_dim("coords grid height", height, shape.height)?;

    tracing::debug!(width, height, "create_coords_grid");

    stream.install(|| {
        out.as_mut_slice()
            .par_chunks_exact_mut(2)
            .enumerate()
            .with_min_len(stream.min_len())
            .for_each(|(i, cell)| {
                cell[0] = (i % width) as f32;
                cell[1] = (i / width) as f32;
            })
    });

    Ok(())
}

/// Allocating form of [`create_coords_grid`].
pub fn coords_grid(
    width: usize,
    height: usize,
    stream: &Stream,
) -> Result<Tensor<MeshShape>, Error> {
    let mut out = Tensor::zeros(MeshShape::new(width, height))?;
    create_coords_grid(&mut out.as_view_mut(), width, height, stream)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use fk_core::{Error, MeshShape, Stream, TensorViewMut};

    use super::{coords_grid, create_coords_grid};

    #[test]
    fn mesh_holds_pixel_indices() {
        let (w, h) = (4usize, 3usize);
        let mut data = vec![f32::NAN; w * h * 2];
        let mut out = TensorViewMut::from_slice_mut(MeshShape::new(w, h), &mut data).expect("out");
        create_coords_grid(&mut out, w, h, &Stream::default()).expect("ok");

        for y in 0..h {
            for x in 0..w {
                let idx = (y * w + x) * 2;
                assert_eq!(data[idx], x as f32);
                assert_eq!(data[idx + 1], y as f32);
            }
        }
        // (x, y) = (2, 1)
        assert_eq!(&data[12..14], &[2.0, 1.0]);
    }

    #[test]
    fn mesh_matches_across_streams() {
        let small_splits = Stream::new(&fk_core::StreamConfig {
            num_threads: 4,
            min_len: 1,
            ..Default::default()
        })
        .expect("pool");
        let a = coords_grid(37, 23, &small_splits).expect("ok");
        let b = coords_grid(37, 23, &Stream::default()).expect("ok");
        assert_eq!(a, b);
        assert_eq!(&a.data()[a.data().len() - 2..], &[36.0, 22.0]);
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let mut data = vec![0.0f32; 24];
        let mut out = TensorViewMut::from_slice_mut(MeshShape::new(4, 3), &mut data).expect("out");
        let err = create_coords_grid(&mut out, 3, 4, &Stream::default());
        assert!(matches!(
            err,
            Err(Error::ShapeMismatch {
                what: "coords grid width",
                expected: 3,
                actual: 4
            })
        ));
    }
}
