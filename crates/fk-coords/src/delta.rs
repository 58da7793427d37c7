use fk_core::{Error, MeshShape, Stream, Tensor, TensorViewMut, check_dim};
use rayon::prelude::*;

/// Fills `out` with the `(2r+1) x (2r+1)` offset lattice centered at the origin.
///
/// Cell `(y, x)` holds `(dx, dy)` with `dx = -r + x * step`,
/// `dy = -r + y * step` and `step = 2r / (size - 1)`, which is `1.0` for
/// every `r > 0`. A zero radius yields the single offset `(0, 0)`.
pub fn create_delta(
    out: &mut TensorViewMut<'_, MeshShape>,
    radius: usize,
    stream: &Stream,
) -> Result<(), Error> {
    let lattice = MeshShape::lattice(radius).ok_or(Error::ShapeOverflow)?;
    let shape = out.shape();
    check_dim("delta lattice width", lattice.width, shape.width)?;
    check_dim("delta lattice height", lattice.height, shape.height)?;

    tracing::debug!(radius, size = lattice.width, "create_delta");

    let size = lattice.width;
    let r = radius as f32;
    let step = if size > 1 {
        2.0 * r / (size - 1) as f32
    } else {
        0.0
    };

    stream.install(|| {
        out.as_mut_slice()
            .par_chunks_exact_mut(2)
            .enumerate()
            .with_min_len(stream.min_len())
            .for_each(|(i, cell)| {
                cell[0] = -r + (i % size) as f32 * step;
                cell[1] = -r + (i / size) as f32 * step;
            })
    });

    Ok(())
}

/// Allocating form of [`create_delta`].
pub fn delta_lattice(radius: usize, stream: &Stream) -> Result<Tensor<MeshShape>, Error> {
    let lattice = MeshShape::lattice(radius).ok_or(Error::ShapeOverflow)?;
    let mut out = Tensor::zeros(lattice)?;
    create_delta(&mut out.as_view_mut(), radius, stream)?;
    Ok(out)
}
