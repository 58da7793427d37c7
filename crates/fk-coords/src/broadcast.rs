use fk_core::{
    Error, GridShape, MeshShape, Point2f, PointsShape, Stream, Tensor, TensorView, TensorViewMut,
    Vec2f, check_dim,
};
use rayon::prelude::*;

/// Constant added to every `broadcast_add` output pair.
///
/// This is part of the output contract, not rounding slack: consumers index
/// the expanded field in a coordinate space shifted by one unit on both axes.
pub const BROADCAST_BIAS: f32 = 1.0;

/// Combines every base coordinate with every lattice delta.
///
/// `coords` holds `N` base points, `delta` an `(H, W)` lattice, and `out`
/// must be `(N, H, W, 2)`. Output pair `(b, k)` is
/// `coords[b] + delta[k] + BROADCAST_BIAS`, laid out batch-major and then
/// row-major over the lattice.
pub fn broadcast_add(
    coords: &TensorView<'_, PointsShape>,
    delta: &TensorView<'_, MeshShape>,
    out: &mut TensorViewMut<'_, GridShape>,
    stream: &Stream,
) -> Result<(), Error> {
    let base = coords.shape();
    let lattice = delta.shape();
    let dst = out.shape();
    check_dim("broadcast batch", base.len, dst.batch)?;
    check_dim("broadcast height", lattice.height, dst.height)?;
    check_dim("broadcast width", lattice.width, dst.width)?;

    let cells = lattice.cells().ok_or(Error::ShapeOverflow)?;
    tracing::debug!(len = base.len, delta_len = cells, "broadcast_add");

    let base_pts = coords.as_slice();
    let delta_pts = delta.as_slice();

    stream.install(|| {
        out.as_mut_slice()
            .par_chunks_exact_mut(2)
            .enumerate()
            .with_min_len(stream.min_len())
            .for_each(|(i, pair)| {
                let p = Point2f::from_pairs(base_pts, i / cells);
                let d = Vec2f::from_pairs(delta_pts, i % cells);
                (p + d).offset(BROADCAST_BIAS).write_to(pair);
            })
    });

    Ok(())
}

/// Allocating form of [`broadcast_add`].
pub fn broadcast(
    coords: &TensorView<'_, PointsShape>,
    delta: &TensorView<'_, MeshShape>,
    stream: &Stream,
) -> Result<Tensor<GridShape>, Error> {
    let lattice = delta.shape();
    let shape = GridShape::new(coords.shape().len, lattice.height, lattice.width);
    let mut out = Tensor::zeros(shape)?;
    broadcast_add(coords, delta, &mut out.as_view_mut(), stream)?;
    Ok(out)
}
