use fk_core::{
    Error, GridShape, ImageShape, Padding, Stream, Tensor, TensorView, TensorViewMut, check_dim,
    unnormalize,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sample::{Plane, sample_bilinear, sample_nearest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleMode {
    #[default]
    Bilinear,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSampleConfig {
    pub mode: SampleMode,
    pub padding: Padding,
}

/// Bilinear, zero-padded, align-corners resampling of `image` at `grid`.
///
/// `image` is `(N, C, H_in, W_in)`, `grid` is `(N, H_out, W_out, 2)` holding
/// normalized `(x, y)` pairs, and `out` must be `(N, C, H_out, W_out)`.
pub fn grid_sample(
    image: &TensorView<'_, ImageShape>,
    grid: &TensorView<'_, GridShape>,
    out: &mut TensorViewMut<'_, ImageShape>,
    stream: &Stream,
) -> Result<(), Error> {
    grid_sample_with(image, grid, out, &GridSampleConfig::default(), stream)
}

/// [`grid_sample`] with an explicit interpolation mode and padding policy.
pub fn grid_sample_with(
    image: &TensorView<'_, ImageShape>,
    grid: &TensorView<'_, GridShape>,
    out: &mut TensorViewMut<'_, ImageShape>,
    cfg: &GridSampleConfig,
    stream: &Stream,
) -> Result<(), Error> {
    let src = image.shape();
    let gs = grid.shape();
    let dst = out.shape();

    check_dim("grid batch", src.batch, gs.batch)?;
    check_dim("output batch", src.batch, dst.batch)?;
    check_dim("output channels", src.channels, dst.channels)?;
    check_dim("output height", gs.height, dst.height)?;
    check_dim("output width", gs.width, dst.width)?;

    tracing::debug!(
        n = src.batch,
        c = src.channels,
        h_in = src.height,
        w_in = src.width,
        h_out = dst.height,
        w_out = dst.width,
        mode = ?cfg.mode,
        padding = ?cfg.padding,
        "grid_sample"
    );

    let out_data = out.as_mut_slice();
    if out_data.is_empty() {
        return Ok(());
    }

    // A non-empty output bounds every extent product used below.
    let empty_src = src.height == 0 || src.width == 0;
    if empty_src && cfg.padding != Padding::Zeros {
        return Err(Error::EmptyDimension {
            what: "image height and width",
        });
    }
    if empty_src {
        // Every neighbor is out of range under zero padding.
        stream.install(|| {
            out_data
                .par_iter_mut()
                .with_min_len(stream.min_len())
                .for_each(|v| *v = 0.0)
        });
        return Ok(());
    }

    let img = image.as_slice();
    let pts = grid.as_slice();
    let plane_in = src.plane_len();
    let plane_out = dst.plane_len();
    let channels = src.channels;
    let cfg = *cfg;

    stream.install(|| {
        out_data
            .par_iter_mut()
            .enumerate()
            .with_min_len(stream.min_len())
            .for_each(|(idx, v)| {
                let pix = idx % plane_out;
                let nc = idx / plane_out;
                let n = nc / channels;

                let g = (n * plane_out + pix) * 2;
                let x = unnormalize(pts[g], src.width);
                let y = unnormalize(pts[g + 1], src.height);

                let start = nc * plane_in;
                let plane = Plane {
                    data: &img[start..start + plane_in],
                    width: src.width,
                    height: src.height,
                };

                *v = match cfg.mode {
                    SampleMode::Bilinear => sample_bilinear(&plane, x, y, cfg.padding),
                    SampleMode::Nearest => sample_nearest(&plane, x, y, cfg.padding),
                };
            })
    });

    Ok(())
}

/// Allocating form of [`grid_sample`].
pub fn grid_sample_to_tensor(
    image: &TensorView<'_, ImageShape>,
    grid: &TensorView<'_, GridShape>,
    stream: &Stream,
) -> Result<Tensor<ImageShape>, Error> {
    let src = image.shape();
    let gs = grid.shape();
    let mut out = Tensor::zeros(ImageShape::new(
        src.batch,
        src.channels,
        gs.height,
        gs.width,
    ))?;
    grid_sample(image, grid, &mut out.as_view_mut(), stream)?;
    Ok(out)
}
