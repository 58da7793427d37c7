//! Example: sample a local neighborhood around every pixel of an image.
//!
//! Runs the full lookup pipeline on a grayscale image (or a synthetic ramp):
//! pixel mesh, delta lattice, broadcast expansion, normalization, and
//! bilinear grid sampling. Stage timings and the neighborhood of one probe
//! pixel are written to a JSON file.
//!
//! Run from the workspace root:
//!   cargo run -p flow-kernels --example neighborhood -- --help
//!   cargo run -p flow-kernels --example neighborhood -- --radius 3 --threads 4

use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use flow_kernels::{
    BROADCAST_BIAS, GridShape, ImageShape, PointsShape, Stream, StreamConfig, Tensor, broadcast,
    coords_grid, delta_lattice, grid_sample_to_tensor, normalize_coords,
};
use image::ImageReader;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Sample a radius-r neighborhood around every pixel")]
struct Args {
    /// Grayscale input image; a synthetic ramp is used when omitted
    #[arg(long)]
    input: Option<String>,

    /// Synthetic image width
    #[arg(long, default_value_t = 64)]
    width: usize,

    /// Synthetic image height
    #[arg(long, default_value_t = 48)]
    height: usize,

    /// Neighborhood radius
    #[arg(long, default_value_t = 4)]
    radius: usize,

    /// Worker threads (0 = rayon global pool)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Probe pixel whose neighborhood is reported, as `x,y`
    #[arg(long, value_parser = parse_probe)]
    probe: Option<(usize, usize)>,

    /// Output JSON path
    #[arg(long, default_value = "neighborhood.json")]
    out: String,
}

#[derive(Serialize)]
struct StageDto {
    name: &'static str,
    elapsed_ms: f64,
}

#[derive(Serialize)]
struct Report {
    width: usize,
    height: usize,
    radius: usize,
    threads: usize,
    bias: f32,
    stages: Vec<StageDto>,
    probe: (usize, usize),
    /// Row-major `(2r+1) x (2r+1)` samples around the probe pixel.
    neighborhood: Vec<f32>,
}

fn parse_probe(s: &str) -> Result<(usize, usize), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok((x, y))
}

fn load_image(args: &Args) -> Result<Tensor<ImageShape>> {
    let Some(path) = &args.input else {
        let (w, h) = (args.width, args.height);
        let data = (0..w * h).map(|i| ((i % w) + (i / w) * 2) as f32).collect();
        return Tensor::from_vec(ImageShape::new(1, 1, h, w), data).context("building ramp");
    };

    let gray = ImageReader::open(path)
        .with_context(|| format!("opening {path}"))?
        .decode()
        .with_context(|| format!("decoding {path}"))?
        .into_luma8();
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    let data = gray.as_raw().iter().map(|&v| v as f32).collect();
    Tensor::from_vec(ImageShape::new(1, 1, h, w), data).context("building image tensor")
}

fn timed<T>(stages: &mut Vec<StageDto>, name: &'static str, op: impl FnOnce() -> T) -> T {
    let t0 = Instant::now();
    let out = op();
    stages.push(StageDto {
        name,
        elapsed_ms: t0.elapsed().as_secs_f64() * 1e3,
    });
    out
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let image = load_image(&args)?;
    let shape = image.shape();
    let (width, height) = (shape.width, shape.height);
    if width == 0 || height == 0 {
        bail!("image must be non-empty");
    }

    let probe = args.probe.unwrap_or((width / 2, height / 2));
    if probe.0 >= width || probe.1 >= height {
        bail!("probe {probe:?} outside {width}x{height} image");
    }

    let stream = Stream::new(&StreamConfig {
        num_threads: args.threads,
        ..StreamConfig::default()
    })
    .context("building stream")?;
    let size = 2 * args.radius + 1;
    let mut stages = Vec::new();

    let mesh = timed(&mut stages, "coords_grid", || {
        coords_grid(width, height, &stream)
    })?;
    let delta = timed(&mut stages, "delta_lattice", || {
        delta_lattice(args.radius, &stream)
    })?;
    let coords = mesh.reshape(PointsShape::new(width * height))?;
    let field = timed(&mut stages, "broadcast_add", || {
        broadcast(&coords.as_view(), &delta.as_view(), &stream)
    })?;

    let mut normalized = Tensor::zeros(field.shape())?;
    timed(&mut stages, "normalize_coords", || {
        normalize_coords(
            &field.as_view(),
            &mut normalized.as_view_mut(),
            width,
            height,
            &stream,
        )
    })?;

    let grid = normalized.reshape(GridShape::new(1, width * height * size, size))?;
    let sampled = timed(&mut stages, "grid_sample", || {
        grid_sample_to_tensor(&image.as_view(), &grid.as_view(), &stream)
    })?;

    for s in &stages {
        println!("{:>18}: {:8.3} ms", s.name, s.elapsed_ms);
    }

    let start = (probe.1 * width + probe.0) * size * size;
    let neighborhood = sampled.data()[start..start + size * size].to_vec();

    let report = Report {
        width,
        height,
        radius: args.radius,
        threads: stream.num_threads(),
        bias: BROADCAST_BIAS,
        stages,
        probe,
        neighborhood,
    };

    let out_file =
        std::fs::File::create(&args.out).with_context(|| format!("creating {}", args.out))?;
    serde_json::to_writer_pretty(out_file, &report)
        .with_context(|| format!("writing JSON to {}", args.out))?;

    println!("report written to {}", args.out);
    Ok(())
}
