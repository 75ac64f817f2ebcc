//! Escape-time rendering of the Mandelbrot set.
//!
//! A [`Region`](coord::Region) of the complex plane is sampled on a grid,
//! each sample gets an escape count from [`escape`], and the counts are
//! painted into an image file by a [`render::ImageSink`].
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info};

use crate::coord::Region;
use crate::render::{Clock, FileSink, ImageSink, RenderOptions, Renderer, SystemClock};
use crate::solver::make_set_threaded;

pub mod bench;
pub mod complex;
pub mod coord;
pub mod error;
pub mod escape;
pub mod painter;
pub mod render;
pub mod solver;
pub mod threads;

pub use error::{Error, Result};

/// Everything needed to produce one image.
#[derive(Clone, Debug)]
pub struct Figure {
    pub region: Region,
    pub max_iter: u32,
    /// Explicit output file; a timestamped name under `base_dir/images`
    /// otherwise.
    pub output: Option<PathBuf>,
    pub options: RenderOptions,
    /// Worker threads for the escape counts, 0 for the calling thread.
    pub threads: usize,
    pub base_dir: PathBuf,
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            region: Region::default(),
            max_iter: 100,
            output: None,
            options: RenderOptions::default(),
            threads: num_cpus::get_physical(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl Figure {
    pub fn new(region: Region, max_iter: u32) -> Self {
        Self {
            region,
            max_iter,
            ..Self::default()
        }
    }

    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn base_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.base_dir = dir.as_ref().to_path_buf();
        self
    }
}

/// Computes the set for `figure` and writes a single image file, returning
/// its path.
pub fn make_figure(figure: &Figure) -> Result<PathBuf> {
    make_figure_with(figure, &FileSink, &SystemClock)
}

pub fn make_figure_with(
    figure: &Figure,
    sink: &dyn ImageSink,
    clock: &dyn Clock,
) -> Result<PathBuf> {
    let region = &figure.region;
    let start = Instant::now();
    let set = make_set_threaded(region, figure.max_iter, figure.threads)?;
    debug!(
        "solved {} points in {}ms",
        region.len(),
        start.elapsed().as_millis()
    );

    let (_, counts) = set.into_parts();
    let renderer = Renderer::new(sink, clock, &figure.base_dir);
    let path = renderer.save_figure(
        counts,
        region.x_steps,
        region.y_steps,
        figure.output.as_deref(),
        &figure.options,
    )?;
    info!(
        "rendered {}x{} figure in {}ms",
        region.x_steps,
        region.y_steps,
        start.elapsed().as_millis()
    );
    Ok(path)
}
