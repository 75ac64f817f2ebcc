use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use image::ImageFormat;
use log::{debug, info, warn};
use ndarray::Array2;

use crate::error::{Error, Result};
use crate::painter::{Colormap, CountPainter, Origin, Painter};

pub const IMAGE_DIR: &str = "images";
pub const FILE_PREFIX: &str = "Mandelbrot_001";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d___%H-%M-%S";

/// Row-major `(y_steps, x_steps)` view of a flat count sequence.
pub fn reshape(counts: Vec<u32>, x_steps: usize, y_steps: usize) -> Result<Array2<u32>> {
    let len = counts.len();
    Array2::from_shape_vec((y_steps, x_steps), counts).map_err(|_| Error::Shape {
        len,
        width: x_steps,
        height: y_steps,
    })
}

/// Options understood by every sink, plus `params` passed through untouched
/// for sink-specific settings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderOptions {
    pub colormap: Colormap,
    pub origin: Origin,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    pub params: BTreeMap<String, String>,
}

impl RenderOptions {
    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }
}

pub trait ImageSink {
    fn write(&self, counts: &Array2<u32>, options: &RenderOptions, path: &Path) -> Result<()>;
}

/// Paints counts and encodes them with the `image` crate. Recognizes the
/// `format` param (a file extension such as `png` or `bmp`); without it the
/// format follows the path extension.
#[derive(Copy, Clone, Debug, Default)]
pub struct FileSink;

impl FileSink {
    const PARAMS: &'static [&'static str] = &["format"];
}

impl ImageSink for FileSink {
    fn write(&self, counts: &Array2<u32>, options: &RenderOptions, path: &Path) -> Result<()> {
        for key in options.params.keys() {
            if !Self::PARAMS.contains(&key.as_str()) {
                warn!("ignoring unsupported image param {:?}", key);
            }
        }
        let img = CountPainter::new(options.colormap, options.origin)
            .with_limits(options.vmin, options.vmax)
            .paint(counts)?;
        match options.params.get("format") {
            Some(ext) => {
                let format = ImageFormat::from_extension(ext)
                    .ok_or_else(|| Error::UnknownFormat(ext.clone()))?;
                img.save_with_format(path, format)?;
            }
            None => img.save(path)?,
        }
        info!(
            "wrote {}x{} image ({}) to {}",
            img.width(),
            img.height(),
            options.colormap,
            path.display()
        );
        Ok(())
    }
}

pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Copy, Clone, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn default_file_name(clock: &dyn Clock) -> String {
    format!("{}___{}.png", FILE_PREFIX, clock.now().format(TIMESTAMP_FORMAT))
}

/// `<base_dir>/images/<timestamped name>.png`, creating the directory.
pub fn default_output_path(base_dir: &Path, clock: &dyn Clock) -> Result<PathBuf> {
    let dir = base_dir.join(IMAGE_DIR);
    if !dir.is_dir() {
        debug!("creating {}", dir.display());
        fs::create_dir_all(&dir)?;
    }
    Ok(dir.join(default_file_name(clock)))
}

/// Turns flat counts into an image file through a sink.
pub struct Renderer<'a> {
    sink: &'a dyn ImageSink,
    clock: &'a dyn Clock,
    base_dir: PathBuf,
}

impl<'a> Renderer<'a> {
    pub fn new(
        sink: &'a dyn ImageSink,
        clock: &'a dyn Clock,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sink,
            clock,
            base_dir: base_dir.into(),
        }
    }

    /// Writes one image and returns its path. Without `path`, a timestamped
    /// name under `<base_dir>/images` is used.
    pub fn save_figure(
        &self,
        counts: Vec<u32>,
        x_steps: usize,
        y_steps: usize,
        path: Option<&Path>,
        options: &RenderOptions,
    ) -> Result<PathBuf> {
        let arr = reshape(counts, x_steps, y_steps)?;
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_output_path(&self.base_dir, self.clock)?,
        };
        self.sink.write(&arr, options, &path)?;
        Ok(path)
    }
}
