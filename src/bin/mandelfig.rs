use std::path::PathBuf;

use anyhow::Context;
use structopt::StructOpt;

use mandelfig::coord::{Axis, Region};
use mandelfig::painter::{Colormap, Origin};
use mandelfig::render::RenderOptions;
use mandelfig::{make_figure, Figure};

fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected key=value, got {:?}", s)),
    }
}

/// Render the Mandelbrot set over a region of the complex plane.
#[derive(Debug, StructOpt)]
#[structopt(name = "mandelfig")]
struct Opt {
    #[structopt(long, default_value = "-3", allow_hyphen_values = true)]
    x_min: f64,
    #[structopt(long, default_value = "1", allow_hyphen_values = true)]
    x_max: f64,
    #[structopt(long, default_value = "-1.125", allow_hyphen_values = true)]
    y_min: f64,
    #[structopt(long, default_value = "1.125", allow_hyphen_values = true)]
    y_max: f64,
    /// Horizontal samples (image width)
    #[structopt(long, default_value = "1920")]
    x_steps: usize,
    /// Vertical samples (image height)
    #[structopt(long, default_value = "1080")]
    y_steps: usize,
    #[structopt(long, default_value = "100")]
    max_iter: u32,
    /// Output file; defaults to images/Mandelbrot_001___<timestamp>.png
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
    /// hot, greyscale or rainbow, with an optional _r suffix
    #[structopt(long, default_value = "hot")]
    colormap: Colormap,
    /// lower puts the first row (y-min) at the bottom of the image
    #[structopt(long, default_value = "lower")]
    origin: Origin,
    #[structopt(long)]
    vmin: Option<f64>,
    #[structopt(long)]
    vmax: Option<f64>,
    /// Worker threads, 0 to compute on the main thread [default: physical cpus]
    #[structopt(long)]
    threads: Option<usize>,
    /// Extra image sink setting, e.g. --param format=bmp
    #[structopt(long = "param", parse(try_from_str = parse_param))]
    params: Vec<(String, String)>,
    /// Log at debug level unless RUST_LOG says otherwise
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    let level = if opt.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let region = Region::new(
        Axis::new(opt.x_min, opt.x_max),
        Axis::new(opt.y_min, opt.y_max),
        opt.x_steps,
        opt.y_steps,
    )?;
    let options = RenderOptions {
        colormap: opt.colormap,
        origin: opt.origin,
        vmin: opt.vmin,
        vmax: opt.vmax,
        params: opt.params.into_iter().collect(),
    };

    let mut figure = Figure::new(region, opt.max_iter).options(options);
    if let Some(threads) = opt.threads {
        figure = figure.threads(threads);
    }
    if let Some(output) = opt.output {
        figure = figure.output(output);
    }

    let path = make_figure(&figure).context("failed to render figure")?;
    println!("{}", path.display());
    Ok(())
}
