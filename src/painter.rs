use std::fmt;
use std::str::FromStr;

use image::{Rgb, RgbImage};
use ndarray::Array2;

use crate::error::{Error, Result};

pub trait ColorScale {
    /// Color for a value already normalized to `[0, 1]`.
    fn color(&self, frac: f64) -> Rgb<u8>;
}

fn channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Piecewise linear ramp from 0 at `from` to 1 at `to`.
fn ramp(x: f64, from: f64, to: f64) -> f64 {
    ((x - from) / (to - from)).clamp(0.0, 1.0)
}

/// Black through red and yellow to white.
#[derive(Copy, Clone, Debug)]
pub struct Hot;

impl ColorScale for Hot {
    fn color(&self, frac: f64) -> Rgb<u8> {
        const R_END: f64 = 0.365079;
        const G_END: f64 = 0.746032;
        let r = 0.0416 + (1.0 - 0.0416) * ramp(frac, 0.0, R_END);
        let g = ramp(frac, R_END, G_END);
        let b = ramp(frac, G_END, 1.0);
        Rgb([channel(r), channel(g), channel(b)])
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Greyscale;

impl ColorScale for Greyscale {
    fn color(&self, frac: f64) -> Rgb<u8> {
        let v = channel(frac);
        Rgb([v, v, v])
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Rainbow;

fn rainbow_color(n: usize) -> [u8; 3] {
    match n {
        0 => [0xbe, 0x0a, 0xff],
        1 => [0x58, 0x0a, 0xff],
        2 => [0x14, 0x7d, 0xf5],
        3 => [0x0a, 0xef, 0xff],
        4 => [0x0a, 0xff, 0x99],
        5 => [0xa1, 0xff, 0x0a],
        6 => [0xde, 0xff, 0x0a],
        7 => [0xff, 0xd3, 0x00],
        8 => [0xff, 0x87, 0x00],
        _ => [0xff, 0x00, 0x00],
    }
}

fn mix(a: u8, b: u8, frac: f64) -> u8 {
    let m = a as f64 * (1.0 - frac) + b as f64 * frac;
    m.round() as u8
}

impl ColorScale for Rainbow {
    fn color(&self, frac: f64) -> Rgb<u8> {
        let pos = 9.0 * frac.clamp(0.0, 1.0);
        let n = pos.floor() as usize;
        let frac = pos - n as f64;
        let rgb1 = rainbow_color(n);
        let rgb2 = rainbow_color(n + 1);
        Rgb([
            mix(rgb1[0], rgb2[0], frac),
            mix(rgb1[1], rgb2[1], frac),
            mix(rgb1[2], rgb2[2], frac),
        ])
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    Hot,
    Greyscale,
    Rainbow,
}

/// A named palette, optionally reversed (`"hot_r"`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Colormap {
    pub palette: Palette,
    pub reversed: bool,
}

impl Colormap {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            reversed: false,
        }
    }

    pub fn reversed(self) -> Self {
        Self {
            reversed: !self.reversed,
            ..self
        }
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::new(Palette::Hot)
    }
}

impl ColorScale for Colormap {
    fn color(&self, frac: f64) -> Rgb<u8> {
        let frac = if self.reversed { 1.0 - frac } else { frac };
        match self.palette {
            Palette::Hot => Hot.color(frac),
            Palette::Greyscale => Greyscale.color(frac),
            Palette::Rainbow => Rainbow.color(frac),
        }
    }
}

impl FromStr for Colormap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name.as_str(), false),
        };
        let palette = match base {
            "hot" => Palette::Hot,
            "greyscale" | "grayscale" | "grey" | "gray" => Palette::Greyscale,
            "rainbow" => Palette::Rainbow,
            _ => return Err(Error::UnknownColormap(s.to_string())),
        };
        Ok(Self { palette, reversed })
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.palette {
            Palette::Hot => "hot",
            Palette::Greyscale => "greyscale",
            Palette::Rainbow => "rainbow",
        };
        if self.reversed {
            write!(f, "{}_r", name)
        } else {
            write!(f, "{}", name)
        }
    }
}

/// Where the first array row lands in the image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Origin {
    /// First row at the bottom.
    #[default]
    Lower,
    /// First row at the top.
    Upper,
}

impl FromStr for Origin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lower" => Ok(Origin::Lower),
            "upper" => Ok(Origin::Upper),
            _ => Err(Error::UnknownOrigin(s.to_string())),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Lower => write!(f, "lower"),
            Origin::Upper => write!(f, "upper"),
        }
    }
}

pub trait Painter {
    fn paint(&self, counts: &Array2<u32>) -> Result<RgbImage>;
}

/// Maps counts linearly from `[vmin, vmax]` onto a color scale. Limits
/// default to the data range.
pub struct CountPainter<C> {
    color: C,
    origin: Origin,
    vmin: Option<f64>,
    vmax: Option<f64>,
}

impl<C> CountPainter<C>
where
    C: ColorScale,
{
    pub fn new(color: C, origin: Origin) -> Self {
        Self {
            color,
            origin,
            vmin: None,
            vmax: None,
        }
    }

    pub fn with_limits(mut self, vmin: Option<f64>, vmax: Option<f64>) -> Self {
        self.vmin = vmin;
        self.vmax = vmax;
        self
    }

    fn limits(&self, counts: &Array2<u32>) -> (f64, f64) {
        let lo = counts.iter().min().map_or(0.0, |&v| v as f64);
        let hi = counts.iter().max().map_or(0.0, |&v| v as f64);
        (self.vmin.unwrap_or(lo), self.vmax.unwrap_or(hi))
    }

    pub fn normalize(value: u32, vmin: f64, vmax: f64) -> f64 {
        if vmax <= vmin {
            return 0.0;
        }
        ((value as f64 - vmin) / (vmax - vmin)).clamp(0.0, 1.0)
    }
}

impl<C> Painter for CountPainter<C>
where
    C: ColorScale,
{
    fn paint(&self, counts: &Array2<u32>) -> Result<RgbImage> {
        let (rows, cols) = counts.dim();
        let shape_err = || Error::Shape {
            len: counts.len(),
            width: cols,
            height: rows,
        };
        let width = u32::try_from(cols).map_err(|_| shape_err())?;
        let height = u32::try_from(rows).map_err(|_| shape_err())?;
        let (vmin, vmax) = self.limits(counts);

        let mut img = RgbImage::new(width, height);
        for ((row, col), &value) in counts.indexed_iter() {
            let y = match self.origin {
                Origin::Lower => rows - 1 - row,
                Origin::Upper => row,
            };
            let frac = Self::normalize(value, vmin, vmax);
            img.put_pixel(col as u32, y as u32, self.color.color(frac));
        }
        Ok(img)
    }
}
