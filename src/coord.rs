use num::{Float, Num, NumCast};

use crate::complex::*;
use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Axis<T> {
    pub min: T,
    pub max: T,
}

impl<T> Axis<T>
where
    T: Num + Copy,
{
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn length(&self) -> T {
        self.max - self.min
    }
}

impl<T> Axis<T>
where
    T: Float,
{
    /// `steps` evenly spaced values over `[min, max]`, both ends included.
    ///
    /// `steps == 1` divides by zero and yields a non-finite value.
    pub fn linspace(&self, steps: usize) -> Vec<T> {
        let denom: T = NumCast::from(steps as f64 - 1.0).unwrap_or_else(T::nan);
        let delta = self.length();
        (0..steps)
            .map(|step| {
                let step: T = NumCast::from(step).unwrap_or_else(T::nan);
                self.min + step * delta / denom
            })
            .collect()
    }
}

impl From<(f64, f64)> for Axis<f64> {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

/// Rectangle of the complex plane sampled on an `x_steps` by `y_steps` grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    pub x: Axis<f64>,
    pub y: Axis<f64>,
    pub x_steps: usize,
    pub y_steps: usize,
}

impl Region {
    pub fn new(x: Axis<f64>, y: Axis<f64>, x_steps: usize, y_steps: usize) -> Result<Self> {
        if x_steps < 2 {
            return Err(Error::InvalidRegion {
                axis: 'x',
                steps: x_steps,
            });
        }
        if y_steps < 2 {
            return Err(Error::InvalidRegion {
                axis: 'y',
                steps: y_steps,
            });
        }
        Ok(Self {
            x,
            y,
            x_steps,
            y_steps,
        })
    }

    pub fn from_ranges(
        x_range: (f64, f64),
        y_range: (f64, f64),
        x_steps: usize,
        y_steps: usize,
    ) -> Result<Self> {
        Self::new(x_range.into(), y_range.into(), x_steps, y_steps)
    }

    pub fn len(&self) -> usize {
        self.x_steps * self.y_steps
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(rows, cols)`, i.e. `(y_steps, x_steps)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.y_steps, self.x_steps)
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.x_steps + col
    }

    pub fn iter(&self) -> GridIter {
        GridIter::new(self.x_steps, self.y_steps)
    }

    pub fn coordinates(&self) -> Vec<C<f64>> {
        make_coordinates(
            (self.x.min, self.x.max),
            (self.y.min, self.y.max),
            self.x_steps,
            self.y_steps,
        )
    }
}

impl Default for Region {
    fn default() -> Self {
        Self {
            x: Axis::new(-3.0, 1.0),
            y: Axis::new(-1.125, 1.125),
            x_steps: 1920,
            y_steps: 1080,
        }
    }
}

/// `(col, row)` grid indices, rows outer and columns inner.
pub struct GridIter {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl GridIter {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

impl Iterator for GridIter {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<(usize, usize)> {
        if self.width == 0 || self.y >= self.height {
            return None;
        }
        let current = (self.x, self.y);
        self.x += 1;
        if self.x == self.width {
            self.x = 0;
            self.y += 1;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.width == 0 || self.y >= self.height {
            0
        } else {
            (self.height - self.y) * self.width - self.x
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for GridIter {}

pub fn make_coordinates(
    x_range: (f64, f64),
    y_range: (f64, f64),
    x_steps: usize,
    y_steps: usize,
) -> Vec<C<f64>> {
    let xs = Axis::from(x_range).linspace(x_steps);
    let ys = Axis::from(y_range).linspace(y_steps);
    GridIter::new(x_steps, y_steps)
        .map(|(x, y)| c(xs[x], ys[y]))
        .collect()
}
