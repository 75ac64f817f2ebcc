use crate::complex::{cr, C};
use crate::coord::Region;
use crate::error::Result;
use crate::escape::escape_count;
use crate::solver::Solver;
use crate::threads::{Join, RangeSplitter, Split};

/// Sample coordinates and their escape counts, index aligned, laid out
/// row-major over a `height` by `width` grid.
#[derive(Clone, Debug, PartialEq)]
pub struct EscapeSet {
    width: usize,
    height: usize,
    max_iter: Option<u32>,
    coordinates: Vec<C<f64>>,
    counts: Vec<u32>,
}

impl EscapeSet {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The cap this set was solved with, `None` before solving.
    pub fn max_iter(&self) -> Option<u32> {
        self.max_iter
    }

    pub fn coordinates(&self) -> &[C<f64>] {
        &self.coordinates
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn into_parts(self) -> (Vec<C<f64>>, Vec<u32>) {
        (self.coordinates, self.counts)
    }
}

impl From<&Region> for EscapeSet {
    fn from(region: &Region) -> Self {
        let coordinates = region.coordinates();
        let counts = vec![0; coordinates.len()];
        Self {
            width: region.x_steps,
            height: region.y_steps,
            max_iter: None,
            coordinates,
            counts,
        }
    }
}

impl Split for EscapeSet {
    fn split_parts(self, n: usize) -> Vec<Self> {
        let Self {
            width,
            height,
            max_iter,
            coordinates,
            counts,
        } = self;
        let bands = RangeSplitter::split(0, height, n);
        let ends: Vec<usize> = bands.iter().map(|(_, to)| to * width).collect();
        let coordinates = split_at_ends(coordinates, &ends);
        let counts = split_at_ends(counts, &ends);
        bands
            .into_iter()
            .zip(coordinates.into_iter().zip(counts))
            .map(|((from, to), (coordinates, counts))| Self {
                width,
                height: to - from,
                max_iter,
                coordinates,
                counts,
            })
            .collect()
    }
}

fn split_at_ends<T>(mut v: Vec<T>, ends: &[usize]) -> Vec<Vec<T>> {
    let mut parts = Vec::with_capacity(ends.len());
    for pair in ends.windows(2).rev() {
        parts.push(v.split_off(pair[0]));
    }
    parts.push(v);
    parts.reverse();
    parts
}

impl Join for EscapeSet {
    fn join_parts(parts: Vec<Self>) -> Self {
        let width = parts.first().map_or(0, |p| p.width);
        let max_iter = parts.first().and_then(|p| p.max_iter);
        let mut height = 0;
        let mut coordinates = vec![];
        let mut counts = vec![];
        for part in parts {
            debug_assert_eq!(part.width, width, "different width");
            debug_assert_eq!(part.max_iter, max_iter, "different max_iter");
            height += part.height;
            coordinates.push(part.coordinates);
            counts.push(part.counts);
        }
        Self {
            width,
            height,
            max_iter,
            coordinates: Vec::join_parts(coordinates),
            counts: Vec::join_parts(counts),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EscapeSolver {
    max_iter: u32,
}

impl EscapeSolver {
    pub fn new(max_iter: u32) -> Self {
        Self { max_iter }
    }
}

impl Default for EscapeSolver {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Solver<EscapeSet> for EscapeSolver {
    fn solve(&self, mut state: EscapeSet) -> Result<EscapeSet> {
        for (c, i) in state.coordinates.iter().zip(state.counts.iter_mut()) {
            *i = escape_count(*c, cr(0.0), self.max_iter);
        }
        state.max_iter = Some(self.max_iter);
        Ok(state)
    }
}
