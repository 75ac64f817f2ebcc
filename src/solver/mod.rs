use log::debug;

use crate::complex::{cr, C};
use crate::coord::{make_coordinates, Region};
use crate::error::Result;
use crate::escape::escape_count;
use crate::threads::{Call, Join, Split, WorkerPool};

pub mod set;

pub use set::{EscapeSet, EscapeSolver};

pub trait Solver<T> {
    fn solve(&self, state: T) -> Result<T>;

    fn threaded(self, n: usize) -> WorkerPool<T, Result<T>>
    where
        Self: Sized + Clone + Send + 'static,
        T: Split + Join + Send + 'static,
    {
        WorkerPool::with(n, || {
            let solver = self.clone();
            move |state| solver.solve(state)
        })
    }
}

impl<T> Solver<T> for WorkerPool<T, Result<T>>
where
    T: Split + Join + Send + 'static,
{
    fn solve(&self, state: T) -> Result<T> {
        self.call(state)?
    }
}

/// Sample the region and compute one escape count per coordinate.
///
/// Inputs are not validated; see [`Region::new`] for the checked path.
pub fn make_set(
    x_range: (f64, f64),
    y_range: (f64, f64),
    x_steps: usize,
    y_steps: usize,
    max_iter: u32,
) -> (Vec<C<f64>>, Vec<u32>) {
    let coordinates = make_coordinates(x_range, y_range, x_steps, y_steps);
    let counts = coordinates
        .iter()
        .map(|&c| escape_count(c, cr(0.0), max_iter))
        .collect();
    (coordinates, counts)
}

/// Like [`make_set`], with the rows spread over `threads` workers.
/// `threads == 0` solves on the calling thread.
pub fn make_set_threaded(region: &Region, max_iter: u32, threads: usize) -> Result<EscapeSet> {
    let initial = EscapeSet::from(region);
    let solver = EscapeSolver::new(max_iter);
    debug!(
        "solving {}x{} grid, max_iter={}, threads={}",
        region.x_steps, region.y_steps, max_iter, threads
    );
    if threads == 0 {
        solver.solve(initial)
    } else {
        solver.threaded(threads).solve(initial)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::complex::c;

    #[test]
    fn test_make_set_len_and_alignment() {
        let (coords, counts) = make_set((-2.0, 1.0), (-1.0, 1.0), 7, 5, 50);
        assert_eq!(coords.len(), 35);
        assert_eq!(counts.len(), 35);
        for (z, i) in coords.iter().zip(&counts) {
            assert_eq!(*i, escape_count(*z, cr(0.0), 50));
            assert!(*i <= 50);
        }
    }

    #[test]
    fn test_make_set_known_points() {
        let (coords, counts) = make_set((-1.0, 1.0), (-1.0, 1.0), 3, 3, 20);
        assert_eq!(coords[3], c(-1.0, 0.0));
        assert_eq!(counts[3], 20);
        assert_eq!(coords[4], c(0.0, 0.0));
        assert_eq!(counts[4], 20);
        // 0 -> 1 -> 2 -> 5
        assert_eq!(coords[5], c(1.0, 0.0));
        assert_eq!(counts[5], 3);
    }

    #[test]
    fn test_make_set_is_idempotent() {
        let a = make_set((-2.0, 0.5), (-1.25, 1.25), 40, 30, 64);
        let b = make_set((-2.0, 0.5), (-1.25, 1.25), 40, 30, 64);
        assert_eq!(a, b);
    }

    #[test]
    fn test_threaded_matches_single_threaded() {
        let region = Region::from_ranges((-2.0, 0.5), (-1.25, 1.25), 33, 17).unwrap();
        let (coords, counts) = make_set((-2.0, 0.5), (-1.25, 1.25), 33, 17, 80);
        for threads in [0, 1, 3, 8, 40] {
            let set = make_set_threaded(&region, 80, threads).unwrap();
            assert_eq!(set.width(), 33);
            assert_eq!(set.height(), 17);
            assert_eq!(set.max_iter(), Some(80));
            let (c2, i2) = set.into_parts();
            assert_eq!(c2, coords);
            assert_eq!(i2, counts);
        }
    }
}
