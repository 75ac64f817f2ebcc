use crate::complex::{escaped, C};

#[derive(Clone, Debug, PartialEq)]
pub struct Escape {
    pub iteration: u32,
    /// Every value of `z`, starting with the initial one.
    pub trajectory: Vec<C<f64>>,
}

fn iterate<F>(c: C<f64>, initial_z: C<f64>, max_iter: u32, mut visit: F) -> u32
where
    F: FnMut(C<f64>),
{
    let mut z = initial_z;
    let mut count: u64 = 0;
    while count <= u64::from(max_iter) {
        if escaped(z) {
            return count as u32;
        }
        z = (z * z) + c;
        visit(z);
        count += 1;
    }
    max_iter
}

/// Iterates `z := z*z + c` from `initial_z`. The magnitude check runs before
/// each step, so `iteration` counts the non-escaping steps completed before
/// escape was seen; a point that never escapes reports `max_iter`.
pub fn evaluate(c: C<f64>, initial_z: C<f64>, max_iter: u32) -> Escape {
    let mut trajectory = vec![initial_z];
    let iteration = iterate(c, initial_z, max_iter, |z| trajectory.push(z));
    Escape {
        iteration,
        trajectory,
    }
}

/// Same count as [`evaluate`] without keeping the orbit.
#[inline]
pub fn escape_count(c: C<f64>, initial_z: C<f64>, max_iter: u32) -> u32 {
    iterate(c, initial_z, max_iter, |_| ())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::complex::{c, cr};

    #[test]
    fn test_far_point_escapes_immediately() {
        let e = evaluate(cr(10.0), cr(0.0), 100);
        // z0 = 0 does not escape, z1 = 10 does
        assert_eq!(e.iteration, 1);
        assert_eq!(e.trajectory, vec![cr(0.0), cr(10.0)]);

        let e = evaluate(cr(10.0), cr(3.0), 100);
        assert_eq!(e.iteration, 0);
        assert_eq!(e.trajectory, vec![cr(3.0)]);
        assert!(escaped(e.trajectory[0]));
    }

    #[test]
    fn test_origin_never_escapes() {
        for m in [0, 1, 5, 100] {
            let e = evaluate(cr(0.0), cr(0.0), m);
            assert_eq!(e.iteration, m);
            // the initial value plus one value per check-then-step cycle
            assert_eq!(e.trajectory.len(), m as usize + 2);
            assert!(e.trajectory.iter().all(|z| *z == cr(0.0)));
        }
    }

    #[test]
    fn test_period_two_point_is_bounded() {
        for m in [0, 1, 2, 3, 50, 1000] {
            let e = evaluate(cr(-1.0), cr(0.0), m);
            assert_eq!(e.iteration, m);
            assert_eq!(e.trajectory[1], cr(-1.0));
            if m >= 1 {
                assert_eq!(e.trajectory[2], cr(0.0));
            }
        }
    }

    #[test]
    fn test_max_iter_zero_runs_one_cycle() {
        let e = evaluate(cr(0.25), cr(0.0), 0);
        assert_eq!(e.iteration, 0);
        assert_eq!(e.trajectory, vec![cr(0.0), cr(0.25)]);
    }

    #[test]
    fn test_count_excludes_escaping_step() {
        // 0 -> 1 -> 2 -> 5
        let e = evaluate(cr(1.0), cr(0.0), 100);
        assert_eq!(e.iteration, 3);
        assert_eq!(e.trajectory, vec![cr(0.0), cr(1.0), cr(2.0), cr(5.0)]);
    }

    #[test]
    fn test_escape_at_cap_reports_cap() {
        // escape is only detected on the check after the last step
        let e = evaluate(cr(1.0), cr(0.0), 2);
        assert_eq!(e.iteration, 2);
        assert_eq!(e.trajectory.len(), 4);
        assert!(escaped(e.trajectory[3]));
    }

    #[test]
    fn test_escape_count_matches_evaluate() {
        let points = [
            cr(0.0),
            cr(-1.0),
            cr(1.0),
            c(0.3, 0.5),
            c(-0.75, 0.1),
            c(-2.0, 0.0),
            c(0.5, -0.6),
        ];
        for p in points {
            for m in [0, 1, 10, 200] {
                assert_eq!(escape_count(p, cr(0.0), m), evaluate(p, cr(0.0), m).iteration);
            }
        }
    }
}
