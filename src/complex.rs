use num::complex::Complex;

pub type C<T> = Complex<T>;

/// Once an orbit leaves this disc it is unbounded.
pub const ESCAPE_RADIUS: f64 = 2.0;

pub fn c(re: f64, im: f64) -> C<f64> {
    Complex::new(re, im)
}

pub fn cr(re: f64) -> C<f64> {
    c(re, 0.0)
}

pub fn ci(im: f64) -> C<f64> {
    c(0.0, im)
}

/// `|z| > 2`, compared on the squared norm.
#[inline]
pub fn escaped(z: C<f64>) -> bool {
    z.norm_sqr() > ESCAPE_RADIUS * ESCAPE_RADIUS
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_escaped_is_strict() {
        assert!(!escaped(cr(2.0)));
        assert!(!escaped(ci(-2.0)));
        assert!(escaped(cr(2.000001)));
        assert!(escaped(c(1.5, 1.5)));
        assert!(!escaped(c(1.4, 1.4)));
    }
}
