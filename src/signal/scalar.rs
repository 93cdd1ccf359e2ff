use std::fmt::Debug;

use num::complex::Complex64;

// Element types a dynamic spectrum may have: real power or a complex field.
pub trait Scalar: Copy + Debug {
    fn to_complex(&self) -> Complex64;
}

impl Scalar for f64 {
    fn to_complex(&self) -> Complex64 {
        Complex64::new(*self, 0.)
    }
}

impl Scalar for Complex64 {
    fn to_complex(&self) -> Complex64 {
        *self
    }
}

#[cfg(test)]
mod test {
    use num::complex::Complex64;

    use super::Scalar;

    #[test]
    fn real_and_complex_agree() {
        assert_eq!((-3.0f64).to_complex(), Complex64::new(-3., 0.));
        assert_eq!(Complex64::new(1., 2.).to_complex(), Complex64::new(1., 2.));
    }
}
