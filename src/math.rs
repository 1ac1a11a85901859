use std::iter::Sum;

/// Running total using the Kahan-Babushka-Neumaier algorithm for reduced numerical error in summation
///
/// <https://en.wikipedia.org/wiki/Kahan_summation_algorithm#Further_enhancements>
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KbnSum {
    sum: f64,
    compensation: f64,
}

impl KbnSum {
    pub fn add(&mut self, input: f64) {
        let t = self.sum + input;
        self.compensation += if self.sum.abs() >= input.abs() {
            (self.sum - t) + input
        } else {
            (input - t) + self.sum
        };
        self.sum = t;
    }

    pub fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

impl Sum<f64> for KbnSum {
    fn sum<I: Iterator<Item = f64>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, x| {
            acc.add(x);
            acc
        })
    }
}

/// Relative slack allowed when an item fills the remaining capacity exactly.
const FIT_TOLERANCE: f64 = 1e-9;

/// Whether `weight` fits into `remaining`, forgiving the rounding error that repeated subtraction leaves behind.
pub fn fits(weight: f64, remaining: f64) -> bool {
    remaining >= weight || weight - remaining <= FIT_TOLERANCE * weight
}

#[cfg(test)]
mod tests {
    use super::{fits, KbnSum};

    #[test]
    fn test_summation() {
        use std::f64::consts::*;
        let input = [FRAC_PI_8, FRAC_PI_2, FRAC_PI_6, FRAC_PI_3, FRAC_PI_4];
        let out = input.iter().copied().sum::<KbnSum>().total();

        assert_ne!(input.iter().sum::<f64>(), out);
        assert_eq!(out, 4.31968989868596570288)
    }

    #[test]
    fn test_summation_recovers_cancelled_terms() {
        let mut acc = KbnSum::default();
        for x in [1.0, 1e100, 1.0, -1e100] {
            acc.add(x);
        }
        assert_eq!(acc.total(), 2.0);
    }

    #[test]
    fn test_fits_forgives_subtraction_error() {
        assert!(fits(0.2, 0.3 - 0.1));
        assert!(fits(2., 2.));
        assert!(!fits(2., 1.9));
        assert!(!fits(1., 0.));
    }
}
