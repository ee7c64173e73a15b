//! Linear fuzzy partition over evenly spaced anchors.
//!
//! Domain `i` peaks at anchor `p[i]` and falls linearly to zero at the
//! neighbouring anchors. The first and last domains are shoulders: they stay
//! at 1 from their anchor outward, so any value outside the range saturates
//! the nearest extreme domain. At most two adjacent domains are non-zero for
//! any value, and their degrees sum to one.

use num::Float;

/// Degree of membership of `value` in each domain described by `anchors`.
///
/// `anchors` must be sorted ascending. A NaN value belongs to no domain.
pub fn membership<F: Float>(anchors: &[F], value: F) -> Vec<F> {
    let mut degrees = vec![F::zero(); anchors.len()];
    let (Some(&first), Some(&last)) = (anchors.first(), anchors.last()) else {
        return degrees;
    };

    if value <= first {
        degrees[0] = F::one();
        return degrees;
    }
    if value >= last {
        degrees[anchors.len() - 1] = F::one();
        return degrees;
    }

    for (i, segment) in anchors.windows(2).enumerate() {
        let (lo, hi) = (segment[0], segment[1]);

        if value == lo {
            degrees[i] = F::one();
            break;
        }
        if value < hi {
            let width = hi - lo;

            degrees[i] = (hi - value) / width;
            degrees[i + 1] = (value - lo) / width;
            break;
        }
    }

    degrees
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::linspace::Linspace;

    fn anchors(min: f64, max: f64, n: usize) -> Vec<f64> {
        Linspace::new(min, max, n).collect()
    }

    #[test]
    fn test_between_anchors() {
        let p = anchors(6000., 82000., 3);
        let degrees = membership(&p, 10000.);

        assert_abs_diff_eq!(degrees[0], 34000. / 38000., epsilon = 1e-12);
        assert_abs_diff_eq!(degrees[1], 4000. / 38000., epsilon = 1e-12);
        assert_eq!(degrees[2], 0.);

        let degrees = membership(&p, 60000.);

        assert_eq!(degrees[0], 0.);
        assert_abs_diff_eq!(degrees[1], 22000. / 38000., epsilon = 1e-12);
        assert_abs_diff_eq!(degrees[2], 16000. / 38000., epsilon = 1e-12);
    }

    #[test]
    fn test_on_anchors() {
        let p = anchors(1., 8., 3);

        assert_eq!(membership(&p, 1.), vec![1., 0., 0.]);
        assert_eq!(membership(&p, 4.5), vec![0., 1., 0.]);
        assert_eq!(membership(&p, 8.), vec![0., 0., 1.]);

        let p = anchors(500., 1000., 6);

        assert_eq!(membership(&p, 700.), vec![0., 0., 1., 0., 0., 0.]);
        assert_eq!(membership(&p, 900.), vec![0., 0., 0., 0., 1., 0.]);
    }

    #[test]
    fn test_outside_range_saturates() {
        let p = anchors(1., 8., 3);

        assert_eq!(membership(&p, -100.), vec![1., 0., 0.]);
        assert_eq!(membership(&p, 1e9), vec![0., 0., 1.]);
        assert_eq!(membership(&p, f64::NAN), vec![0., 0., 0.]);
    }

    #[test]
    fn test_partition_of_unity() {
        let p = anchors(-3., 17., 5);
        let mut x = -5.;

        while x <= 19. {
            let degrees = membership(&p, x);
            let non_zero: Vec<usize> = (0..degrees.len()).filter(|&i| degrees[i] > 0.).collect();

            assert!(degrees.iter().all(|d| (0. ..=1.).contains(d)), "{x}: {degrees:?}");
            assert!(!non_zero.is_empty() && non_zero.len() <= 2, "{x}: {degrees:?}");
            if let [a, b] = non_zero[..] {
                assert_eq!(a + 1, b);
            }
            assert_abs_diff_eq!(degrees.iter().sum::<f64>(), 1., epsilon = 1e-12);

            x += 0.37;
        }
    }
}
