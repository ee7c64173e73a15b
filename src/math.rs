use num::Float;

/// Crisp value of consequent domain `index` fired at strength `alpha`.
///
/// Only the two extreme domains are treated as monotonic: the first one
/// decreases from `p[1]` toward `p[0]` as `alpha` grows, the last one
/// increases from `p[n-2]` toward `p[n-1]`. An interior domain always yields
/// its own anchor point, whatever `alpha` is. This is a modeling limitation
/// of the linear partition and changing it changes the outputs of existing
/// rule bases.
pub(crate) fn monotonic_inverse<F: Float>(anchors: &[F], index: usize, alpha: F) -> F {
    debug_assert!(anchors.len() >= 3 && index < anchors.len());

    let last = anchors.len() - 1;

    if index == 0 {
        anchors[1] - alpha * (anchors[1] - anchors[0])
    } else if index == last {
        anchors[last - 1] + alpha * (anchors[last] - anchors[last - 1])
    } else {
        anchors[index]
    }
}

/// `Σ(z * a) / Σ(a)`, or `None` when every weight is zero.
pub(crate) fn weighted_average<F: Float>(pairs: impl IntoIterator<Item = (F, F)>) -> Option<F> {
    let (sum_za, sum_a) = pairs
        .into_iter()
        .fold((F::zero(), F::zero()), |(za, a), (z, alpha)| (za + z * alpha, a + alpha));

    if sum_a == F::zero() {
        None
    } else {
        Some(sum_za / sum_a)
    }
}

#[test]
fn test_monotonic_inverse() {
    let p = [6_250_000., 10_375_000., 14_500_000.];

    assert_eq!(monotonic_inverse(&p, 0, 0.), 10_375_000.);
    assert_eq!(monotonic_inverse(&p, 0, 1.), 6_250_000.);
    assert_eq!(monotonic_inverse(&p, 0, 0.5), 8_312_500.);
    assert_eq!(monotonic_inverse(&p, 2, 0.), 10_375_000.);
    assert_eq!(monotonic_inverse(&p, 2, 1.), 14_500_000.);
    assert_eq!(monotonic_inverse(&p, 2, 0.25), 11_406_250.);

    // Interior domains ignore alpha
    assert_eq!(monotonic_inverse(&p, 1, 0.), 10_375_000.);
    assert_eq!(monotonic_inverse(&p, 1, 0.9), 10_375_000.);
}

#[test]
fn test_weighted_average() {
    assert_eq!(weighted_average([(10., 1.), (20., 3.)]), Some(17.5));
    assert_eq!(weighted_average([(10., 0.), (20., 0.)]), None);
    assert_eq!(weighted_average(std::iter::empty::<(f64, f64)>()), None);

    // Equal weights give the plain mean
    let crisp = [3., 8., 13., 40.];
    let mean = crisp.iter().sum::<f64>() / crisp.len() as f64;

    assert_eq!(weighted_average(crisp.iter().map(|&z| (z, 0.5))), Some(mean));
}
