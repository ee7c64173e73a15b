use num::Float;

/// Evenly spaced points over `[min, max]`, endpoints included.
///
/// Point `i` is `min + i * (max - min) / (n - 1)`, so the first point is
/// exactly `min`. The last point is only as close to `max` as the float
/// arithmetic allows.
pub(crate) struct Linspace<F> {
    start: F,
    step: F,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    pub(crate) fn new(min: F, max: F, n: usize) -> Self {
        let step = match F::from(n.saturating_sub(1)) {
            Some(num_steps) if n > 1 => (max - min) / num_steps,
            _ => F::zero(),
        };

        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            return None;
        }

        let i = F::from(self.index)?;
        self.index += 1;

        Some(self.start + i * self.step)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<F: Float> ExactSizeIterator for Linspace<F> {}

#[test]
fn test_linspace() {
    let points: Vec<f64> = Linspace::new(6000., 82000., 3).collect();

    assert_eq!(points, vec![6000., 44000., 82000.]);

    let points: Vec<f64> = Linspace::new(500., 1000., 6).collect();

    assert_eq!(points, vec![500., 600., 700., 800., 900., 1000.]);
    assert_eq!(Linspace::new(0f64, 1., 0).count(), 0);
    assert_eq!(Linspace::new(0f64, 1., 1).collect::<Vec<_>>(), vec![0.]);
}
