//! Cross-product enumeration of domain choices.
//!
//! Alphas and antecedent labels are both derived from the index tuples
//! produced here, so the `k`th alpha and the `k`th rule lookup always refer
//! to the same combination.

/// Every index tuple `[i_0, .., i_n]` with `i_j < radices[j]`, last position
/// varying fastest.
///
/// No radices, or any zero radix, yields nothing. The number of tuples must
/// fit in a `usize`; see [`Combinations::count`].
#[derive(Clone, Debug)]
pub struct Combinations {
    radices: Vec<usize>,
    current: Vec<usize>,
    remaining: usize,
}

impl Combinations {
    pub fn new(radices: Vec<usize>) -> Self {
        let remaining = Self::count(&radices).unwrap_or(usize::MAX);

        Self {
            current: vec![0; radices.len()],
            radices,
            remaining,
        }
    }

    /// Number of tuples over `radices`, or `None` if it overflows a `usize`.
    pub fn count(radices: &[usize]) -> Option<usize> {
        if radices.is_empty() {
            return Some(0);
        }

        radices.iter().try_fold(1usize, |acc, &radix| acc.checked_mul(radix))
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.remaining == 0 {
            return None;
        }

        let item = self.current.clone();

        self.remaining -= 1;

        // Odometer increment
        for (digit, &radix) in self.current.iter_mut().zip(&self.radices).rev() {
            *digit += 1;
            if *digit < radix {
                break;
            }
            *digit = 0;
        }

        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Combinations {}

/// Cross product of `seqs`, in the same order as [`Combinations`].
pub fn cartesian_product<T: Clone, S: AsRef<[T]>>(seqs: &[S]) -> Vec<Vec<T>> {
    let radices: Vec<usize> = seqs.iter().map(|s| s.as_ref().len()).collect();

    Combinations::new(radices)
        .map(|tuple| {
            tuple
                .iter()
                .zip(seqs)
                .map(|(&i, seq)| seq.as_ref()[i].clone())
                .collect()
        })
        .collect()
}
