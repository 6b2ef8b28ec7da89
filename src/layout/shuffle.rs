use std::ops::Deref;
use std::rc::Rc;

use rand::Rng;

use crate::models::Brand;

/// Returns an unbiased permutation of `items` without touching the input.
///
/// Fisher–Yates: walk from the last index down to 1, swapping each slot with a
/// uniformly drawn index in `0..=i`.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// One shuffled ordering of the catalog, shared by every renderer.
///
/// Cloning is cheap and yields the same ordering, so the grid and the slider
/// are guaranteed to see identical sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledOrder {
    brands: Rc<[Brand]>,
}

impl ShuffledOrder {
    pub fn new<R: Rng + ?Sized>(brands: &[Brand], rng: &mut R) -> Self {
        Self {
            brands: shuffled(brands, rng).into(),
        }
    }

    /// Wraps an ordering as-is.
    #[cfg(test)]
    pub fn from_ordered(brands: Vec<Brand>) -> Self {
        Self {
            brands: brands.into(),
        }
    }
}

impl Deref for ShuffledOrder {
    type Target = [Brand];

    fn deref(&self) -> &[Brand] {
        &self.brands
    }
}
