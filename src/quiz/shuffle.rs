//! Unbiased random permutations (Fisher-Yates).

use rand::Rng;

/// Return a uniformly random permutation of `items`, leaving the input untouched.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
  shuffle_with(items, &mut rand::rng())
}

/// [`shuffle`] with a caller-supplied generator, for reproducible orderings.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
  let mut shuffled = items.to_vec();
  // Walk from the last index down to 1, swapping with a uniform pick in 0..=i
  for i in (1..shuffled.len()).rev() {
    let j = rng.random_range(0..=i);
    shuffled.swap(i, j);
  }
  shuffled
}
