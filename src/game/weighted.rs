//! Weighted random selection.
//!
//! Supporter deaths and births both pick a faction in proportion to a
//! weight. This is the single place that draw happens.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

/// Pick one item with probability proportional to its weight.
///
/// Returns `None` if there are no items, every weight is zero, or a weight is
/// negative or not finite.
pub fn choose_weighted<T, R>(rng: &mut R, pairs: impl IntoIterator<Item = (T, f64)>) -> Option<T>
where
    R: Rng + ?Sized,
{
    let (items, weights): (Vec<T>, Vec<f64>) = pairs.into_iter().unzip();
    let index = WeightedIndex::new(&weights).ok()?;
    items.into_iter().nth(index.sample(rng))
}
