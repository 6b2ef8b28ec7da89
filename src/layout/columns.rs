use rand::Rng;

use crate::models::{Brand, CardSpec};

/// Number of columns in the desktop showcase.
pub const DEFAULT_COLUMN_COUNT: usize = 4;

/// One vertical column of the desktop showcase.
#[derive(Debug, Clone)]
pub struct ColumnModel {
    pub column_index: usize,
    pub cards: Vec<CardSpec>,
}

/// Round-robin partition: item `i` goes to bucket `i % column_count`.
///
/// Bucket sizes differ by at most one and each bucket keeps the relative
/// order of the input. Returns no buckets when `column_count` is zero.
pub fn partition<T: Clone>(items: &[T], column_count: usize) -> Vec<Vec<T>> {
    let mut buckets: Vec<Vec<T>> = (0..column_count)
        .map(|_| Vec::with_capacity(items.len() / column_count.max(1) + 1))
        .collect();
    if column_count == 0 {
        return buckets;
    }
    for (index, item) in items.iter().enumerate() {
        buckets[index % column_count].push(item.clone());
    }
    buckets
}

/// Builds desktop columns, assigning every card its intra-column index and
/// an independently drawn size class.
pub fn build_columns<R: Rng + ?Sized>(
    brands: &[Brand],
    column_count: usize,
    rng: &mut R,
) -> Vec<ColumnModel> {
    partition(brands, column_count)
        .into_iter()
        .enumerate()
        .map(|(column_index, bucket)| ColumnModel {
            column_index,
            cards: bucket
                .iter()
                .enumerate()
                .map(|(index, brand)| CardSpec::desktop(brand, index, rng))
                .collect(),
        })
        .collect()
}
