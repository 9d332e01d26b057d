//! Derived views over slice data
//!
//! Pure functions from row slices to chart/table-ready structures. The slices
//! wrap them in a [`slice_store::Memo`] keyed by query and store revisions.

pub mod assessments;
pub mod class_size;
pub mod finance;
pub mod outcomes;
pub mod staff;

use std::collections::BTreeMap;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum `value_of` per `group_of`, preserving first-seen group order
fn sum_by<T, K, G, V>(rows: &[T], group_of: G, value_of: V) -> Vec<(K, f64)>
where
    K: Ord + Clone,
    G: Fn(&T) -> K,
    V: Fn(&T) -> f64,
{
    let mut order = Vec::new();
    let mut sums: BTreeMap<K, f64> = BTreeMap::new();
    for row in rows {
        let key = group_of(row);
        let entry = sums.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            0.0
        });
        *entry += value_of(row);
    }
    order
        .into_iter()
        .map(|key| {
            let total = sums.get(&key).copied().unwrap_or_default();
            (key, total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_by_keeps_first_seen_order() {
        let rows = [(2, 1.5), (1, 2.0), (2, 3.0)];
        let sums = sum_by(&rows, |r| r.0, |r| r.1);
        assert_eq!(sums, vec![(2, 4.5), (1, 2.0)]);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.3456), 12.35);
    }
}
