use std::cmp::Ordering;

use minelog_types::{Record, SortDirection, SortSpec};

/// Stable, type-aware sort of a copy of `records`.
///
/// Records with a null value at the sort key go last in either direction.
pub fn sort<R: Record>(records: &[R], spec: &SortSpec) -> Vec<R> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare(a, b, spec));
    sorted
}

fn compare<R: Record>(a: &R, b: &R, spec: &SortSpec) -> Ordering {
    let left = a.value(&spec.key);
    let right = b.value(&spec.key);

    match (left.is_null(), right.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = left.compare(&right);
            match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}
