use minelog_types::{PageSize, PageSpec};

/// Slice `[index * size, index * size + size)` of `records`, clamped to its
/// length. Pages past the end are empty.
pub fn page<'a, T>(records: &'a [T], spec: &PageSpec) -> &'a [T] {
    let (start, end) = spec.bounds();
    let start = start.min(records.len());
    let end = end.min(records.len());
    &records[start..end]
}

/// Number of pages needed for `len` records
pub fn page_count(len: usize, size: PageSize) -> usize {
    len.div_ceil(size.get())
}
