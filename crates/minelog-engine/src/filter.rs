use minelog_types::{DateRange, Record};

/// Narrow `records` to those dated inside `range` that match `search`.
///
/// Input order is preserved. An empty or whitespace-only term disables the
/// search predicate.
pub fn filter<R: Record>(records: &[R], range: &DateRange, search: &str) -> Vec<R> {
    let needle = search.trim().to_lowercase();
    let retained: Vec<R> = records
        .iter()
        .filter(|record| range.contains_date(record.date()))
        .filter(|record| needle.is_empty() || matches_needle(*record, &needle))
        .cloned()
        .collect();

    tracing::debug!(
        kind = %R::KIND,
        input = records.len(),
        retained = retained.len(),
        "filtered records"
    );
    retained
}

/// Case-insensitive substring match over the schema's searchable fields.
/// Null fields never match.
pub fn matches_search<R: Record>(record: &R, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    needle.is_empty() || matches_needle(record, &needle)
}

fn matches_needle<R: Record>(record: &R, needle: &str) -> bool {
    R::searchable_fields().any(|field| {
        record
            .value(field.name)
            .search_text()
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}
