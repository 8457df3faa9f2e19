use chrono::{NaiveDate, NaiveDateTime};
use minelog_engine::{CustomBounds, TableView, effective_range, filter, page, page_count, resolve_at, sort};
use minelog_types::{
    DateRange, PageSize, PageSpec, ProductionRecord, RangeSelector, SortDirection, SortSpec,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn noon(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(12, 0, 0).unwrap()
}

fn january() -> Vec<ProductionRecord> {
    (1..=31)
        .map(|d| ProductionRecord {
            date: date(2024, 1, d),
            total_tonnage_crushed: 100.0 + f64::from(d),
            total_tonnage_hoisted: 95.0,
            gold_recovery_rate: 90.0 + f64::from(d % 5),
            operational_efficiency: 85.0,
            gold_smelted: f64::from(d % 4) * 10.0,
            notes: match d % 3 {
                0 => Some(format!("Shift report {d}")),
                1 => None,
                _ => Some("Conveyor maintenance".to_string()),
            },
        })
        .collect()
}

#[test]
fn test_last7days_scenario_from_first_of_february() {
    // Given: records for every day of January 2024
    let records = january();
    let now = noon(date(2024, 2, 1));

    // When: resolving last7days on 2024-02-01 and filtering
    let range = resolve_at(RangeSelector::Last7Days, None, now).unwrap();
    let kept = filter(&records, &range, "");

    // Then: the window is 2024-01-25 .. 2024-02-01
    assert_eq!(range.start().date(), date(2024, 1, 25));
    assert_eq!(range.end().date(), date(2024, 2, 1));
    let days: Vec<_> = kept.iter().map(|r| r.date).collect();
    assert_eq!(days, (25..=31).map(|d| date(2024, 1, d)).collect::<Vec<_>>());
}

#[test]
fn test_every_filtered_record_lies_in_range() {
    let records = january();
    let now = noon(date(2024, 2, 1));

    for selector in [
        RangeSelector::Today,
        RangeSelector::Week,
        RangeSelector::Month,
        RangeSelector::Last7Days,
        RangeSelector::Last30Days,
    ] {
        let range = resolve_at(selector, None, now).unwrap();
        for record in filter(&records, &range, "") {
            assert!(range.contains_date(record.date), "{selector} kept {}", record.date);
        }
    }
}

#[test]
fn test_search_result_is_subset_of_unsearched() {
    let records = january();
    let range = DateRange::from_dates(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
    let all = filter(&records, &range, "");

    for term in ["conveyor", "SHIFT", "2024-01-2", "12", "report 9", "nothing here"] {
        let narrowed = filter(&records, &range, term);
        assert!(narrowed.len() <= all.len());
        assert!(narrowed.iter().all(|r| all.contains(r)), "term {term}");
    }
}

#[test]
fn test_nulls_trail_after_sorting_notes() {
    let records = january();
    for direction in [SortDirection::Asc, SortDirection::Desc] {
        let sorted = sort(&records, &SortSpec::new("notes", direction));
        let first_null = sorted.iter().position(|r| r.notes.is_none()).unwrap();
        assert!(sorted[first_null..].iter().all(|r| r.notes.is_none()));
    }
}

#[test]
fn test_sort_is_idempotent_for_every_field() {
    let records = january();
    for field in ["date", "total_tonnage_crushed", "gold_recovery_rate", "gold_smelted", "notes"] {
        let spec = SortSpec::new(field, SortDirection::Desc);
        let once = sort(&records, &spec);
        assert_eq!(sort(&once, &spec), once, "field {field}");
    }
}

#[test]
fn test_paging_properties() {
    let records = january();
    for size in [PageSize::Ten, PageSize::TwentyFive, PageSize::Fifty] {
        let n = size.get();
        assert_eq!(page(&records, &PageSpec::first(size)).len(), n.min(records.len()));

        let past_end = PageSpec::new(page_count(records.len(), size), size);
        assert!(page(&records, &past_end).is_empty());
    }
}

#[test]
fn test_incomplete_custom_range_is_a_no_op() -> Result<(), minelog_engine::Error> {
    // Given: a view on the current month
    let now = noon(date(2024, 1, 20));
    let mut view: TableView<ProductionRecord> = TableView::new(PageSize::Ten);
    view.select_range(RangeSelector::Month, None, now)?;
    let before = *view.range().unwrap();

    // When: the user picks only a start date
    let result = view.select_range(
        RangeSelector::Custom,
        Some(CustomBounds::new(Some(date(2024, 1, 2)), None)),
        now,
    );

    // Then: the active range is unchanged
    assert!(result.is_err());
    assert_eq!(view.range(), Some(&before));
    Ok(())
}

#[test]
fn test_view_without_range_uses_fallback_everywhere() {
    let now = noon(date(2024, 2, 10));
    let view: TableView<ProductionRecord> = TableView::default();

    assert_eq!(view.effective_range(now), effective_range(None, now));

    let shown = view.apply(&january(), now);
    // 2024-01-11 .. 2024-01-31
    assert_eq!(shown.total, 21);
}
