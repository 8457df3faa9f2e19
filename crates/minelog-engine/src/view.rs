use std::marker::PhantomData;

use chrono::NaiveDateTime;
use minelog_types::{DateRange, PageSize, PageSpec, RangeSelector, Record, SortSpec};
use serde::Serialize;

use crate::range::{CustomBounds, effective_range, resolve_at};
use crate::{Result, filter, page, page_count, sort};

/// One rendered page of a table view
#[derive(Debug, Clone, Serialize)]
pub struct ViewPage<R> {
    pub rows: Vec<R>,
    /// Records left after filtering, across all pages
    pub total: usize,
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
}

/// Filter, sort and paging state of one record page.
///
/// Every change to the range, search term, sort or page size returns the
/// view to its first page.
#[derive(Debug, Clone)]
pub struct TableView<R> {
    range: Option<DateRange>,
    search: String,
    sort: SortSpec,
    page: PageSpec,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Default for TableView<R> {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl<R: Record> TableView<R> {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            range: None,
            search: String::new(),
            sort: SortSpec::default(),
            page: PageSpec::first(page_size),
            _record: PhantomData,
        }
    }

    pub fn range(&self) -> Option<&DateRange> {
        self.range.as_ref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    pub fn page_spec(&self) -> PageSpec {
        self.page
    }

    /// Range actually used for fetching, filtering and export headers
    pub fn effective_range(&self, now: NaiveDateTime) -> DateRange {
        effective_range(self.range.as_ref(), now)
    }

    pub fn set_range(&mut self, range: DateRange) {
        self.range = Some(range);
        self.page.index = 0;
    }

    pub fn clear_range(&mut self) {
        self.range = None;
        self.page.index = 0;
    }

    /// Resolve and apply a selector. On error the current range is kept.
    pub fn select_range(
        &mut self,
        selector: RangeSelector,
        custom: Option<CustomBounds>,
        now: NaiveDateTime,
    ) -> Result<()> {
        let range = resolve_at(selector, custom, now)?;
        self.set_range(range);
        Ok(())
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page.index = 0;
    }

    pub fn set_sort(&mut self, spec: SortSpec) -> Result<()> {
        R::require_field(&spec.key)?;
        self.sort = spec;
        self.page.index = 0;
        Ok(())
    }

    /// Header click on `key`
    pub fn toggle_sort(&mut self, key: &str) -> Result<()> {
        let next = self.sort.toggled(key);
        self.set_sort(next)
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.page = PageSpec::first(size);
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.page.index = index;
    }

    /// Full filtered set in display order, ignoring paging. Exports use this.
    pub fn filtered(&self, snapshot: &[R], now: NaiveDateTime) -> Vec<R> {
        let range = self.effective_range(now);
        sort(&filter(snapshot, &range, &self.search), &self.sort)
    }

    /// Filter, sort and slice the current page out of `snapshot`
    pub fn apply(&self, snapshot: &[R], now: NaiveDateTime) -> ViewPage<R> {
        let ordered = self.filtered(snapshot, now);
        ViewPage {
            rows: page(&ordered, &self.page).to_vec(),
            total: ordered.len(),
            page_index: self.page.index,
            page_count: page_count(ordered.len(), self.page.size),
            page_size: self.page.size.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use minelog_types::{EnergyUsageRecord, SortDirection};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn records() -> Vec<EnergyUsageRecord> {
        (1..=31)
            .map(|d| EnergyUsageRecord {
                id: i64::from(d),
                date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
                electricity_kwh: 1000.0 + f64::from(d),
                electricity_cost: 10.0,
                diesel_liters: 5.0,
                diesel_cost: 2.0,
                total_cost: 12.0,
                notes: None,
            })
            .collect()
    }

    fn on_page_three() -> TableView<EnergyUsageRecord> {
        let mut view = TableView::new(PageSize::Ten);
        view.set_page_index(2);
        view
    }

    #[test]
    fn test_changes_reset_page_index() {
        let mut view = on_page_three();
        view.set_search("1001");
        assert_eq!(view.page_spec().index, 0);

        let mut view = on_page_three();
        view.select_range(RangeSelector::Last7Days, None, now()).unwrap();
        assert_eq!(view.page_spec().index, 0);

        let mut view = on_page_three();
        view.toggle_sort("total_cost").unwrap();
        assert_eq!(view.page_spec().index, 0);

        let mut view = on_page_three();
        view.set_page_size(PageSize::TwentyFive);
        assert_eq!(view.page_spec(), PageSpec::first(PageSize::TwentyFive));
    }

    #[test]
    fn test_incomplete_custom_range_keeps_previous_range() {
        let mut view: TableView<EnergyUsageRecord> = TableView::default();
        view.select_range(RangeSelector::Month, None, now()).unwrap();
        let before = view.range().copied();

        let only_start = CustomBounds::new(NaiveDate::from_ymd_opt(2024, 1, 3), None);
        assert!(
            view.select_range(RangeSelector::Custom, Some(only_start), now())
                .is_err()
        );
        assert_eq!(view.range().copied(), before);
    }

    #[test]
    fn test_unknown_sort_key_is_rejected() {
        let mut view: TableView<EnergyUsageRecord> = TableView::default();
        assert!(view.toggle_sort("gold_smelted").is_err());
        assert_eq!(view.sort_spec(), &SortSpec::default());
    }

    #[test]
    fn test_apply_reports_total_and_page_count() {
        let mut view: TableView<EnergyUsageRecord> = TableView::new(PageSize::Ten);
        view.select_range(RangeSelector::Last30Days, None, now()).unwrap();
        view.set_sort(SortSpec::new("date", SortDirection::Asc)).unwrap();
        view.set_page_index(2);

        let page = view.apply(&records(), now());

        // 2024-01-02 .. 2024-01-31
        assert_eq!(page.total, 30);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.rows.len(), 10);
        assert_eq!(page.rows[0].id, 22);
    }

    #[test]
    fn test_last7days_scenario() {
        let mut view: TableView<EnergyUsageRecord> = TableView::new(PageSize::Fifty);
        view.select_range(RangeSelector::Last7Days, None, now()).unwrap();

        let page = view.apply(&records(), now());

        let mut days: Vec<_> = page.rows.iter().map(|r| r.id).collect();
        days.sort_unstable();
        assert_eq!(days, (25..=31).collect::<Vec<_>>());
    }
}
