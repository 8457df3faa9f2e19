use chrono::{NaiveDate, NaiveDateTime};
use minelog_engine::{CustomBounds, ExportFormat, ExportOptions};
use minelog_index::{Database, SqliteRecordStore};
use minelog_runtime::{
    Clock, Error, FormState, MemorySink, RecordPage, Result, Snapshot, ViewConfig,
};
use minelog_types::{
    Chemical, ChemicalUsageRecord, NewChemical, NewChemicalUsage, PageSize, ProductionRecord,
    RangeQuery, RangeSelector, RecordKey, RecordStore,
};
use std::fmt;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn noon_feb_first() -> NaiveDateTime {
    date(2024, 2, 1).and_hms_opt(12, 0, 0).unwrap()
}

fn production(day: NaiveDate, crushed: f64) -> ProductionRecord {
    ProductionRecord {
        date: day,
        total_tonnage_crushed: crushed,
        total_tonnage_hoisted: crushed + 10.0,
        gold_recovery_rate: 91.5,
        operational_efficiency: 88.0,
        gold_smelted: crushed / 10.0,
        notes: None,
    }
}

/// Production rows for every day of January 2024 plus February 1st
fn seeded_db() -> Database {
    let db = Database::open_in_memory().unwrap();
    for d in 1..=31 {
        db.insert_production(&production(date(2024, 1, d), 100.0 + f64::from(d)))
            .unwrap();
    }
    db.insert_production(&production(date(2024, 2, 1), 200.0)).unwrap();
    db
}

fn last_seven_days(db: &Database) -> RecordPage<SqliteRecordStore<'_, ProductionRecord>> {
    let config = ViewConfig {
        default_range: RangeSelector::Last7Days,
        page_size: PageSize::Ten,
    };
    RecordPage::from_config(
        SqliteRecordStore::new(db),
        &config,
        Clock::Fixed(noon_feb_first()),
    )
    .unwrap()
}

#[test]
fn test_refresh_fetches_effective_range() -> Result<()> {
    // Given: a page opened on "last 7 days" at noon on Feb 1st
    let db = seeded_db();
    let mut page = last_seven_days(&db);

    // When: it loads
    page.refresh()?;

    // Then: Jan 25 .. Feb 1 are visible, newest first
    let view = page.visible_rows()?;
    assert_eq!(view.total, 8);
    assert_eq!(view.rows.first().map(|r| r.date), Some(date(2024, 2, 1)));
    assert_eq!(view.rows.last().map(|r| r.date), Some(date(2024, 1, 25)));
    Ok(())
}

#[test]
fn test_visible_rows_before_refresh_is_an_error() {
    let db = seeded_db();
    let page = last_seven_days(&db);
    assert!(matches!(page.visible_rows(), Err(Error::FetchFailed(_))));
}

#[test]
fn test_duplicate_create_keeps_form_and_snapshot() -> Result<()> {
    // Given: a loaded page with the create form open
    let db = seeded_db();
    let mut page = last_seven_days(&db);
    page.refresh()?;
    let before = page.snapshot().clone();
    page.open_create_form();

    // When: a record for an already-recorded day is submitted
    let result = page.submit_create(production(date(2024, 1, 30), 1.0));

    // Then: the error lands on the still-open form and nothing else changes
    match result {
        Err(Error::MutationFailed(msg)) => {
            assert_eq!(msg, "A record for this date already exists")
        }
        other => panic!("expected MutationFailed, got {:?}", other.map(|_| ())),
    }
    assert_eq!(
        page.form().error(),
        Some("A record for this date already exists")
    );
    assert_eq!(page.snapshot(), &before);
    Ok(())
}

#[test]
fn test_successful_create_refetches_and_closes_form() -> Result<()> {
    let db = Database::open_in_memory()?;
    let mut page = RecordPage::new(SqliteRecordStore::<ProductionRecord>::new(&db), PageSize::Ten)
        .with_clock(Clock::Fixed(noon_feb_first()));
    page.refresh()?;
    assert_eq!(page.visible_rows()?.total, 0);

    page.open_create_form();
    page.submit_create(production(date(2024, 1, 31), 150.0))?;

    assert_eq!(page.form(), &FormState::Closed);
    assert_eq!(page.visible_rows()?.total, 1);
    Ok(())
}

#[test]
fn test_update_through_edit_form() -> Result<()> {
    let db = seeded_db();
    let mut page = last_seven_days(&db);
    page.refresh()?;

    let mut record = page.visible_rows()?.rows[0].clone();
    page.open_edit_form(record.clone());
    record.notes = Some("belt replaced".to_string());
    page.submit_update(record)?;

    assert!(!page.form().is_open());
    page.set_search("belt");
    let view = page.visible_rows()?;
    assert_eq!(view.total, 1);
    assert_eq!(view.rows[0].date, date(2024, 2, 1));
    Ok(())
}

#[test]
fn test_failed_delete_sets_table_error() -> Result<()> {
    let db = seeded_db();
    let mut page = last_seven_days(&db);
    page.refresh()?;

    let err = page
        .delete(&RecordKey::Date(date(2023, 6, 1)))
        .unwrap_err();
    assert!(matches!(err, Error::MutationFailed(_)));
    assert_eq!(page.table_error(), Some("production 2023-06-01: record not found"));
    assert_eq!(page.visible_rows()?.total, 8);

    page.delete(&RecordKey::Date(date(2024, 1, 30)))?;
    assert_eq!(page.table_error(), None);
    assert_eq!(page.visible_rows()?.total, 7);
    Ok(())
}

#[test]
fn test_incomplete_custom_range_changes_nothing() -> Result<()> {
    let db = seeded_db();
    let mut page = last_seven_days(&db);
    page.refresh()?;
    let range_before = page.effective_range();

    let only_start = CustomBounds::new(Some(date(2024, 1, 3)), None);
    assert!(page
        .select_range(RangeSelector::Custom, Some(only_start))
        .is_err());

    assert_eq!(page.effective_range(), range_before);
    assert_eq!(page.visible_rows()?.total, 8);
    Ok(())
}

#[test]
fn test_custom_range_refetches() -> Result<()> {
    let db = seeded_db();
    let mut page = last_seven_days(&db);

    let bounds = CustomBounds::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 15)));
    page.select_range(RangeSelector::Custom, Some(bounds))?;

    let view = page.visible_rows()?;
    assert_eq!(view.total, 15);
    assert_eq!(view.page_count, 2);
    Ok(())
}

#[derive(Debug)]
struct Offline;

impl fmt::Display for Offline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("record store offline")
    }
}

impl std::error::Error for Offline {}

struct OfflineStore;

impl RecordStore for OfflineStore {
    type Record = ProductionRecord;
    type Draft = ProductionRecord;
    type Error = Offline;

    fn fetch(&self, _query: &RangeQuery) -> std::result::Result<Vec<ProductionRecord>, Offline> {
        Err(Offline)
    }

    fn create(&self, _draft: ProductionRecord) -> std::result::Result<ProductionRecord, Offline> {
        Err(Offline)
    }

    fn update(&self, _record: ProductionRecord) -> std::result::Result<ProductionRecord, Offline> {
        Err(Offline)
    }

    fn delete(&self, _key: &RecordKey) -> std::result::Result<(), Offline> {
        Err(Offline)
    }
}

#[test]
fn test_fetch_failure_shows_no_rows() {
    let mut page = RecordPage::new(OfflineStore, PageSize::Ten);

    let err = page.refresh().unwrap_err();
    assert!(matches!(err, Error::FetchFailed(ref msg) if msg == "record store offline"));
    assert_eq!(
        page.snapshot(),
        &Snapshot::Failed("record store offline".to_string())
    );
    assert!(page.visible_rows().is_err());

    let mut sink = MemorySink::default();
    assert!(page
        .export_csv(&mut sink, &ExportOptions::new(noon_feb_first()))
        .is_err());
    assert!(sink.files.is_empty());
}

#[test]
fn test_exports_project_filtered_rows() -> Result<()> {
    let db = seeded_db();
    let mut page = last_seven_days(&db);
    page.refresh()?;
    page.set_page_index(3);

    let mut sink = MemorySink::default();
    let options = ExportOptions::new(noon_feb_first());
    let name = page.export_csv(&mut sink, &options)?;
    page.export_pdf(&mut sink, None, &options)?;

    assert_eq!(name, "production_2024-02-01.csv");
    let csv = String::from_utf8(sink.files[0].bytes.clone()).unwrap();
    // header plus every filtered row, regardless of the current page
    assert_eq!(csv.lines().count(), 9);
    assert_eq!(sink.files[1].format, ExportFormat::Pdf);
    assert!(sink.files[1].bytes.starts_with(b"%PDF"));
    Ok(())
}

#[test]
fn test_chemical_usage_adjusts_stock_and_prices_report() -> Result<()> {
    let db = Database::open_in_memory()?;
    let cyanide: Chemical = db.insert_chemical(&NewChemical {
        name: "Sodium Cyanide".to_string(),
        unit: "kg".to_string(),
        current_stock: 500.0,
        minimum_required: 100.0,
        unit_price: 3.0,
    })?;

    let mut page: RecordPage<SqliteRecordStore<'_, ChemicalUsageRecord>> =
        RecordPage::new(SqliteRecordStore::new(&db), PageSize::Ten)
            .with_clock(Clock::Fixed(noon_feb_first()));
    page.submit_create(NewChemicalUsage {
        date: date(2024, 1, 31),
        chemical_id: cyanide.id,
        amount_used: 40.0,
        process: "Leaching".to_string(),
        notes: None,
    })?;

    assert_eq!(page.visible_rows()?.total, 1);
    let stock = db.get_chemical(cyanide.id)?.map(|c| c.current_stock);
    assert_eq!(stock, Some(460.0));

    let mut sink = MemorySink::default();
    page.export_pdf(&mut sink, None, &ExportOptions::new(noon_feb_first()))?;
    assert_eq!(sink.files[0].file_name, "chemical_usage_2024-02-01.pdf");
    Ok(())
}
