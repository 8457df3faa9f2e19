use crate::domain::{BrandingSettings, RangeQuery, Record, RecordKey, ReferenceData};

/// CRUD boundary for one record family.
///
/// Implementations return fresh snapshots; callers never expect a store to
/// mutate records they already hold.
pub trait RecordStore {
    type Record: Record;

    /// Fields supplied when creating a record, before the store assigns identity
    type Draft;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Records whose date lies within `[query.from, query.to]`
    fn fetch(&self, query: &RangeQuery) -> Result<Vec<Self::Record>, Self::Error>;

    fn create(&self, draft: Self::Draft) -> Result<Self::Record, Self::Error>;

    /// Replace the stored record sharing `record.key()`
    fn update(&self, record: Self::Record) -> Result<Self::Record, Self::Error>;

    fn delete(&self, key: &RecordKey) -> Result<(), Self::Error>;

    /// Reference lists needed by report summaries
    fn reference_data(&self) -> Result<ReferenceData, Self::Error> {
        Ok(ReferenceData::default())
    }
}

/// Read-only source of branding settings. `Ok(None)` means nothing is
/// configured, which is valid.
pub trait BrandingProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn read(&self) -> Result<Option<BrandingSettings>, Self::Error>;
}
