use chrono::{Local, NaiveDateTime};
use minelog_engine::{
    CustomBounds, ExportOptions, Summarize, TableView, ViewPage, export_csv, export_pdf,
};
use minelog_types::{
    BrandingSettings, DateRange, PageSize, RangeSelector, Record, RecordKey, RecordStore,
    SortSpec,
};

use crate::config::ViewConfig;
use crate::sink::DownloadSink;
use crate::{Error, Result};

/// Source of "now" for range resolution and export stamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    Local,
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::Local => Local::now().naive_local(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Last fetch outcome; replaced wholesale by every refresh
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot<R> {
    NotLoaded,
    Loaded(Vec<R>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState<R> {
    Closed,
    Create { error: Option<String> },
    Edit { record: R, error: Option<String> },
}

impl<R> FormState<R> {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::Closed)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FormState::Closed => None,
            FormState::Create { error } | FormState::Edit { error, .. } => error.as_deref(),
        }
    }
}

/// One record family's page: a store, its table view and the open form.
///
/// Mutations are never applied locally. A successful create, update or
/// delete refetches from the store; a failed one leaves every piece of
/// page state as it was and records the message where the user acted.
pub struct RecordPage<S: RecordStore> {
    store: S,
    view: TableView<S::Record>,
    snapshot: Snapshot<S::Record>,
    form: FormState<S::Record>,
    table_error: Option<String>,
    clock: Clock,
}

impl<S: RecordStore> RecordPage<S> {
    pub fn new(store: S, page_size: PageSize) -> Self {
        Self {
            store,
            view: TableView::new(page_size),
            snapshot: Snapshot::NotLoaded,
            form: FormState::Closed,
            table_error: None,
            clock: Clock::Local,
        }
    }

    /// Page opened with the configured page size and default range, not yet fetched
    pub fn from_config(store: S, config: &ViewConfig, clock: Clock) -> Result<Self> {
        let mut page = Self::new(store, config.page_size).with_clock(clock);
        page.view
            .select_range(config.default_range, None, clock.now())?;
        Ok(page)
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &TableView<S::Record> {
        &self.view
    }

    pub fn snapshot(&self) -> &Snapshot<S::Record> {
        &self.snapshot
    }

    pub fn form(&self) -> &FormState<S::Record> {
        &self.form
    }

    pub fn table_error(&self) -> Option<&str> {
        self.table_error.as_deref()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn effective_range(&self) -> DateRange {
        self.view.effective_range(self.now())
    }

    pub fn refresh(&mut self) -> Result<()> {
        let query = self.effective_range().to_query();
        match self.store.fetch(&query) {
            Ok(records) => {
                tracing::debug!(
                    kind = %<S::Record as Record>::KIND,
                    fetched = records.len(),
                    "snapshot replaced"
                );
                self.snapshot = Snapshot::Loaded(records);
                Ok(())
            }
            Err(err) => {
                let message = err.to_string();
                self.snapshot = Snapshot::Failed(message.clone());
                Err(Error::FetchFailed(message))
            }
        }
    }

    /// Apply a selector and refetch. An invalid custom range changes nothing.
    pub fn select_range(
        &mut self,
        selector: RangeSelector,
        custom: Option<CustomBounds>,
    ) -> Result<()> {
        let now = self.now();
        self.view.select_range(selector, custom, now)?;
        self.refresh()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.view.set_search(term);
    }

    pub fn set_sort(&mut self, spec: SortSpec) -> Result<()> {
        Ok(self.view.set_sort(spec)?)
    }

    pub fn toggle_sort(&mut self, key: &str) -> Result<()> {
        Ok(self.view.toggle_sort(key)?)
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.view.set_page_size(size);
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.view.set_page_index(index);
    }

    pub fn open_create_form(&mut self) {
        self.form = FormState::Create { error: None };
    }

    pub fn open_edit_form(&mut self, record: S::Record) {
        self.form = FormState::Edit {
            record,
            error: None,
        };
    }

    pub fn close_form(&mut self) {
        self.form = FormState::Closed;
    }

    pub fn submit_create(&mut self, draft: S::Draft) -> Result<S::Record> {
        match self.store.create(draft) {
            Ok(created) => {
                self.after_mutation()?;
                Ok(created)
            }
            Err(err) => Err(self.reject_form(err.to_string())),
        }
    }

    pub fn submit_update(&mut self, record: S::Record) -> Result<S::Record> {
        match self.store.update(record) {
            Ok(updated) => {
                self.after_mutation()?;
                Ok(updated)
            }
            Err(err) => Err(self.reject_form(err.to_string())),
        }
    }

    pub fn delete(&mut self, key: &RecordKey) -> Result<()> {
        match self.store.delete(key) {
            Ok(()) => {
                self.table_error = None;
                self.after_mutation()
            }
            Err(err) => {
                let message = err.to_string();
                self.table_error = Some(message.clone());
                Err(Error::MutationFailed(message))
            }
        }
    }

    /// Closes the form before refetching; a failed refetch leaves it closed.
    fn after_mutation(&mut self) -> Result<()> {
        self.form = FormState::Closed;
        self.refresh()
    }

    fn reject_form(&mut self, message: String) -> Error {
        match &mut self.form {
            FormState::Create { error } | FormState::Edit { error, .. } => {
                *error = Some(message.clone());
            }
            FormState::Closed => {}
        }
        Error::MutationFailed(message)
    }

    fn loaded(&self) -> Result<&[S::Record]> {
        match &self.snapshot {
            Snapshot::Loaded(records) => Ok(records),
            Snapshot::Failed(message) => Err(Error::FetchFailed(message.clone())),
            Snapshot::NotLoaded => Err(Error::FetchFailed(
                "records have not been loaded".to_string(),
            )),
        }
    }

    /// Current page of the filtered, sorted snapshot
    pub fn visible_rows(&self) -> Result<ViewPage<S::Record>> {
        let records = self.loaded()?;
        Ok(self.view.apply(records, self.now()))
    }

    /// Every row matching the range and search, in display order
    pub fn filtered_rows(&self) -> Result<Vec<S::Record>> {
        let records = self.loaded()?;
        Ok(self.view.filtered(records, self.now()))
    }

    pub fn export_csv(
        &self,
        sink: &mut dyn DownloadSink,
        options: &ExportOptions,
    ) -> Result<String> {
        let rows = self.filtered_rows()?;
        let file = export_csv(&rows, options)?;
        sink.deliver(file)
    }
}

impl<S: RecordStore> RecordPage<S>
where
    S::Record: Summarize,
{
    pub fn export_pdf(
        &self,
        sink: &mut dyn DownloadSink,
        branding: Option<&BrandingSettings>,
        options: &ExportOptions,
    ) -> Result<String> {
        let rows = self.filtered_rows()?;
        let reference = self
            .store
            .reference_data()
            .map_err(|e| Error::FetchFailed(e.to_string()))?;
        let file = export_pdf(
            &rows,
            &self.effective_range(),
            branding,
            &reference,
            options,
        )?;
        sink.deliver(file)
    }
}
