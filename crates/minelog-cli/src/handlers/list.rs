use super::HandlerContext;
use super::page::open_page;
use crate::args::ViewArgs;
use crate::presentation::CommandResultViewModel;
use crate::presentation::views::RecordListView;
use anyhow::Result;
use minelog_runtime::Config;
use minelog_types::{PageSize, Record, RecordStore, SortDirection, SortSpec};

pub struct ListRequest {
    pub view: ViewArgs,
    pub sort: Option<String>,
    pub desc: bool,
    /// 1-based
    pub page: u32,
    pub page_size: Option<PageSize>,
}

pub fn handle<S: RecordStore>(
    ctx: &HandlerContext,
    store: S,
    config: &Config,
    request: &ListRequest,
) -> Result<()> {
    let mut page = open_page(store, config, &request.view)?;

    if let Some(size) = request.page_size {
        page.set_page_size(size);
    }
    if let Some(key) = &request.sort {
        let direction = if request.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        page.set_sort(SortSpec::new(key.as_str(), direction))?;
    }
    // Applied last: range, search, sort and size changes all reset the page
    page.set_page_index(request.page.saturating_sub(1) as usize);

    let rows = page.visible_rows()?;
    let sort = page.view().sort_spec().clone();
    let view = RecordListView {
        kind: <S::Record as Record>::KIND,
        range: page.effective_range().to_string(),
        search: page.view().search().to_string(),
        sort: sort.key,
        direction: sort.direction,
        page: rows,
        date_format: config.export.date_format.clone(),
    };

    ctx.render(CommandResultViewModel::new(view))
}
