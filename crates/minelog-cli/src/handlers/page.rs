use crate::args::ViewArgs;
use crate::types::RangeArg;
use anyhow::Result;
use minelog_engine::CustomBounds;
use minelog_runtime::{Clock, Config, RecordPage};
use minelog_types::{RangeSelector, RecordStore};

/// Open a loaded page for `store` with the command-line range and search applied.
///
/// `--from`/`--to` imply a custom range; without any range flag the
/// configured default range is used.
pub fn open_page<S: RecordStore>(store: S, config: &Config, view: &ViewArgs) -> Result<RecordPage<S>> {
    let mut page = RecordPage::from_config(store, &config.view, Clock::Local)?;

    match selection(view) {
        Some((selector, custom)) => page.select_range(selector, custom)?,
        None => page.refresh()?,
    }
    if let Some(term) = &view.search {
        page.set_search(term.clone());
    }

    Ok(page)
}

fn selection(view: &ViewArgs) -> Option<(RangeSelector, Option<CustomBounds>)> {
    if view.from.is_some() || view.to.is_some() || view.range == Some(RangeArg::Custom) {
        return Some((
            RangeSelector::Custom,
            Some(CustomBounds::new(view.from, view.to)),
        ));
    }
    view.range.map(|range| (range.into(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_dates_imply_custom_range() {
        let view = ViewArgs {
            range: Some(RangeArg::Week),
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        let (selector, custom) = selection(&view).unwrap();
        assert_eq!(selector, RangeSelector::Custom);
        assert_eq!(custom.and_then(|c| c.end), None);
    }

    #[test]
    fn test_no_flags_uses_configured_default() {
        assert!(selection(&ViewArgs::default()).is_none());
    }
}
