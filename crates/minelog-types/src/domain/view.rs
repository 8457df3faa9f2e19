use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::Record;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Active sort key and direction of a view. Defaults to date, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: "date".to_string(),
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Build a spec after checking that `R` declares `key`
    pub fn for_schema<R: Record>(key: &str, direction: SortDirection) -> Result<Self> {
        R::require_field(key)?;
        Ok(Self::new(key, direction))
    }

    /// Header click: same key flips direction, a new key starts ascending
    pub fn toggled(&self, key: &str) -> Self {
        if self.key == key {
            Self::new(key, self.direction.flipped())
        } else {
            Self::new(key, SortDirection::Asc)
        }
    }
}

/// Allowed page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
}

impl PageSize {
    pub const OPTIONS: [usize; 3] = [10, 25, 50];

    pub fn get(self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            10 => Ok(PageSize::Ten),
            25 => Ok(PageSize::TwentyFive),
            50 => Ok(PageSize::Fifty),
            other => Err(Error::InvalidPageSize(other)),
        }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

/// Current page index and page size of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageSpec {
    pub index: usize,
    pub size: PageSize,
}

impl PageSpec {
    pub fn new(index: usize, size: PageSize) -> Self {
        Self { index, size }
    }

    pub fn first(size: PageSize) -> Self {
        Self { index: 0, size }
    }

    /// Half-open slice bounds, before clamping to a collection
    pub fn bounds(&self) -> (usize, usize) {
        let start = self.index.saturating_mul(self.size.get());
        (start, start.saturating_add(self.size.get()))
    }
}
