use minelog_types::{BrandingSettings, DateRange, Record, ReferenceData, ResolvedBranding};
use serde::Serialize;

use super::ExportOptions;
use crate::{ReportSummary, Summarize};

// A4 portrait, millimetres, origin at the top-left corner
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_X: f32 = 14.0;
const CONTINUATION_TOP: f32 = 20.0;
pub const TABLE_BOTTOM: f32 = 277.0;
const FOOTER_BASELINE: f32 = 287.0;

const LOGO_X: f32 = 14.0;
const LOGO_Y: f32 = 10.0;
const LOGO_SIZE: f32 = 30.0;
const BRAND_X: f32 = 50.0;

const CELL_FONT: f32 = 9.0;
const CELL_PADDING: f32 = 1.5;
const MIN_FLEX_WIDTH: f32 = 20.0;
const PT_TO_MM: f32 = 0.3528;

pub const GOLD: Rgb8 = Rgb8(218, 165, 32);
pub const BLACK: Rgb8 = Rgb8(0, 0, 0);
pub const GREY: Rgb8 = Rgb8(128, 128, 128);
pub const ROW_SHADE: Rgb8 = Rgb8(250, 250, 250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb8(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
}

/// Positioned drawing primitive. `y` is the text baseline for text and the
/// top edge for boxes, measured downwards from the top of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Element {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        color: Rgb8,
        align: Align,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgb8,
    },
    Logo {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Element tagged with the page region it belongs to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageElement {
    pub part: Part,
    pub element: Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Part {
    Header,
    Title,
    Summary,
    TableHeader,
    TableRow,
    Footer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportPage {
    pub elements: Vec<PageElement>,
}

impl ReportPage {
    fn push(&mut self, part: Part, element: Element) {
        self.elements.push(PageElement { part, element });
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match &e.element {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Render-independent layout of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub pages: Vec<ReportPage>,
    /// Body rows in the table, across all pages
    pub row_count: usize,
    pub summary: ReportSummary,
}

impl ReportDocument {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|p| p.texts())
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

fn text(x: f32, y: f32, size: f32, bold: bool, color: Rgb8, value: impl Into<String>) -> Element {
    Element::Text {
        x,
        y,
        size,
        bold,
        color,
        align: Align::Left,
        text: value.into(),
    }
}

/// Approximate Helvetica advance width in mm
pub fn text_width(value: &str, size: f32) -> f32 {
    value.chars().count() as f32 * size * PT_TO_MM * 0.5
}

fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * 1.2
}

/// Greedy word wrap to `width` mm. Words longer than a line are split.
fn wrap(value: &str, width: f32, size: f32) -> Vec<String> {
    let max_chars = ((width - 2.0 * CELL_PADDING) / (size * PT_TO_MM * 0.5)).floor();
    let max_chars = (max_chars as usize).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in value.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if !current.is_empty() && needed > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Fixed column widths; flexible columns share what is left of the page
fn column_widths<R: Record>() -> Vec<f32> {
    let available = PAGE_WIDTH - 2.0 * MARGIN_X;
    let fixed: f32 = R::COLUMNS.iter().filter_map(|c| c.width_mm).sum();
    let flexible = R::COLUMNS.iter().filter(|c| c.width_mm.is_none()).count();
    let share = if flexible == 0 {
        0.0
    } else {
        ((available - fixed) / flexible as f32).max(MIN_FLEX_WIDTH)
    };
    R::COLUMNS
        .iter()
        .map(|c| c.width_mm.unwrap_or(share))
        .collect()
}

struct TableRow {
    cells: Vec<Vec<String>>,
    height: f32,
}

impl TableRow {
    fn new(values: Vec<String>, widths: &[f32]) -> Self {
        Self::from_cells(
            values
                .iter()
                .zip(widths)
                .map(|(value, width)| wrap(value, *width, CELL_FONT))
                .collect(),
        )
    }

    fn from_cells(cells: Vec<Vec<String>>) -> Self {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let height = lines as f32 * line_height(CELL_FONT) + 2.0 * CELL_PADDING;
        Self { cells, height }
    }

    /// Whole text lines that fit in `space` mm, padding included
    fn lines_fitting(space: f32) -> usize {
        ((space - 2.0 * CELL_PADDING) / line_height(CELL_FONT)).floor().max(0.0) as usize
    }

    /// First `lines` lines of every cell, and the continuation
    fn split(self, lines: usize) -> (TableRow, TableRow) {
        let (head, tail): (Vec<_>, Vec<_>) = self
            .cells
            .into_iter()
            .map(|mut cell| {
                let tail = if cell.len() > lines {
                    cell.split_off(lines)
                } else {
                    Vec::new()
                };
                (cell, tail)
            })
            .unzip();
        (Self::from_cells(head), Self::from_cells(tail))
    }

    fn draw(&self, page: &mut ReportPage, part: Part, top: f32, widths: &[f32], fill: Option<Rgb8>, bold: bool) {
        let table_width: f32 = widths.iter().sum();
        if let Some(fill) = fill {
            page.push(
                part,
                Element::Rect {
                    x: MARGIN_X,
                    y: top,
                    width: table_width,
                    height: self.height,
                    fill,
                },
            );
        }

        let ascent = CELL_FONT * PT_TO_MM * 0.8;
        let mut x = MARGIN_X;
        for (lines, width) in self.cells.iter().zip(widths) {
            for (i, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let baseline = top + CELL_PADDING + ascent + i as f32 * line_height(CELL_FONT);
                page.push(part, text(x + CELL_PADDING, baseline, CELL_FONT, bold, BLACK, line.clone()));
            }
            x += width;
        }
    }
}

/// Lay out a report: branded header, title, period, summary, a table that
/// repeats its header on each page, and a footer on every page.
pub fn layout_report<R: Summarize>(
    records: &[R],
    range: &DateRange,
    branding: Option<&BrandingSettings>,
    reference: &ReferenceData,
    options: &ExportOptions,
    with_logo: bool,
) -> ReportDocument {
    let title = R::KIND.report_title().to_string();
    let summary = R::summarize(records, reference);
    let brand = ResolvedBranding::from_settings(branding);

    let mut pages = Vec::new();
    let mut page = ReportPage::default();

    // Branded header
    if with_logo {
        page.push(
            Part::Header,
            Element::Logo {
                x: LOGO_X,
                y: LOGO_Y,
                width: LOGO_SIZE,
                height: LOGO_SIZE,
            },
        );
    }
    page.push(Part::Header, text(BRAND_X, 22.0, 20.0, true, GOLD, &brand.name));
    page.push(Part::Header, text(BRAND_X, 30.0, 12.0, false, GOLD, &brand.tagline));
    let mut y = 37.0;
    page.push(Part::Header, text(BRAND_X, y, 10.0, false, GOLD, format!("Contact: {}", brand.email)));
    let optional_lines = [
        brand.phone.as_ref().map(|v| format!("Phone: {}", v)),
        brand.website.as_ref().map(|v| format!("Website: {}", v)),
        brand.address.as_ref().map(|v| format!("Address: {}", v)),
    ];
    for line in optional_lines.into_iter().flatten() {
        y += 6.0;
        page.push(Part::Header, text(BRAND_X, y, 10.0, false, GOLD, line));
    }
    let header_bottom = y.max(LOGO_Y + LOGO_SIZE);

    // Title, period and summary
    y = header_bottom + 12.0;
    page.push(Part::Title, text(MARGIN_X, y, 16.0, true, BLACK, &title));
    y += 8.0;
    page.push(Part::Title, text(MARGIN_X, y, 11.0, false, BLACK, format!("Period: {}", range)));
    for line in &summary.lines {
        y += 6.0;
        page.push(Part::Summary, text(MARGIN_X, y, 10.0, false, BLACK, line.clone()));
    }
    y += 6.0;

    // Table
    let widths = column_widths::<R>();
    let header = TableRow::new(R::COLUMNS.iter().map(|c| c.label.to_string()).collect(), &widths);
    header.draw(&mut page, Part::TableHeader, y, &widths, Some(GOLD), true);
    y += header.height;
    let page_capacity = TABLE_BOTTOM - CONTINUATION_TOP - header.height;

    for (index, record) in records.iter().enumerate() {
        let values = R::COLUMNS
            .iter()
            .map(|c| c.render(&record.value(c.field), &options.date_format))
            .collect();
        let mut row = TableRow::new(values, &widths);
        let shade = (index % 2 == 1).then_some(ROW_SHADE);

        // A row that fits on a fresh page moves there whole; taller rows are
        // split, filling the current page first.
        let mut fresh_page = false;
        while y + row.height > TABLE_BOTTOM {
            let fit = TableRow::lines_fitting(TABLE_BOTTOM - y);
            if row.height > page_capacity && fit > 0 {
                let (head, rest) = row.split(fit);
                head.draw(&mut page, Part::TableRow, y, &widths, shade, false);
                row = rest;
            } else if fresh_page {
                break;
            }
            pages.push(std::mem::take(&mut page));
            y = CONTINUATION_TOP;
            header.draw(&mut page, Part::TableHeader, y, &widths, Some(GOLD), true);
            y += header.height;
            fresh_page = true;
        }

        row.draw(&mut page, Part::TableRow, y, &widths, shade, false);
        y += row.height;
    }
    pages.push(page);

    // Footers, once the page count is known
    let total = pages.len();
    let stamp = options.generated_at.format("%d/%m/%Y %H:%M");
    for (i, page) in pages.iter_mut().enumerate() {
        page.push(
            Part::Footer,
            text(
                MARGIN_X,
                FOOTER_BASELINE,
                8.0,
                false,
                GREY,
                format!("Generated on {} - Page {} of {}", stamp, i + 1, total),
            ),
        );
        page.push(
            Part::Footer,
            Element::Text {
                x: PAGE_WIDTH / 2.0,
                y: FOOTER_BASELINE,
                size: 8.0,
                bold: false,
                color: GREY,
                align: Align::Center,
                text: title.clone(),
            },
        );
    }

    tracing::debug!(kind = %R::KIND, rows = records.len(), pages = total, "laid out report");

    ReportDocument {
        title,
        pages,
        row_count: records.len(),
        summary,
    }
}
