//! Assertions over the `{"content": ...}` JSON envelope.

use anyhow::{Context, Result};
use serde_json::Value;

fn rows(json: &Value) -> Result<&Vec<Value>> {
    json["content"]["rows"]
        .as_array()
        .context("Expected 'content.rows' array in JSON")
}

/// Assert the number of rows on the printed page.
pub fn assert_row_count(json: &Value, expected: usize) -> Result<()> {
    let rows = rows(json)?;
    if rows.len() != expected {
        anyhow::bail!("Expected {} rows, got {}", expected, rows.len());
    }
    Ok(())
}

/// Assert the number of records matching the filters, across all pages.
pub fn assert_total(json: &Value, expected: u64) -> Result<()> {
    let total = json["content"]["total"]
        .as_u64()
        .context("Expected 'content.total' number in JSON")?;
    if total != expected {
        anyhow::bail!("Expected {} matching records, got {}", expected, total);
    }
    Ok(())
}

/// `date` of every row on the page, in display order.
pub fn row_dates(json: &Value) -> Result<Vec<String>> {
    rows(json)?
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row["date"]
                .as_str()
                .map(String::from)
                .with_context(|| format!("Row {} missing date", i))
        })
        .collect()
}
