use minelog_types::{ChemicalUsageRecord, EnergyUsageRecord, ProductionRecord, Record, ReferenceData};
use serde::Serialize;

/// Aggregates printed under the report title
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    pub lines: Vec<String>,
    /// Records left out of cost totals because their chemical has no catalog price
    pub unpriced: usize,
}

/// Record families with computable report aggregates
pub trait Summarize: Record {
    fn summarize(records: &[Self], reference: &ReferenceData) -> ReportSummary;
}

impl Summarize for ProductionRecord {
    fn summarize(records: &[Self], _reference: &ReferenceData) -> ReportSummary {
        let crushed: f64 = records.iter().map(|r| r.total_tonnage_crushed).sum();
        let smelted: f64 = records.iter().map(|r| r.gold_smelted).sum();
        ReportSummary {
            lines: vec![
                format!("Total Tonnage Crushed: {:.2} t", crushed),
                format!("Total Gold Smelted: {:.2} g", smelted),
            ],
            unpriced: 0,
        }
    }
}

impl Summarize for EnergyUsageRecord {
    fn summarize(records: &[Self], _reference: &ReferenceData) -> ReportSummary {
        let kwh: f64 = records.iter().map(|r| r.electricity_kwh).sum();
        let liters: f64 = records.iter().map(|r| r.diesel_liters).sum();
        let cost: f64 = records.iter().map(|r| r.total_cost).sum();
        ReportSummary {
            lines: vec![
                format!("Total Electricity: {:.2} kWh", kwh),
                format!("Total Diesel: {:.2} L", liters),
                format!("Total Cost: ${:.2}", cost),
            ],
            unpriced: 0,
        }
    }
}

impl Summarize for ChemicalUsageRecord {
    /// Cost is `unit_price * amount_used` per record, priced from the full
    /// catalog. Records whose chemical is missing are counted, not zeroed.
    fn summarize(records: &[Self], reference: &ReferenceData) -> ReportSummary {
        let mut total = 0.0;
        let mut unpriced = 0;
        for record in records {
            match reference.chemical(record.chemical.id) {
                Some(chemical) => total += chemical.unit_price * record.amount_used,
                None => unpriced += 1,
            }
        }

        let mut lines = vec![
            format!("Total Records: {}", records.len()),
            format!("Total Cost: ${:.2}", total),
        ];
        if unpriced > 0 {
            tracing::warn!(
                unpriced,
                "chemical usage records reference chemicals missing from the catalog"
            );
            lines.push(format!("{} record(s) without a unit price", unpriced));
        }

        ReportSummary { lines, unpriced }
    }
}
