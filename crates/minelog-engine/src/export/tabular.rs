use minelog_types::Record;

use crate::Result;

/// Serialize records using the schema's export columns.
///
/// One header row of column labels, then one row per record in input order.
pub fn write_csv<R: Record>(records: &[R], date_format: &str) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(R::COLUMNS.iter().map(|c| c.label))?;
    for record in records {
        writer.write_record(
            R::COLUMNS
                .iter()
                .map(|column| column.render(&record.value(column.field), date_format)),
        )?;
    }

    writer
        .into_inner()
        .map_err(|err| crate::Error::Io(err.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use minelog_types::ProductionRecord;

    #[test]
    fn test_empty_set_still_has_header() {
        let bytes = write_csv::<ProductionRecord>(&[], "%d/%m/%Y").unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "Date,Tonnage Crushed (t),Tonnage Hoisted (t),Recovery Rate (%),Efficiency (%),Gold Smelted (g),Notes\n"
        );
    }

    #[test]
    fn test_notes_with_commas_are_quoted() {
        let record = ProductionRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
            total_tonnage_crushed: 120.0,
            total_tonnage_hoisted: 118.25,
            gold_recovery_rate: 91.5,
            operational_efficiency: 87.0,
            gold_smelted: 44.5,
            notes: Some("Mill 2 down, partial shift".to_string()),
        };
        let text = String::from_utf8(write_csv(&[record], "%d/%m/%Y").unwrap()).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "09/01/2024,120.00,118.25,91.50,87.00,44.50,\"Mill 2 down, partial shift\""
        );
    }
}
