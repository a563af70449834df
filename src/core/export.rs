use crate::domain::model::HistoryRecord;
use crate::domain::ports::Storage;
use crate::utils::error::{MaintenanceError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ExportRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Electricity")]
    electricity: u64,
    #[serde(rename = "Water")]
    water: u64,
    #[serde(rename = "Watchman")]
    watchman: u64,
    #[serde(rename = "Garbage")]
    garbage: u64,
    #[serde(rename = "Flats")]
    flats: u32,
    #[serde(rename = "Total Expense")]
    total_expense: u64,
    #[serde(rename = "Per Flat")]
    per_flat: u64,
    #[serde(rename = "Total Collected")]
    total_collected: u64,
    #[serde(rename = "Surplus")]
    surplus: i64,
}

impl From<&HistoryRecord> for ExportRow {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            date: record.calculation_date.format("%b %Y").to_string(),
            electricity: record.electricity,
            water: record.water,
            watchman: record.watchman,
            garbage: record.garbage,
            flats: record.number_of_flats,
            total_expense: record.total_expense,
            per_flat: record.cost_per_flat,
            total_collected: record.total_collected,
            surplus: record.surplus,
        }
    }
}

/// One spreadsheet row per record, in the order given.
pub fn export_csv(records: &[HistoryRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if records.is_empty() {
        writer.write_record([
            "Date",
            "Electricity",
            "Water",
            "Watchman",
            "Garbage",
            "Flats",
            "Total Expense",
            "Per Flat",
            "Total Collected",
            "Surplus",
        ])?;
    }
    for record in records {
        writer.serialize(ExportRow::from(record))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MaintenanceError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| MaintenanceError::store(e.to_string()))
}

pub async fn write_export<S: Storage>(
    storage: &S,
    file_name: &str,
    records: &[HistoryRecord],
) -> Result<usize> {
    let content = export_csv(records)?;
    storage.write_file(file_name, content.as_bytes()).await?;
    tracing::info!("exported {} records to {}", records.len(), file_name);
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn record(id: &str, month: u32, surplus: i64) -> HistoryRecord {
        HistoryRecord {
            id: id.to_string(),
            calculation_date: NaiveDate::from_ymd_opt(2026, month, 16).unwrap(),
            electricity: 5000,
            water: 2000,
            watchman: 8000,
            garbage: 1500,
            number_of_flats: 12,
            total_expense: 16500,
            cost_per_flat: 1500,
            total_collected: 18000,
            surplus,
            created_at: Utc.with_ymd_and_hms(2026, month, 16, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_export_layout() {
        let csv = export_csv(&[record("a", 10, 1500), record("b", 9, -400)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Date,Electricity,Water,Watchman,Garbage,Flats,Total Expense,Per Flat,Total Collected,Surplus"
        );
        assert_eq!(lines[1], "Oct 2026,5000,2000,8000,1500,12,16500,1500,18000,1500");
        assert_eq!(lines[2], "Sep 2026,5000,2000,8000,1500,12,16500,1500,18000,-400");
    }

    #[test]
    fn test_empty_export_still_has_header() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(
            csv.trim_end(),
            "Date,Electricity,Water,Watchman,Garbage,Flats,Total Expense,Per Flat,Total Collected,Surplus"
        );
    }
}
