// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::aggregator::{aggregate_totals, AreaRow, LevelFilter};
use crate::facility::FacilityTable;
use crate::insight::format_count;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `Area`, `Level` and `Total` are added to every source row.
pub const DERIVED_COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub source_path: Option<PathBuf>,
    pub loaded_at: DateTime<Utc>,
    pub row_count: usize,
    pub column_count: usize,
    pub total_facilities: u64,
    pub top_governorate: Option<AreaRow>,
    pub top_district: Option<AreaRow>,
    pub avg_per_governorate: Option<u64>,
    pub avg_per_district: Option<u64>,
}
impl DatasetSummary {
    pub fn from_table(table: &FacilityTable) -> Self {
        let governorates = aggregate_totals(table, LevelFilter::Governorate);
        let districts = aggregate_totals(table, LevelFilter::District);
        let metadata = table.metadata();
        Self {
            source_path: metadata.source_path.clone(),
            loaded_at: metadata.loaded_at,
            row_count: metadata.row_count,
            column_count: metadata.column_count + DERIVED_COLUMNS,
            total_facilities: table.total_facilities(),
            top_governorate: governorates.rows.first().cloned(),
            top_district: districts.rows.first().cloned(),
            avg_per_governorate: governorates.average(),
            avg_per_district: districts.average(),
        }
    }
    /// `"<path>, loaded <timestamp>"`, or just the timestamp for in-memory data.
    pub fn provenance(&self) -> String {
        let loaded = self.loaded_at.format("%Y-%m-%d %H:%M:%S UTC");
        match &self.source_path {
            Some(path) => format!("{}, loaded {loaded}", path.display()),
            None => format!("in-memory table, loaded {loaded}"),
        }
    }
    pub fn description(&self) -> String {
        format!(
            "This dataset contains {} rows and {} columns. It includes the number of hotels, cafes, \
guest houses, and restaurants across Lebanon's governorates and districts. Each row represents \
an area with a breakdown of facility counts and a computed total.",
            format_count(self.row_count as u64),
            format_count(self.column_count as u64)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::{FacilityCounts, FacilityRecord, Level, TableMetadata};
    use chrono::TimeZone;

    #[test]
    fn summary_carries_source_and_load_time() {
        let loaded_at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let table = FacilityTable::new(
            vec![FacilityRecord::new("Beirut", Level::Governorate, FacilityCounts::new(1, 2, 3, 4))],
            TableMetadata {
                source_path: Some(PathBuf::from("data/lebanon.csv")),
                row_count: 1,
                column_count: 5,
                loaded_at,
            },
        );
        let summary = DatasetSummary::from_table(&table);
        assert_eq!(summary.loaded_at, loaded_at);
        assert_eq!(summary.provenance(), "data/lebanon.csv, loaded 2024-05-01 08:30:00 UTC");
        assert_eq!(summary.column_count, 8);
        assert_eq!(summary.avg_per_district, None);
    }
}
