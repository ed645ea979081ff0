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

//! Reads the raw facility table and normalizes it into [`FacilityRecord`]s.
//!
//! Every column is read as text so that a stray non-numeric cell never fails
//! the CSV parse; count cells are coerced afterwards.

use crate::config::ExplorerConfig;
use crate::error::{LoadError, LoadResult};
use crate::facility::{
    FacilityCounts, FacilityRecord, FacilityTable, FacilityType, Level, TableMetadata,
};
use chrono::Utc;
use polars::prelude::{CsvReadOptions, DataFrame, DataType, SerReader, Series};
use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct Loader {
    config: ExplorerConfig,
}
impl Loader {
    pub fn new() -> Self {
        Self {
            config: ExplorerConfig::default(),
        }
    }
    pub fn with_config(config: ExplorerConfig) -> Self {
        Self { config }
    }
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }
    /// Loads the file named by the configuration's `data_path`.
    pub fn load(&self) -> LoadResult<FacilityTable> {
        self.load_csv(&self.config.data_path)
    }
    pub fn load_csv<P: AsRef<Path>>(&self, path: P) -> LoadResult<FacilityTable> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::SourceFile {
            path: path.display().to_string(),
            source,
        })?;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|source| LoadError::Csv {
                path: path.display().to_string(),
                source,
            })?;
        self.normalize_dataframe(&df, Some(path.to_path_buf()))
    }
    pub fn load_csv_str(&self, csv_text: &str) -> LoadResult<FacilityTable> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(csv_text.as_bytes().to_vec()))
            .finish()
            .map_err(|source| LoadError::Csv {
                path: "<inline>".to_string(),
                source,
            })?;
        self.normalize_dataframe(&df, None)
    }
    pub fn normalize_dataframe(
        &self,
        df: &DataFrame,
        source_path: Option<PathBuf>,
    ) -> LoadResult<FacilityTable> {
        let columns = &self.config.columns;
        let locations = text_column(df, &columns.location)?;
        let mut counts = Vec::with_capacity(FacilityType::ALL.len());
        let mut coerced = 0usize;
        for facility in FacilityType::ALL {
            let cells = text_column(df, columns.count_column(facility))?;
            let column_name = columns.count_column(facility).trim().to_string();
            let values = cells
                .str()
                .map_err(|source| LoadError::ColumnRead {
                    column: column_name,
                    source,
                })?
                .into_iter()
                .map(|cell| {
                    parse_count(cell).unwrap_or_else(|| {
                        coerced += 1;
                        0
                    })
                })
                .collect::<Vec<u64>>();
            counts.push((facility, values));
        }
        if coerced > 0 {
            warn!(cells = coerced, "Coerced non-numeric facility counts to zero");
        }

        let location_values = locations.str().map_err(|source| LoadError::ColumnRead {
            column: columns.location.trim().to_string(),
            source,
        })?;
        let mut records = Vec::with_capacity(df.height());
        for (row, location) in location_values.into_iter().enumerate() {
            let location = location.ok_or_else(|| LoadError::MissingLocation {
                row: row + 1,
                column: columns.location.trim().to_string(),
            })?;
            let mut row_counts = FacilityCounts::default();
            for (facility, values) in &counts {
                row_counts.add(*facility, values[row]);
            }
            let level = classify_level(location, &self.config.governorate_keyword);
            records.push(FacilityRecord::new(derive_area(location), level, row_counts));
        }
        debug!(
            governorates = records.iter().filter(|r| r.level() == Level::Governorate).count(),
            districts = records.iter().filter(|r| r.level() == Level::District).count(),
            "Classified facility records"
        );

        let metadata = TableMetadata {
            source_path,
            row_count: df.height(),
            column_count: df.width(),
            loaded_at: Utc::now(),
        };
        info!(
            rows = metadata.row_count,
            columns = metadata.column_count,
            "Loaded facility table"
        );
        Ok(FacilityTable::new(records, metadata))
    }
}
impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Looks a column up by its trimmed header and returns it as text.
fn text_column(df: &DataFrame, wanted: &str) -> LoadResult<Series> {
    let wanted = wanted.trim();
    let name = df
        .get_column_names()
        .into_iter()
        .find(|name| name.trim() == wanted)
        .cloned()
        .ok_or_else(|| LoadError::ColumnNotFound {
            column: wanted.to_string(),
        })?;
    let column = df
        .column(name.as_str())
        .map_err(|source| LoadError::ColumnRead {
            column: wanted.to_string(),
            source,
        })?;
    column
        .as_materialized_series()
        .cast(&DataType::String)
        .map_err(|source| LoadError::ColumnRead {
            column: wanted.to_string(),
            source,
        })
}

/// Text after the last `/`, underscores turned into spaces.
pub fn derive_area(location: &str) -> String {
    let tail = location
        .rsplit_once('/')
        .map_or(location, |(_, tail)| tail);
    tail.replace('_', " ")
}

/// Binary classifier: anything without the keyword is a District.
pub fn classify_level(location: &str, governorate_keyword: &str) -> Level {
    if location
        .to_lowercase()
        .contains(&governorate_keyword.trim().to_lowercase())
    {
        Level::Governorate
    } else {
        Level::District
    }
}

/// Largest count a single cell may hold; bigger values are treated as
/// malformed.
pub const MAX_COUNT: u64 = u32::MAX as u64;

/// `None` means the cell is coerced to zero.
pub fn parse_count(cell: Option<&str>) -> Option<u64> {
    let value = cell?.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value <= MAX_COUNT as f64 {
        Some(value.trunc() as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_is_last_path_segment() {
        assert_eq!(
            derive_area("http://dbpedia.org/resource/Mount_Lebanon_Governorate"),
            "Mount Lebanon Governorate"
        );
        assert_eq!(derive_area("Zahle_District"), "Zahle District");
        assert_eq!(derive_area("a/b/"), "");
    }

    #[test]
    fn level_matches_keyword_case_insensitively() {
        assert_eq!(
            classify_level("https://x/South_GOVERNORATE", "Governorate"),
            Level::Governorate
        );
        assert_eq!(classify_level("https://x/Tyre_District", "Governorate"), Level::District);
        assert_eq!(classify_level("https://x/Somewhere", "Governorate"), Level::District);
    }

    #[test]
    fn counts_coerce_to_zero() {
        assert_eq!(parse_count(Some("12")), Some(12));
        assert_eq!(parse_count(Some(" 7.0 ")), Some(7));
        assert_eq!(parse_count(Some("3.9")), Some(3));
        assert_eq!(parse_count(Some("n/a")), None);
        assert_eq!(parse_count(Some("-4")), None);
        assert_eq!(parse_count(Some("inf")), None);
        assert_eq!(parse_count(None), None);
        assert_eq!(parse_count(Some("4294967295")), Some(MAX_COUNT));
        assert_eq!(parse_count(Some("4294967296")), None);
        assert_eq!(parse_count(Some("1e20")), None);
    }
}
