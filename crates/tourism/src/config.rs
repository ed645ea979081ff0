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

use crate::error::{ConfigError, ConfigResult};
use crate::facility::FacilityType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub data_path: PathBuf,
    pub columns: ColumnConfig,
    pub governorate_keyword: String,
}
impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("lebanon_tourism.csv"),
            columns: ColumnConfig::default(),
            governorate_keyword: "Governorate".to_string(),
        }
    }
}

/// Source header names, compared after trimming whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub location: String,
    pub hotels: String,
    pub cafes: String,
    pub guest_houses: String,
    pub restaurants: String,
}
impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            location: "refArea".to_string(),
            hotels: "Total number of hotels".to_string(),
            cafes: "Total number of cafes".to_string(),
            guest_houses: "Total number of guest houses".to_string(),
            restaurants: "Total number of restaurants".to_string(),
        }
    }
}
impl ColumnConfig {
    pub fn count_column(&self, facility: FacilityType) -> &str {
        match facility {
            FacilityType::Hotels => &self.hotels,
            FacilityType::Cafes => &self.cafes,
            FacilityType::GuestHouses => &self.guest_houses,
            FacilityType::Restaurants => &self.restaurants,
        }
    }
}

impl ExplorerConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        info!("Loading explorer configuration from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
    pub fn from_yaml_str(yaml_content: &str) -> ConfigResult<Self> {
        let config: ExplorerConfig = serde_yaml::from_str(yaml_content)?;
        config.validate()?;
        Ok(config)
    }
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }
    pub fn validate(&self) -> ConfigResult<()> {
        if self.columns.location.trim().is_empty() {
            return Err(ConfigError::EmptyColumnName {
                field: "columns.location".to_string(),
            });
        }
        let mut seen = HashSet::new();
        for facility in FacilityType::ALL {
            let column = self.columns.count_column(facility).trim();
            if column.is_empty() {
                return Err(ConfigError::EmptyColumnName {
                    field: format!("columns.{}", facility.slug().replace('-', "_")),
                });
            }
            if !seen.insert(column) {
                return Err(ConfigError::DuplicateColumn {
                    column: column.to_string(),
                });
            }
        }
        if self.governorate_keyword.trim().is_empty() {
            return Err(ConfigError::EmptyKeyword);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = ExplorerConfig::from_yaml_str("data_path: data/tourism.csv\n").unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/tourism.csv"));
        assert_eq!(config.columns, ColumnConfig::default());
        assert_eq!(config.governorate_keyword, "Governorate");
    }

    #[test]
    fn duplicate_count_columns_are_rejected() {
        let yaml = "columns:\n  hotels: count\n  cafes: count\n";
        let err = ExplorerConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateColumn { column } if column == "count"));
    }

    #[test]
    fn empty_keyword_is_rejected() {
        let err = ExplorerConfig::from_yaml_str("governorate_keyword: '  '\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyKeyword));
    }
}
