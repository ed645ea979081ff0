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

use crate::aggregator::{FacilitySelection, LevelFilter};
use crate::error::{SelectionError, SelectionResult};
use crate::facility::FacilityType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartMode {
    #[default]
    Stacked,
    Grouped,
}
impl ChartMode {
    pub fn label(&self) -> &'static str {
        match self {
            ChartMode::Stacked => "Stacked",
            ChartMode::Grouped => "Grouped",
        }
    }
    /// Plotly `barmode` value.
    pub fn bar_mode(&self) -> &'static str {
        match self {
            ChartMode::Stacked => "stack",
            ChartMode::Grouped => "group",
        }
    }
}
impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
impl FromStr for ChartMode {
    type Err = SelectionError;
    fn from_str(s: &str) -> SelectionResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stacked" | "stack" => Ok(ChartMode::Stacked),
            "grouped" | "group" => Ok(ChartMode::Grouped),
            _ => Err(SelectionError::UnknownChartMode {
                value: s.to_string(),
            }),
        }
    }
}

/// User-controlled parameters for both charts. Owned by whoever drives the
/// dashboard and passed by reference into every render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub chart1_level: LevelFilter,
    pub chart2_level: LevelFilter,
    pub facility_types: FacilitySelection,
    pub chart_mode: ChartMode,
}
impl SelectionState {
    pub fn with_chart1_level(mut self, level: LevelFilter) -> Self {
        self.chart1_level = level;
        self
    }
    pub fn with_chart2_level(mut self, level: LevelFilter) -> Self {
        self.chart2_level = level;
        self
    }
    pub fn with_facility_types(mut self, facility_types: FacilitySelection) -> Self {
        self.facility_types = facility_types;
        self
    }
    pub fn with_chart_mode(mut self, mode: ChartMode) -> Self {
        self.chart_mode = mode;
        self
    }
    pub fn toggle_facility(&mut self, facility: FacilityType) {
        self.facility_types.toggle(facility);
    }
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
