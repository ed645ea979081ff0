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

pub mod aggregator;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod facility;
pub mod insight;
pub mod loader;
pub mod selection;
pub mod summary;

pub use aggregator::{
    aggregate, aggregate_totals, AggregatedView, Aggregation, AreaRow, FacilitySelection,
    LevelFilter, LongRow, RankInsight, TypeShare,
};
pub use config::{ColumnConfig, ExplorerConfig};
pub use dashboard::{render, BreakdownChart, BreakdownView, DashboardView, TotalsChart};
pub use error::{
    ConfigError, ErrorReporter, ErrorSeverity, ExplorerError, LoadError, Result, SelectionError,
};
pub use facility::{FacilityCounts, FacilityRecord, FacilityTable, FacilityType, Level};
pub use loader::Loader;
pub use selection::{ChartMode, SelectionState};
pub use summary::DatasetSummary;

/// A loaded dataset plus its summary. The table is read once and every
/// [`TourismExplorer::render`] call derives a fresh view from it.
pub struct TourismExplorer {
    config: ExplorerConfig,
    table: FacilityTable,
    summary: DatasetSummary,
}
impl TourismExplorer {
    pub fn open(config: ExplorerConfig) -> Result<Self> {
        config.validate()?;
        let table = Loader::with_config(config.clone()).load()?;
        Ok(Self::with_table(config, table))
    }
    pub fn from_table(table: FacilityTable) -> Self {
        Self::with_table(ExplorerConfig::default(), table)
    }
    fn with_table(config: ExplorerConfig, table: FacilityTable) -> Self {
        let summary = DatasetSummary::from_table(&table);
        Self {
            config,
            table,
            summary,
        }
    }
    pub fn render(&self, selection: &SelectionState) -> DashboardView {
        dashboard::render(&self.table, &self.summary, selection)
    }
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }
    pub fn table(&self) -> &FacilityTable {
        &self.table
    }
    pub fn summary(&self) -> &DatasetSummary {
        &self.summary
    }
}
