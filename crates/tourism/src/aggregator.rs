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

//! Group-by-area aggregation over a [`FacilityTable`].

use crate::error::{SelectionError, SelectionResult};
use crate::facility::{FacilityCounts, FacilityRecord, FacilityTable, FacilityType, Level};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelFilter {
    #[default]
    All,
    Governorate,
    District,
}
impl LevelFilter {
    pub fn matches(&self, level: Level) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Governorate => level == Level::Governorate,
            LevelFilter::District => level == Level::District,
        }
    }
    /// Plural label shown on the level control and in chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            LevelFilter::All => "All",
            LevelFilter::Governorate => "Governorates",
            LevelFilter::District => "Districts",
        }
    }
}
impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Governorate => LevelFilter::Governorate,
            Level::District => LevelFilter::District,
        }
    }
}
impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
impl FromStr for LevelFilter {
    type Err = SelectionError;
    fn from_str(s: &str) -> SelectionResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(LevelFilter::All),
            "governorate" | "governorates" => Ok(LevelFilter::Governorate),
            "district" | "districts" => Ok(LevelFilter::District),
            _ => Err(SelectionError::UnknownLevel {
                value: s.to_string(),
            }),
        }
    }
}

/// Subset of facility types, always held in canonical order without
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<FacilityType>")]
pub struct FacilitySelection(Vec<FacilityType>);
impl FacilitySelection {
    pub fn all() -> Self {
        Self(FacilityType::ALL.to_vec())
    }
    pub fn none() -> Self {
        Self(Vec::new())
    }
    pub fn from_types<I: IntoIterator<Item = FacilityType>>(types: I) -> Self {
        let mut selected: Vec<FacilityType> = types.into_iter().collect();
        selected.sort();
        selected.dedup();
        Self(selected)
    }
    pub fn contains(&self, facility: FacilityType) -> bool {
        self.0.contains(&facility)
    }
    pub fn toggle(&mut self, facility: FacilityType) {
        if self.contains(facility) {
            self.0.retain(|f| *f != facility);
        } else {
            self.0.push(facility);
            self.0.sort();
        }
    }
    pub fn types(&self) -> &[FacilityType] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl From<Vec<FacilityType>> for FacilitySelection {
    fn from(types: Vec<FacilityType>) -> Self {
        Self::from_types(types)
    }
}
impl Default for FacilitySelection {
    fn default() -> Self {
        Self::all()
    }
}
impl FromStr for FacilitySelection {
    type Err = SelectionError;
    fn from_str(s: &str) -> SelectionResult<Self> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse::<FacilityType>)
            .collect::<SelectionResult<Vec<_>>>()
            .map(Self::from_types)
    }
}

/// One ranked area. `counts` carries only the selected types; the others
/// stay at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaRow {
    pub area: String,
    pub counts: FacilityCounts,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongRow {
    pub area: String,
    pub facility_type: FacilityType,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankInsight {
    pub highest: AreaRow,
    pub lowest: AreaRow,
    pub gap: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeShare {
    pub facility_type: FacilityType,
    pub total: u64,
    pub share: f64,
}

/// Areas ranked by summed value, highest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedView {
    pub level: LevelFilter,
    pub selection: FacilitySelection,
    pub rows: Vec<AreaRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregation {
    Ranked(AggregatedView),
    NoSelection,
}
impl Aggregation {
    pub fn ranked(self) -> Option<AggregatedView> {
        match self {
            Aggregation::Ranked(view) => Some(view),
            Aggregation::NoSelection => None,
        }
    }
    pub fn is_no_selection(&self) -> bool {
        matches!(self, Aggregation::NoSelection)
    }
}

pub fn aggregate(
    table: &FacilityTable,
    level: LevelFilter,
    selection: &FacilitySelection,
) -> Aggregation {
    if selection.is_empty() {
        debug!(level = %level, "Skipping aggregation: no facility types selected");
        return Aggregation::NoSelection;
    }
    Aggregation::Ranked(rank_areas(table, level, selection))
}

/// All four types summed per area.
pub fn aggregate_totals(table: &FacilityTable, level: LevelFilter) -> AggregatedView {
    rank_areas(table, level, &FacilitySelection::all())
}

fn rank_areas(
    table: &FacilityTable,
    level: LevelFilter,
    selection: &FacilitySelection,
) -> AggregatedView {
    let mut groups: IndexMap<&str, FacilityCounts> = IndexMap::new();
    for record in table.records().iter().filter(|r| level.matches(r.level())) {
        let entry = groups.entry(record.area()).or_default();
        for facility in selection.types() {
            entry.add(*facility, record.count(*facility));
        }
    }
    let mut rows: Vec<AreaRow> = groups
        .into_iter()
        .map(|(area, counts)| AreaRow {
            area: area.to_string(),
            value: counts.sum_of(selection.types()),
            counts,
        })
        .collect();
    // Stable: equal values keep first-appearance order.
    rows.sort_by(|a, b| b.value.cmp(&a.value));
    debug!(
        level = %level,
        types = selection.len(),
        areas = rows.len(),
        "Aggregated facility counts by area"
    );
    AggregatedView {
        level,
        selection: selection.clone(),
        rows,
    }
}

impl AggregatedView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    pub fn total(&self) -> u64 {
        self.rows
            .iter()
            .fold(0u64, |sum, row| sum.saturating_add(row.value))
    }
    pub fn area_order(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.area.as_str()).collect()
    }
    pub fn rank_insight(&self) -> Option<RankInsight> {
        let highest = self.rows.first()?;
        let lowest = self.rows.last()?;
        Some(RankInsight {
            highest: highest.clone(),
            lowest: lowest.clone(),
            gap: highest.value - lowest.value,
        })
    }
    /// Truncated mean of the per-area values.
    pub fn average(&self) -> Option<u64> {
        if self.rows.is_empty() {
            return None;
        }
        Some(self.total() / self.rows.len() as u64)
    }
    /// One row per (area, selected type), areas in rank order.
    pub fn long_format(&self) -> Vec<LongRow> {
        self.rows
            .iter()
            .flat_map(|row| {
                self.selection.types().iter().map(move |facility| LongRow {
                    area: row.area.clone(),
                    facility_type: *facility,
                    count: row.counts.get(*facility),
                })
            })
            .collect()
    }
    pub fn type_totals(&self) -> FacilityCounts {
        let mut totals = FacilityCounts::default();
        for row in &self.rows {
            for facility in self.selection.types() {
                totals.add(*facility, row.counts.get(*facility));
            }
        }
        totals
    }
    /// Percentage share of each selected type, largest first. Empty when the
    /// selected types add up to nothing.
    pub fn type_shares(&self) -> Vec<TypeShare> {
        let totals = self.type_totals();
        let grand_total = totals.sum_of(self.selection.types());
        if grand_total == 0 {
            return Vec::new();
        }
        let mut shares: Vec<TypeShare> = self
            .selection
            .types()
            .iter()
            .map(|facility| {
                let total = totals.get(*facility);
                TypeShare {
                    facility_type: *facility,
                    total,
                    share: 100.0 * total as f64 / grand_total as f64,
                }
            })
            .collect();
        shares.sort_by(|a, b| b.total.cmp(&a.total));
        shares
    }
}

/// Sum of the selected counts over the records the filter keeps.
pub fn filtered_sum(
    records: &[FacilityRecord],
    level: LevelFilter,
    selection: &FacilitySelection,
) -> u64 {
    records
        .iter()
        .filter(|r| level.matches(r.level()))
        .fold(0u64, |sum, r| sum.saturating_add(r.counts().sum_of(selection.types())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_toggle_keeps_canonical_order() {
        let mut selection = FacilitySelection::none();
        selection.toggle(FacilityType::Restaurants);
        selection.toggle(FacilityType::Hotels);
        assert_eq!(
            selection.types(),
            &[FacilityType::Hotels, FacilityType::Restaurants]
        );
        selection.toggle(FacilityType::Hotels);
        assert_eq!(selection.types(), &[FacilityType::Restaurants]);
    }

    #[test]
    fn selection_parses_comma_list() {
        let selection: FacilitySelection = "restaurants, hotels,hotels".parse().unwrap();
        assert_eq!(
            selection.types(),
            &[FacilityType::Hotels, FacilityType::Restaurants]
        );
        assert!("".parse::<FacilitySelection>().unwrap().is_empty());
        assert!("hotels,bars".parse::<FacilitySelection>().is_err());
    }

    #[test]
    fn deserialized_selection_is_canonical() {
        let selection: FacilitySelection =
            serde_json::from_str(r#"["restaurants","hotels","restaurants"]"#).unwrap();
        assert_eq!(
            selection.types(),
            &[FacilityType::Hotels, FacilityType::Restaurants]
        );
        assert_eq!(
            serde_json::to_string(&selection).unwrap(),
            r#"["hotels","restaurants"]"#
        );

        let table = FacilityTable::from_records(vec![FacilityRecord::new(
            "Beirut",
            Level::Governorate,
            FacilityCounts::new(10, 5, 0, 3),
        )]);
        let view = aggregate(&table, LevelFilter::All, &selection).ranked().unwrap();
        assert_eq!(view.total(), 13);
    }

    #[test]
    fn level_filter_parses_control_values() {
        assert_eq!("Governorates".parse::<LevelFilter>(), Ok(LevelFilter::Governorate));
        assert_eq!("district".parse::<LevelFilter>(), Ok(LevelFilter::District));
        assert_eq!("ALL".parse::<LevelFilter>(), Ok(LevelFilter::All));
        assert!("region".parse::<LevelFilter>().is_err());
    }
}
