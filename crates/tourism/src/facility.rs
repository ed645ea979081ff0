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

//! Normalized facility records and the read-only table that holds them.

use crate::error::{SelectionError, SelectionResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityType {
    Hotels,
    Cafes,
    GuestHouses,
    Restaurants,
}
impl FacilityType {
    /// Canonical order, used for columns, long-format rows and tie-breaking.
    pub const ALL: [FacilityType; 4] = [
        FacilityType::Hotels,
        FacilityType::Cafes,
        FacilityType::GuestHouses,
        FacilityType::Restaurants,
    ];
    pub fn label(&self) -> &'static str {
        match self {
            FacilityType::Hotels => "Hotels",
            FacilityType::Cafes => "Cafes",
            FacilityType::GuestHouses => "Guest houses",
            FacilityType::Restaurants => "Restaurants",
        }
    }
    pub fn color(&self) -> &'static str {
        match self {
            FacilityType::Hotels => "#1f77b4",
            FacilityType::Cafes => "#2ca02c",
            FacilityType::GuestHouses => "#ff7f0e",
            FacilityType::Restaurants => "#d62728",
        }
    }
    pub fn slug(&self) -> &'static str {
        match self {
            FacilityType::Hotels => "hotels",
            FacilityType::Cafes => "cafes",
            FacilityType::GuestHouses => "guest-houses",
            FacilityType::Restaurants => "restaurants",
        }
    }
}
impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
impl FromStr for FacilityType {
    type Err = SelectionError;
    fn from_str(s: &str) -> SelectionResult<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "hotels" | "hotel" => Ok(FacilityType::Hotels),
            "cafes" | "cafe" => Ok(FacilityType::Cafes),
            "guest-houses" | "guest-house" | "guesthouses" => Ok(FacilityType::GuestHouses),
            "restaurants" | "restaurant" => Ok(FacilityType::Restaurants),
            _ => Err(SelectionError::UnknownFacilityType {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Governorate,
    District,
}
impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Governorate => "Governorate",
            Level::District => "District",
        }
    }
}
impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityCounts {
    pub hotels: u64,
    pub cafes: u64,
    pub guest_houses: u64,
    pub restaurants: u64,
}
impl FacilityCounts {
    pub fn new(hotels: u64, cafes: u64, guest_houses: u64, restaurants: u64) -> Self {
        Self {
            hotels,
            cafes,
            guest_houses,
            restaurants,
        }
    }
    pub fn get(&self, facility: FacilityType) -> u64 {
        match facility {
            FacilityType::Hotels => self.hotels,
            FacilityType::Cafes => self.cafes,
            FacilityType::GuestHouses => self.guest_houses,
            FacilityType::Restaurants => self.restaurants,
        }
    }
    fn slot(&mut self, facility: FacilityType) -> &mut u64 {
        match facility {
            FacilityType::Hotels => &mut self.hotels,
            FacilityType::Cafes => &mut self.cafes,
            FacilityType::GuestHouses => &mut self.guest_houses,
            FacilityType::Restaurants => &mut self.restaurants,
        }
    }
    /// Saturates at `u64::MAX`.
    pub fn add(&mut self, facility: FacilityType, value: u64) {
        let slot = self.slot(facility);
        *slot = slot.saturating_add(value);
    }
    pub fn total(&self) -> u64 {
        self.sum_of(&FacilityType::ALL)
    }
    pub fn sum_of<'a, I>(&self, facilities: I) -> u64
    where
        I: IntoIterator<Item = &'a FacilityType>,
    {
        facilities
            .into_iter()
            .fold(0u64, |sum, f| sum.saturating_add(self.get(*f)))
    }
}

/// One normalized source row. `total` is fixed at construction so it always
/// equals the sum of the four counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityRecord {
    area: String,
    level: Level,
    counts: FacilityCounts,
    total: u64,
}
impl FacilityRecord {
    pub fn new(area: impl Into<String>, level: Level, counts: FacilityCounts) -> Self {
        Self {
            area: area.into(),
            level,
            total: counts.total(),
            counts,
        }
    }
    pub fn area(&self) -> &str {
        &self.area
    }
    pub fn level(&self) -> Level {
        self.level
    }
    pub fn counts(&self) -> &FacilityCounts {
        &self.counts
    }
    pub fn count(&self, facility: FacilityType) -> u64 {
        self.counts.get(facility)
    }
    pub fn total(&self) -> u64 {
        self.total
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    pub source_path: Option<PathBuf>,
    pub row_count: usize,
    pub column_count: usize,
    pub loaded_at: DateTime<Utc>,
}

/// The loaded dataset. Immutable once built; every view is derived from it.
#[derive(Debug, Clone)]
pub struct FacilityTable {
    records: Vec<FacilityRecord>,
    metadata: TableMetadata,
}
impl FacilityTable {
    pub fn new(records: Vec<FacilityRecord>, metadata: TableMetadata) -> Self {
        Self { records, metadata }
    }
    /// Builds a table from already-normalized records, as if they had been
    /// read from a source with the four count columns plus a location column.
    pub fn from_records(records: Vec<FacilityRecord>) -> Self {
        let metadata = TableMetadata {
            source_path: None,
            row_count: records.len(),
            column_count: 5,
            loaded_at: Utc::now(),
        };
        Self { records, metadata }
    }
    pub fn records(&self) -> &[FacilityRecord] {
        &self.records
    }
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    pub fn total_facilities(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |sum, r| sum.saturating_add(r.total()))
    }
}
