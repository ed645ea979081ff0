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

//! Assembles everything a renderer needs from the table and the current
//! selection. [`render`] is pure; call it again after every selection change.

use crate::aggregator::{
    aggregate, aggregate_totals, AggregatedView, Aggregation, LevelFilter, LongRow, RankInsight,
    TypeShare,
};
use crate::error::Result;
use crate::facility::{FacilityTable, Level};
use crate::insight::{
    rank_lines, share_lines, DISPARITY_STATEMENT, NO_FACILITIES_MESSAGE, NO_SELECTION_PROMPT,
};
use crate::selection::{ChartMode, SelectionState};
use crate::summary::DatasetSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub summary: DatasetSummary,
    pub selection: SelectionState,
    pub totals: TotalsChart,
    pub breakdown: BreakdownChart,
}
impl DashboardView {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Chart 1: total facilities per area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsChart {
    pub title: String,
    pub view: AggregatedView,
    pub district: Option<RankInsight>,
    pub governorate: Option<RankInsight>,
    pub insights: Vec<String>,
}

/// Chart 2: per-type breakdown, or a prompt when nothing is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BreakdownChart {
    NoSelection { prompt: String },
    Ready(BreakdownView),
}
impl BreakdownChart {
    pub fn view(&self) -> Option<&BreakdownView> {
        match self {
            BreakdownChart::Ready(view) => Some(view),
            BreakdownChart::NoSelection { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownView {
    pub title: String,
    pub level: LevelFilter,
    pub mode: ChartMode,
    pub area_order: Vec<String>,
    pub rows: Vec<LongRow>,
    pub shares: Vec<TypeShare>,
    pub insights: Vec<String>,
    pub notice: Option<String>,
}

pub fn render(
    table: &FacilityTable,
    summary: &DatasetSummary,
    selection: &SelectionState,
) -> DashboardView {
    DashboardView {
        summary: summary.clone(),
        selection: selection.clone(),
        totals: totals_chart(table, selection.chart1_level),
        breakdown: breakdown_chart(table, selection),
    }
}

pub fn totals_chart(table: &FacilityTable, level: LevelFilter) -> TotalsChart {
    let view = aggregate_totals(table, level);
    let district = aggregate_totals(table, LevelFilter::District).rank_insight();
    let governorate = aggregate_totals(table, LevelFilter::Governorate).rank_insight();
    let mut insights = Vec::new();
    if let Some(insight) = &district {
        insights.extend(rank_lines(Level::District, insight));
    }
    if let Some(insight) = &governorate {
        insights.extend(rank_lines(Level::Governorate, insight));
    }
    insights.push(DISPARITY_STATEMENT.to_string());
    TotalsChart {
        title: format!("Total Tourism Infrastructure ({level})"),
        view,
        district,
        governorate,
        insights,
    }
}

pub fn breakdown_chart(table: &FacilityTable, selection: &SelectionState) -> BreakdownChart {
    let level = selection.chart2_level;
    let view = match aggregate(table, level, &selection.facility_types) {
        Aggregation::Ranked(view) => view,
        Aggregation::NoSelection => {
            return BreakdownChart::NoSelection {
                prompt: NO_SELECTION_PROMPT.to_string(),
            }
        }
    };
    let shares = view.type_shares();
    let notice = shares
        .is_empty()
        .then(|| NO_FACILITIES_MESSAGE.to_string());
    BreakdownChart::Ready(BreakdownView {
        title: format!("Tourism Facilities Breakdown by Type ({level})"),
        level,
        mode: selection.chart_mode,
        area_order: view.area_order().into_iter().map(String::from).collect(),
        rows: view.long_format(),
        insights: share_lines(&shares),
        shares,
        notice,
    })
}
